use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

/*-------------------------------------------------------------------------------------------------
  AWS IP Ranges `createDate` Format
-------------------------------------------------------------------------------------------------*/

const CREATE_DATE_FORMAT: &str = "%Y-%m-%d-%H-%M-%S";

/// Deserialize an optional `createDate`; `null` maps to `None`. Pair with `#[serde(default)]`
/// so a missing field also maps to `None`.
pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|value| {
            NaiveDateTime::parse_from_str(&value, CREATE_DATE_FORMAT)
                .map(|naive| naive.and_utc())
                .map_err(serde::de::Error::custom)
        })
        .transpose()
}
