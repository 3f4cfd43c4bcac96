use crate::core::errors::Result;
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/*-------------------------------------------------------------------------------------------------
  Target
-------------------------------------------------------------------------------------------------*/

/// The AWS service and region whose published prefixes should be allowlisted.
///
/// Service and region are matched against the AWS IP Ranges exactly as given; only the alias is
/// normalized to upper case.
///
/// ```
/// let target = aws_service_cidr::Target::new("s3", "us-east-1");
/// assert_eq!(target.alias(), "S3-US-EAST-1");
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Target {
    pub service: String,
    pub region: String,
}

impl Target {
    pub fn new(service: &str, region: &str) -> Self {
        Self {
            service: service.to_string(),
            region: region.to_string(),
        }
    }

    /// Alias of the allowlist group for this target: `UPPER(service)-UPPER(region)`.
    pub fn alias(&self) -> String {
        format!(
            "{}-{}",
            self.service.to_uppercase(),
            self.region.to_uppercase()
        )
    }
}

/*-------------------------------------------------------------------------------------------------
  Allowlist Group
-------------------------------------------------------------------------------------------------*/

/// A named set of CIDR ranges the security platform treats as a single unresolved-IP allowlist
/// entry.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AllowlistGroup {
    #[serde(rename = "ipsOrCIDRs")]
    pub ips_or_cidrs: Vec<String>,

    pub alias: String,

    #[serde(rename = "allowedByDefault")]
    pub allowed_by_default: bool,
}

impl AllowlistGroup {
    /// Build a new group for `target`; new groups are always allowed by default.
    pub fn new(target: &Target, ips_or_cidrs: Vec<String>) -> Self {
        Self {
            ips_or_cidrs,
            alias: target.alias(),
            allowed_by_default: true,
        }
    }
}

/*-------------------------------------------------------------------------------------------------
  Customer Config
-------------------------------------------------------------------------------------------------*/

const UNRESOLVED_IPS: &str = "unresolvedIPs";

/// Transient copy of the security API's network-topology customer configuration.
///
/// The configuration is owned by the server and kept as received: existing groups and every
/// other field are sent back unchanged and in their original order.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CustomerConfig {
    fields: Map<String, Value>,
}

impl CustomerConfig {
    /// The existing unresolved-IP groups; `None` when the field is absent, `null`, or not a list.
    pub fn unresolved_ips(&self) -> Option<&[Value]> {
        self.fields
            .get(UNRESOLVED_IPS)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
    }

    /// True when an existing unresolved-IP group carries exactly `alias`.
    pub fn contains_alias(&self, alias: &str) -> bool {
        self.unresolved_ips()
            .unwrap_or_default()
            .iter()
            .filter_map(|group| group.get("alias").and_then(Value::as_str))
            .any(|existing| {
                info!("Cross checking existing alias {existing} ...");
                existing == alias
            })
    }

    /// Return this configuration with `group` appended after the existing groups.
    pub fn with_group(mut self, group: AllowlistGroup) -> Result<Self> {
        let group = serde_json::to_value(group)?;

        match self.fields.get_mut(UNRESOLVED_IPS) {
            Some(Value::Array(groups)) => groups.push(group),
            _ => {
                self.fields
                    .insert(UNRESOLVED_IPS.to_string(), Value::Array(vec![group]));
            }
        }

        Ok(self)
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
