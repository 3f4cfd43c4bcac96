use crate::core::allowlist::{AllowlistGroup, Target};
use crate::core::client::Client;
use crate::core::errors::{Error, Result};
use chrono::{DateTime, Utc};
use ipnetwork::{Ipv4Network, Ipv6Network};
use log::{debug, info, warn};
use serde::Deserialize;

/*-------------------------------------------------------------------------------------------------
  JSON Data Structures
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  JSON IP Ranges
--------------------------------------------------------------------------------------*/

/// The AWS IP Ranges document. Only `prefixes` is required; fields not listed here are ignored.
#[derive(Debug, Deserialize, Eq, PartialEq)]
pub struct JsonIpRanges {
    #[serde(rename = "syncToken", default)]
    pub sync_token: Option<String>,

    #[serde(
        rename = "createDate",
        default,
        deserialize_with = "crate::core::datetime::deserialize_option"
    )]
    pub create_date: Option<DateTime<Utc>>,

    pub prefixes: Vec<JsonIpPrefix>,

    #[serde(default)]
    pub ipv6_prefixes: Vec<JsonIpv6Prefix>,
}

/*--------------------------------------------------------------------------------------
  JSON IP (IPv4) Prefix
--------------------------------------------------------------------------------------*/

#[derive(Debug, Deserialize, Eq, PartialEq)]
pub struct JsonIpPrefix {
    pub ip_prefix: Ipv4Network,
    pub region: String,
    pub service: String,
}

/*--------------------------------------------------------------------------------------
  JSON IPv6 Prefix
--------------------------------------------------------------------------------------*/

#[derive(Debug, Deserialize, Eq, PartialEq)]
pub struct JsonIpv6Prefix {
    pub ipv6_prefix: Ipv6Network,
    pub region: String,
    pub service: String,
}

/*-------------------------------------------------------------------------------------------------
  Filter
-------------------------------------------------------------------------------------------------*/

impl JsonIpRanges {
    /// CIDRs published for exactly `target.service` in exactly `target.region`, in feed order.
    /// IPv6 prefixes follow the IPv4 prefixes when `include_ipv6` is set.
    pub fn cidrs(&self, target: &Target, include_ipv6: bool) -> Vec<String> {
        let ipv4 = self
            .prefixes
            .iter()
            .filter(|prefix| prefix.service == target.service && prefix.region == target.region)
            .map(|prefix| prefix.ip_prefix.to_string());

        let ipv6 = self
            .ipv6_prefixes
            .iter()
            .filter(|_| include_ipv6)
            .filter(|prefix| prefix.service == target.service && prefix.region == target.region)
            .map(|prefix| prefix.ipv6_prefix.to_string());

        ipv4.chain(ipv6).collect()
    }
}

/*-------------------------------------------------------------------------------------------------
  Fetch
-------------------------------------------------------------------------------------------------*/

impl Client {
    /// Retrieve the AWS IP Ranges and build the allowlist group for `target`.
    ///
    /// An empty match is not an error; the returned group simply has no CIDRs.
    pub fn fetch_cidrs(&self, target: &Target, include_ipv6: bool) -> Result<AllowlistGroup> {
        let ranges = self.get_ranges()?;
        let cidrs = ranges.cidrs(target, include_ipv6);

        if cidrs.is_empty() {
            warn!(
                "No AWS IP prefixes found for service {:?} in region {:?}",
                target.service, target.region
            );
        } else {
            info!(
                "Found {} AWS IP prefix(es) for service {:?} in region {:?}",
                cidrs.len(),
                target.service,
                target.region
            );
        }

        Ok(AllowlistGroup::new(target, cidrs))
    }

    /// GET and decode the AWS IP Ranges JSON.
    pub fn get_ranges(&self) -> Result<JsonIpRanges> {
        info!("Get AWS IP Ranges from URL: GET {}", self.aws_ip_ranges_url());

        let ranges: JsonIpRanges = self
            .http
            .get(self.aws_ip_ranges_url())
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.json())
            .map_err(Error::Fetch)?;

        if let Some(sync_token) = &ranges.sync_token {
            info!("AWS IP Ranges sync token {sync_token}");
        }
        if let Some(create_date) = &ranges.create_date {
            info!("AWS IP Ranges created {create_date}");
        }
        debug!(
            "AWS IP Ranges contain {} IPv4 and {} IPv6 prefixes",
            ranges.prefixes.len(),
            ranges.ipv6_prefixes.len()
        );

        Ok(ranges)
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
