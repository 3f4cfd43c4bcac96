use crate::core::allowlist::{AllowlistGroup, CustomerConfig, Target};
use crate::core::client::Client;
use crate::core::errors::{Error, Result};
use log::{debug, info};
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;

/*-------------------------------------------------------------------------------------------------
  Config Check
-------------------------------------------------------------------------------------------------*/

/// Result of reading the current customer configuration for a [Target].
#[derive(Debug, PartialEq)]
pub enum ConfigCheck {
    /// No group uses the target alias yet; the configuration may be extended.
    Ready(CustomerConfig),

    /// A group with the target alias already exists.
    AliasExists,

    /// The server returned no unresolved-IP list.
    NoResults,
}

impl ConfigCheck {
    /// Classify `config` for a group named `alias`.
    pub fn new(config: CustomerConfig, alias: &str) -> Self {
        if config.unresolved_ips().is_none() {
            info!("Customer configuration has no unresolved IPs");
            return ConfigCheck::NoResults;
        }

        if config.contains_alias(alias) {
            info!("Found existing alias {alias}");
            return ConfigCheck::AliasExists;
        }

        ConfigCheck::Ready(config)
    }
}

/*-------------------------------------------------------------------------------------------------
  Security API Reader and Writer
-------------------------------------------------------------------------------------------------*/

impl Client {
    /// Fetch the current customer configuration and check it for the target alias.
    pub fn read_config(&self, target: &Target) -> Result<ConfigCheck> {
        let config = self.get_config()?;
        Ok(ConfigCheck::new(config, &target.alias()))
    }

    /// GET the current customer configuration as stored by the server.
    pub fn get_config(&self) -> Result<CustomerConfig> {
        let url = self.customer_config_url();
        info!("Get customer configuration: GET {url}");

        self.http
            .get(&url)
            .bearer_auth(self.api_token())
            .header(CONTENT_TYPE, "application/json")
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.json())
            .map_err(Error::RemoteRead)
    }

    /// Append `group` to `config` and replace the customer configuration with the result.
    /// Returns the server's response body as received.
    pub fn write_config(&self, config: CustomerConfig, group: AllowlistGroup) -> Result<Value> {
        let url = self.customer_config_url();
        let payload = config.with_group(group)?;
        debug!("New configuration: {}", serde_json::to_string(&payload)?);
        info!("Set customer configuration: PUT {url}");

        self.http
            .put(&url)
            .bearer_auth(self.api_token())
            .header(CONTENT_TYPE, "application/json")
            .json(&payload)
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.json())
            .map_err(Error::RemoteWrite)
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
