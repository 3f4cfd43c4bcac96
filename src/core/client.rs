use crate::core::errors::{Error, Result};
use log::{info, warn};
use std::env;
use std::time::Duration;

/*-------------------------------------------------------------------------------------------------
  Constants
-------------------------------------------------------------------------------------------------*/

pub const DEFAULT_AWS_IP_RANGES_URL: &str = "https://ip-ranges.amazonaws.com/ip-ranges.json";
pub const DEFAULT_TIMEOUT: u64 = 30; // seconds

const CUSTOMER_CONFIG_PATH: &str = "/api/v1/networkTopology/customerConfig";

/*-------------------------------------------------------------------------------------------------
  Client Builder
-------------------------------------------------------------------------------------------------*/

/// A builder for the [Client] struct. The security API endpoint and token have no defaults and
/// must be supplied, either through the environment or the setters, before [ClientBuilder::build]
/// succeeds.
///
/// ```
/// let client = aws_service_cidr::ClientBuilder::default()
///     .api_endpoint("https://app.au1.sysdig.com")
///     .api_token("secret")
///     .timeout(10)
///     .build()
///     .unwrap();
///
/// assert_eq!(client.api_endpoint(), "https://app.au1.sysdig.com");
/// ```
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    api_endpoint: Option<String>,
    api_token: Option<String>,
    aws_ip_ranges_url: String,
    timeout: u64,
}

/*--------------------------------------------------------------------------------------
  Client Builder Implementation
--------------------------------------------------------------------------------------*/

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            api_endpoint: None,
            api_token: None,
            aws_ip_ranges_url: DEFAULT_AWS_IP_RANGES_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientBuilder {
    /// Create a new [ClientBuilder] reading initial configuration values from the process
    /// environment:
    /// - `API_TOKEN`
    /// - `API_ENDPOINT`
    /// - `AWS_IP_RANGES_URL`
    /// - `API_TIMEOUT`
    pub fn new() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Create a new [ClientBuilder] reading initial configuration values through `lookup`,
    /// which maps an environment variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let default = ClientBuilder::default();

        Self {
            api_endpoint: lookup("API_ENDPOINT"),
            api_token: lookup("API_TOKEN"),
            aws_ip_ranges_url: get_var(&lookup, "AWS_IP_RANGES_URL", default.aws_ip_ranges_url),
            timeout: get_var(&lookup, "API_TIMEOUT", default.timeout),
        }
    }

    /*-------------------------------------------------------------------------
      Setters
    -------------------------------------------------------------------------*/

    /// Set the base URL of the security API, ex: `https://app.au1.sysdig.com`.
    pub fn api_endpoint(&mut self, api_endpoint: &str) -> &mut Self {
        self.api_endpoint = Some(api_endpoint.to_string());
        self
    }

    /// Set the bearer token used to authenticate with the security API.
    pub fn api_token(&mut self, api_token: &str) -> &mut Self {
        self.api_token = Some(api_token.to_string());
        self
    }

    /// Set the URL used to retrieve the AWS IP Ranges; defaults to
    /// `https://ip-ranges.amazonaws.com/ip-ranges.json`.
    pub fn aws_ip_ranges_url(&mut self, url: &str) -> &mut Self {
        self.aws_ip_ranges_url = url.to_string();
        self
    }

    /// Set the per-request timeout in seconds; defaults to `30`.
    pub fn timeout(&mut self, timeout: u64) -> &mut Self {
        self.timeout = timeout;
        self
    }

    /*-------------------------------------------------------------------------
      Build Method
    -------------------------------------------------------------------------*/

    pub fn build(&self) -> Result<Client> {
        let api_endpoint = self
            .api_endpoint
            .as_deref()
            .filter(|value| !value.is_empty())
            .ok_or_else(|| Error::Config("API_ENDPOINT is not set".to_string()))?;
        let api_token = self
            .api_token
            .as_deref()
            .filter(|value| !value.is_empty())
            .ok_or_else(|| Error::Config("API_TOKEN is not set".to_string()))?;

        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(self.timeout))
            .build()
            .map_err(|error| Error::Config(format!("unable to build HTTP client: {error}")))?;

        Ok(Client {
            api_endpoint: api_endpoint.trim_end_matches('/').to_string(),
            api_token: api_token.to_string(),
            aws_ip_ranges_url: self.aws_ip_ranges_url.clone(),
            timeout: self.timeout,
            http,
        })
    }
}

/*-------------------------------------------------------------------------------------------------
  Client
-------------------------------------------------------------------------------------------------*/

/// Configuration and HTTP connection pool shared by the AWS IP Ranges fetcher and the security
/// API reader and writer. Built once at startup and passed by reference to each network call.
///
/// ```no_run
/// let client = aws_service_cidr::Client::new()?;
/// # Ok::<(), aws_service_cidr::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    api_endpoint: String,
    api_token: String,
    aws_ip_ranges_url: String,
    timeout: u64,
    pub(crate) http: reqwest::blocking::Client,
}

impl Client {
    /// Build a [Client] from the process environment.
    pub fn new() -> Result<Self> {
        ClientBuilder::new().build()
    }

    /*-------------------------------------------------------------------------
      Getters
    -------------------------------------------------------------------------*/

    /// Base URL of the security API, without a trailing `/`.
    pub fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    pub fn api_token(&self) -> &str {
        &self.api_token
    }

    pub fn aws_ip_ranges_url(&self) -> &str {
        &self.aws_ip_ranges_url
    }

    pub fn timeout(&self) -> u64 {
        self.timeout
    }

    /// URL of the customer-config resource, used for both reads and writes.
    pub fn customer_config_url(&self) -> String {
        format!("{}{}", self.api_endpoint, CUSTOMER_CONFIG_PATH)
    }
}

/*-------------------------------------------------------------------------------------------------
  Helper Functions
-------------------------------------------------------------------------------------------------*/

/// Get and parse a configuration value or return a default value.
fn get_var<F, T>(lookup: &F, name: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    lookup(name)
        .and_then(|value| {
            value
                .parse::<T>()
                .inspect(|_| info!("Using {}: {}", name, value))
                .inspect_err(|_| warn!("Invalid {}: {}", name, value))
                .ok()
        })
        .unwrap_or(default)
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
