//! Add an AWS service's published IP prefixes to a security platform's network-topology
//! allowlist.
//!
//! The AWS IP Ranges feed is filtered to one service and region, and the matching CIDRs are
//! appended as a new unresolved-IP group to the customer configuration held by the security API,
//! unless a group with the same alias is already present.
//!
//! ```no_run
//! use aws_service_cidr::{Client, Outcome, Target};
//!
//! let client = Client::new()?;
//! let target = Target::new("S3", "us-east-1");
//!
//! if let Outcome::Updated(response) = aws_service_cidr::sync(&client, &target, false, false)? {
//!     println!("{response:#}");
//! }
//! # Ok::<(), aws_service_cidr::Error>(())
//! ```

mod core;

/*-------------------------------------------------------------------------------------------------
  Library Interface
-------------------------------------------------------------------------------------------------*/

pub use crate::core::allowlist::{AllowlistGroup, CustomerConfig, Target};
pub use crate::core::aws_ip_ranges::{JsonIpPrefix, JsonIpRanges, JsonIpv6Prefix};
pub use crate::core::client::{Client, ClientBuilder, DEFAULT_AWS_IP_RANGES_URL, DEFAULT_TIMEOUT};
pub use crate::core::errors::{Error, Result};
pub use crate::core::security_api::ConfigCheck;
pub use crate::core::sync::{sync, sync_with_progress, Outcome, Progress};
