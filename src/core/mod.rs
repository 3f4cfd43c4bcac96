/*-------------------------------------------------------------------------------------------------
  Core Modules
-------------------------------------------------------------------------------------------------*/

pub mod allowlist;
pub mod aws_ip_ranges;
pub mod client;
pub mod datetime;
pub mod errors;
pub mod security_api;
pub mod sync;
