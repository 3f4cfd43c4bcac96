/*-------------------------------------------------------------------------------------------------
  Errors and Results
-------------------------------------------------------------------------------------------------*/

/// Errors raised while synchronizing an AWS service's CIDR ranges with the security API.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required environment value is missing or could not be parsed.
    #[error("configuration error: {0}")]
    Config(String),

    /// The AWS service and region must both be supplied to run a sync.
    #[error("an AWS service and region are required (ex: -a 'S3' -r 'us-east-1')")]
    MissingTarget,

    /// Retrieving or decoding the AWS IP Ranges feed failed.
    #[error("failed to fetch the AWS IP Ranges: {0}")]
    Fetch(#[source] reqwest::Error),

    /// Reading the current customer configuration failed.
    #[error("failed to read the current configuration: {0}")]
    RemoteRead(#[source] reqwest::Error),

    /// Submitting the updated customer configuration failed.
    #[error("failed to write the new configuration: {0}")]
    RemoteWrite(#[source] reqwest::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/*--------------------------------------------------------------------------------------
  Log Error Function
--------------------------------------------------------------------------------------*/

#[cfg(test)]
pub(crate) fn log_error(error: &Error) {
    log::error!("{}", error);
}
