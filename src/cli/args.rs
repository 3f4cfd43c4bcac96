use aws_service_cidr::{Error, Result, Target};
use clap::Parser;

/*-------------------------------------------------------------------------------------------------
  Command Line Interface (CLI) Arguments
-------------------------------------------------------------------------------------------------*/

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Add an AWS service's IP ranges to the network topology unresolved IPs.",
    long_about = None
)]
pub struct Args {
    /// AWS Service (ex: -a 'S3')
    #[arg(short = 'a', long = "aws_service", requires = "aws_region")]
    pub aws_service: Option<String>,

    /// AWS Region (ex: -r 'us-east-1')
    #[arg(short = 'r', long = "aws_region")]
    pub aws_region: Option<String>,

    /// Also add the service's IPv6 prefixes
    #[arg(long)]
    pub include_ipv6: bool,

    /// Print the configuration that would be submitted without updating it
    #[arg(long)]
    pub dry_run: bool,

    /// Logging verbosity
    #[command(flatten)]
    pub verbose: clap_verbosity_flag::Verbosity,
}

impl Args {
    /// The service and region to sync; both must have been supplied.
    pub fn target(&self) -> Result<Target> {
        match (&self.aws_service, &self.aws_region) {
            (Some(service), Some(region)) => Ok(Target::new(service, region)),
            _ => Err(Error::MissingTarget),
        }
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
