use crate::cli::Args;

/*-------------------------------------------------------------------------------------------------
  Logging
-------------------------------------------------------------------------------------------------*/

/// Send log records to stderr at the verbosity requested on the command line.
pub fn init(args: &Args) {
    stderrlog::new()
        .module("aws_service_cidr")
        .verbosity(args.verbose.log_level_filter())
        .init()
        .unwrap_or_else(|error| eprintln!("Unable to initialize logging: {error}"));
}
