mod cli;

use aws_service_cidr::{Client, Outcome, Result};
use clap::Parser;
use std::process::ExitCode;

/*-------------------------------------------------------------------------------------------------
  Main CLI Function
-------------------------------------------------------------------------------------------------*/

fn main() -> ExitCode {
    let args = cli::Args::parse();
    cli::log::init(&args);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &cli::Args) -> Result<()> {
    let client = Client::new()?;
    let target = args.target()?;

    let outcome = aws_service_cidr::sync_with_progress(
        &client,
        &target,
        args.include_ipv6,
        args.dry_run,
        cli::output::progress,
    )?;

    match outcome {
        Outcome::NoResults => cli::output::no_results(),
        Outcome::AlreadyExists(alias) => cli::output::alias_exists(&alias),
        Outcome::DryRun(config) => cli::output::json(&config)?,
        Outcome::Updated(response) => cli::output::json(&response)?,
    }

    Ok(())
}
