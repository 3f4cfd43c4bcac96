use aws_service_cidr::{Progress, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Serializer;
use std::io::{self, Write};

/*-------------------------------------------------------------------------------------------------
  Output Functions
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  Progress
--------------------------------------------------------------------------------------*/

pub fn progress(step: Progress) {
    match step {
        Progress::CheckingConfiguration => println!("Checking current configuration ..."),
        Progress::CheckingAlias(alias) => println!("Checking if alias {alias} exists ..."),
        Progress::SettingConfiguration => println!("Setting new configuration ..."),
    }
}

pub fn no_results() {
    println!("No Results.");
}

pub fn alias_exists(alias: &str) {
    println!("Found existing alias {alias}.");
}

/*--------------------------------------------------------------------------------------
  JSON
--------------------------------------------------------------------------------------*/

/// Print `value` as JSON with a 4-space indent, keeping its key order.
pub fn json<T: Serialize>(value: &T) -> Result<()> {
    write_json(io::stdout().lock(), value)
}

fn write_json<W: Write, T: Serialize>(writer: W, value: &T) -> Result<()> {
    let mut serializer = Serializer::with_formatter(writer, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut serializer)?;

    let mut writer = serializer.into_inner();
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
