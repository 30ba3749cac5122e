//! Fetch-projects command

use std::io::Write;

use crate::cli::{log, LogLevel};
use crate::config::FetchProjectsArgs;
use crate::mwapi::MwClient;
use crate::projects::DirectoryParser;

use super::{finish_output, open_output};

pub fn run_fetch_projects(args: FetchProjectsArgs, log_level: LogLevel) -> Result<(), String> {
    let client =
        MwClient::new(&args.api_host).map_err(|e| format!("Failed to create client: {e}"))?;

    log(
        log_level,
        LogLevel::Normal,
        &format!("Parsing WikiProject directory from {}", args.root),
    );

    let taxonomy = DirectoryParser::with_root(&client, &args.root, log_level)
        .parse()
        .map_err(|e| format!("Failed to parse directory: {e}"))?;

    let json = serde_json::to_string_pretty(&taxonomy)
        .map_err(|e| format!("JSON serialization failed: {e}"))?;
    let mut output = open_output(args.output.as_deref())?;
    writeln!(output, "{json}").map_err(|e| format!("Failed to write taxonomy: {e}"))?;
    finish_output(output)?;

    log(
        log_level,
        LogLevel::Normal,
        &format!("✓ {} top-level categories", taxonomy.len()),
    );
    Ok(())
}
