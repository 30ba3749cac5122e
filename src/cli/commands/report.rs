//! Tuning report command

use std::fs::File;
use std::io::{BufReader, Write};

use crate::cli::{log, LogLevel};
use crate::config::{load_validated_params, ReportArgs};
use crate::tune::{read_trials, render};

use super::{finish_output, open_output};

pub fn run_report(args: ReportArgs, log_level: LogLevel) -> Result<(), String> {
    let grid = load_validated_params(&args.params)
        .map_err(|e| format!("Invalid params grid: {e}"))?;

    let file = File::open(&args.results)
        .map_err(|e| format!("Failed to open {}: {e}", args.results.display()))?;
    let trials = read_trials(BufReader::new(file))
        .map_err(|e| format!("Failed to read results: {e}"))?;

    let markdown =
        render(&grid, &trials).map_err(|e| format!("Failed to render report: {e}"))?;

    let mut output = open_output(args.output.as_deref())?;
    output
        .write_all(markdown.as_bytes())
        .map_err(|e| format!("Failed to write report: {e}"))?;
    finish_output(output)?;

    if let Some(path) = &args.output {
        log(
            log_level,
            LogLevel::Normal,
            &format!("✓ Report written to {} ({} trials)", path.display(), trials.len()),
        );
    }
    Ok(())
}
