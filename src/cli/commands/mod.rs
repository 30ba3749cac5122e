//! CLI command implementations

mod extract;
mod fetch_projects;
mod fetch_text;
mod grid;
mod info;
mod labels;
mod report;
mod run;
mod status;
mod validate;

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::cli::LogLevel;
use crate::config::{Cli, Command};

/// Execute a CLI command based on the parsed arguments
pub fn run_command(cli: Cli) -> Result<(), String> {
    // Configure output based on verbose/quiet flags
    let log_level = if cli.quiet {
        LogLevel::Quiet
    } else if cli.verbose {
        LogLevel::Verbose
    } else {
        LogLevel::Normal
    };

    match cli.command {
        Command::Run(args) => run::run_pipeline(args, log_level),
        Command::Status(args) => status::run_status(args, log_level),
        Command::Validate(args) => validate::run_validate(args, log_level),
        Command::Info(args) => info::run_info(args, log_level),
        Command::FetchText(args) => fetch_text::run_fetch_text(args, log_level),
        Command::FetchProjects(args) => fetch_projects::run_fetch_projects(args, log_level),
        Command::Extract(args) => extract::run_extract(args, log_level),
        Command::Labels(args) => labels::run_labels(args, log_level),
        Command::Grid(args) => grid::run_grid(args, log_level),
        Command::Report(args) => report::run_report(args, log_level),
    }
}

/// Open an observations source: a file, or stdin when no path is given.
fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>, String> {
    match path {
        Some(path) => {
            let file = File::open(path)
                .map_err(|e| format!("Failed to open {}: {e}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

/// Open an output sink: a file, or stdout when no path is given.
///
/// Callers must run the writer through [`finish_output`] when done;
/// dropping a buffered writer swallows flush errors.
fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>, String> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .map_err(|e| format!("Failed to create {}: {e}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

/// Flush an output sink, surfacing short writes as command errors.
fn finish_output(mut output: Box<dyn Write>) -> Result<(), String> {
    output.flush().map_err(|e| format!("Failed to write output: {e}"))
}
