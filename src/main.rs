//! Etiquetar CLI
//!
//! Entry point for the dataset preparation and tuning harness.
//!
//! # Usage
//!
//! ```bash
//! # Run stale pipeline stages
//! etiquetar run pipeline.yaml
//!
//! # Fetch article text for labeled observations
//! etiquetar fetch-text --api-host https://en.wikipedia.org \
//!     --input labeled.ndjson --output labeled_text.ndjson
//!
//! # Replace text with the trainer's word cache
//! etiquetar extract --input labeled_text.ndjson --output cached.ndjson
//!
//! # Render a tuning report
//! etiquetar report params.yaml results.ndjson --output report.md
//! ```

use clap::Parser;
use etiquetar::cli::{run_command, Cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
