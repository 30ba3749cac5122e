//! Fetch-text command

use crate::cli::{log, LogLevel};
use crate::config::FetchTextArgs;
use crate::fetch::fetch_texts;
use crate::mwapi::MwClient;
use crate::observation::{dump_observations, read_observations};

use super::{finish_output, open_input, open_output};

pub fn run_fetch_text(args: FetchTextArgs, log_level: LogLevel) -> Result<(), String> {
    let client =
        MwClient::new(&args.api_host).map_err(|e| format!("Failed to create client: {e}"))?;

    let input = open_input(args.input.as_deref())?;
    let observations =
        read_observations(input).map_err(|e| format!("Failed to read observations: {e}"))?;

    log(
        log_level,
        LogLevel::Normal,
        &format!(
            "Fetching {} text for {} observations ({} threads)",
            match args.revision {
                crate::mwapi::RevisionSelect::Latest => "article",
                crate::mwapi::RevisionSelect::First => "draft",
            },
            observations.len(),
            args.threads
        ),
    );

    let (fetched, stats) =
        fetch_texts(&client, args.revision, observations, args.threads, log_level)
            .map_err(|e| format!("Fetch failed: {e}"))?;

    let mut output = open_output(args.output.as_deref())?;
    dump_observations(&fetched, &mut output)
        .map_err(|e| format!("Failed to write observations: {e}"))?;
    finish_output(output)?;

    log(
        log_level,
        LogLevel::Normal,
        &format!(
            "✓ {} fetched, {} pages missing, {} non-articles skipped",
            stats.fetched, stats.missing, stats.skipped
        ),
    );
    Ok(())
}
