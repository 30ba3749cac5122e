//! Extract command

use std::convert::Infallible;

use serde_json::Value;

use crate::cli::{log, LogLevel};
use crate::config::ExtractArgs;
use crate::observation::{dump_observations, read_observations, Observation};
use crate::parallel::map_ordered;
use crate::words::{WordTokenizer, REVISION_TEXT_KEY};

use super::{finish_output, open_input, open_output};

pub fn run_extract(args: ExtractArgs, log_level: LogLevel) -> Result<(), String> {
    let input = open_input(args.input.as_deref())?;
    let observations =
        read_observations(input).map_err(|e| format!("Failed to read observations: {e}"))?;
    let total = observations.len();

    let threads = args.threads.unwrap_or_else(|| {
        std::thread::available_parallelism().map(usize::from).unwrap_or(1)
    });
    log(
        log_level,
        LogLevel::Normal,
        &format!("Extracting words for {total} observations ({threads} threads)"),
    );

    let tokenizer = WordTokenizer::default();
    let tokenizer = &tokenizer;
    let extracted = map_ordered(observations, threads, |mut obs: Observation| {
        let Some(text) = obs.text.take() else {
            return Ok::<_, Infallible>(None);
        };
        let words = tokenizer.transform(&text);
        obs.cache
            .insert(REVISION_TEXT_KEY.to_string(), Value::String(words.join(" ")));
        Ok(Some(obs))
    })
    .unwrap_or_else(|e| match e {});

    let kept: Vec<Observation> = extracted.into_iter().flatten().collect();
    let dropped = total - kept.len();
    if dropped > 0 {
        eprintln!("Warning: {dropped} observation(s) had no text and were dropped");
    }

    let mut output = open_output(args.output.as_deref())?;
    dump_observations(&kept, &mut output)
        .map_err(|e| format!("Failed to write observations: {e}"))?;
    finish_output(output)?;

    log(
        log_level,
        LogLevel::Normal,
        &format!("✓ Extracted {} observations", kept.len()),
    );
    Ok(())
}
