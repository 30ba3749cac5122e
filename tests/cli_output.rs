//! Command output integrity tests
//!
//! File-writing commands must surface write failures instead of exiting
//! successfully with truncated output.

use std::fs;

use etiquetar::cli::run_command;
use etiquetar::config::{Cli, Command, ExtractArgs, LabelsArgs};

fn cli(command: Command) -> Cli {
    Cli {
        command,
        verbose: false,
        quiet: true,
    }
}

#[test]
#[cfg(target_os = "linux")]
fn extract_fails_when_output_device_is_full() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("observations.ndjson");
    fs::write(
        &input,
        r#"{"page_title": "Bread", "text": "Bread is a staple food prepared by baking."}"#,
    )
    .unwrap();

    let result = run_command(cli(Command::Extract(ExtractArgs {
        input: Some(input),
        output: Some("/dev/full".into()),
        threads: Some(1),
    })));

    let err = result.unwrap_err();
    assert!(err.contains("Failed to write"), "unexpected error: {err}");
}

#[test]
#[cfg(target_os = "linux")]
fn labels_fails_when_output_device_is_full() {
    let dir = tempfile::tempdir().unwrap();
    let observations = dir.path().join("observations.ndjson");
    fs::write(
        &observations,
        r#"{"page_title": "Bread", "labels": ["Culture.Food and drink"]}"#,
    )
    .unwrap();

    let result = run_command(cli(Command::Labels(LabelsArgs {
        observations,
        taxonomy: None,
        output: Some("/dev/full".into()),
    })));

    assert!(result.is_err());
}

#[test]
fn extract_writes_the_word_cache() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("observations.ndjson");
    let output = dir.path().join("cached.ndjson");
    fs::write(
        &input,
        r#"{"page_title": "Bread", "text": "[[Bread]] is a staple food prepared by baking."}"#,
    )
    .unwrap();

    run_command(cli(Command::Extract(ExtractArgs {
        input: Some(input),
        output: Some(output.clone()),
        threads: Some(1),
    })))
    .unwrap();

    let written = fs::read_to_string(&output).unwrap();
    assert!(written.contains("\"revision.text\""));
    assert!(written.contains("bread is a staple food prepared by baking"));
    assert!(!written.contains("\"text\""));
}
