//! Labels command

use std::fs::File;
use std::io::{BufReader, Write};

use crate::cli::{log, LogLevel};
use crate::config::LabelsArgs;
use crate::labels::{midlevel_index, remap_labels, LabelConfig};
use crate::observation::read_observations;
use crate::projects::Taxonomy;

use super::{finish_output, open_output};

pub fn run_labels(args: LabelsArgs, log_level: LogLevel) -> Result<(), String> {
    let file = File::open(&args.observations)
        .map_err(|e| format!("Failed to open {}: {e}", args.observations.display()))?;
    let mut observations = read_observations(BufReader::new(file))
        .map_err(|e| format!("Failed to read observations: {e}"))?;

    if let Some(taxonomy_path) = &args.taxonomy {
        let content = std::fs::read_to_string(taxonomy_path)
            .map_err(|e| format!("Failed to read {}: {e}", taxonomy_path.display()))?;
        let taxonomy: Taxonomy = serde_json::from_str(&content)
            .map_err(|e| format!("Failed to parse taxonomy: {e}"))?;
        let index = midlevel_index(&taxonomy);

        let mut unmapped = 0;
        for obs in &mut observations {
            unmapped += remap_labels(obs, &index);
        }
        if unmapped > 0 {
            eprintln!("Warning: {unmapped} label(s) had no taxonomy entry and were dropped");
        }
    }

    let config = LabelConfig::from_observations(&observations);
    let json = serde_json::to_string_pretty(&config)
        .map_err(|e| format!("JSON serialization failed: {e}"))?;
    let mut output = open_output(args.output.as_deref())?;
    writeln!(output, "{json}").map_err(|e| format!("Failed to write label config: {e}"))?;
    finish_output(output)?;

    log(
        log_level,
        LogLevel::Normal,
        &format!(
            "✓ {} distinct labels across {} observations",
            config.labels.len(),
            observations.len()
        ),
    );
    Ok(())
}
