//! Grid expansion command

use crate::cli::LogLevel;
use crate::config::{load_validated_params, GridArgs, OutputFormat};
use crate::tune::expand;

pub fn run_grid(args: GridArgs, _log_level: LogLevel) -> Result<(), String> {
    let grid = load_validated_params(&args.params)
        .map_err(|e| format!("Invalid params grid: {e}"))?;
    let configurations = expand(&grid);

    match args.format {
        OutputFormat::Text => {
            for assignment in &configurations {
                let pairs: Vec<String> = assignment
                    .iter()
                    .map(|(name, value)| format!("{name}={value}"))
                    .collect();
                println!("{}", pairs.join(" "));
            }
        }
        OutputFormat::Json => {
            let objects: Vec<serde_json::Map<String, serde_json::Value>> = configurations
                .iter()
                .map(|assignment| {
                    assignment
                        .iter()
                        .map(|(name, value)| {
                            Ok((name.clone(), serde_json::to_value(value)?))
                        })
                        .collect()
                })
                .collect::<Result<_, serde_json::Error>>()
                .map_err(|e| format!("JSON serialization failed: {e}"))?;
            let json = serde_json::to_string_pretty(&objects)
                .map_err(|e| format!("JSON serialization failed: {e}"))?;
            println!("{json}");
        }
        OutputFormat::Yaml => {
            return Err("Grid output supports only text and json".to_string());
        }
    }
    Ok(())
}
