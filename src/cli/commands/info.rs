//! Manifest info command

use crate::cli::LogLevel;
use crate::config::{load_validated_manifest, InfoArgs, OutputFormat};

pub fn run_info(args: InfoArgs, _log_level: LogLevel) -> Result<(), String> {
    let manifest = load_validated_manifest(&args.manifest)
        .map_err(|e| format!("Invalid manifest: {e}"))?;

    match args.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&manifest)
                .map_err(|e| format!("JSON serialization failed: {e}"))?;
            println!("{json}");
        }
        OutputFormat::Yaml => {
            let yaml = serde_yaml::to_string(&manifest)
                .map_err(|e| format!("YAML serialization failed: {e}"))?;
            print!("{yaml}");
        }
        OutputFormat::Text => {
            println!("Pipeline: {}", manifest.name);
            if let Some(description) = &manifest.description {
                println!("  {description}");
            }
            println!("\nStages ({}):", manifest.stages.len());
            for stage in &manifest.stages {
                println!("  {}", stage.name);
                if !stage.inputs.is_empty() {
                    let inputs: Vec<String> =
                        stage.inputs.iter().map(|p| p.display().to_string()).collect();
                    println!("    reads:  {}", inputs.join(", "));
                }
                if !stage.outputs.is_empty() {
                    let outputs: Vec<String> =
                        stage.outputs.iter().map(|p| p.display().to_string()).collect();
                    println!("    writes: {}", outputs.join(", "));
                }
            }
        }
    }
    Ok(())
}
