//! Manifest validate command

use crate::cli::{log, LogLevel};
use crate::config::{load_validated_manifest, ValidateArgs};

pub fn run_validate(args: ValidateArgs, log_level: LogLevel) -> Result<(), String> {
    let manifest = load_validated_manifest(&args.manifest)
        .map_err(|e| format!("Invalid manifest: {e}"))?;

    log(
        log_level,
        LogLevel::Normal,
        &format!(
            "✓ {} is valid ({} stages)",
            args.manifest.display(),
            manifest.stages.len()
        ),
    );
    Ok(())
}
