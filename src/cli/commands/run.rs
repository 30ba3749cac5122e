//! Pipeline run command

use crate::cli::{log, LogLevel};
use crate::config::{load_validated_manifest, RunArgs};
use crate::pipeline::{RunOptions, Runner};

pub fn run_pipeline(args: RunArgs, log_level: LogLevel) -> Result<(), String> {
    let manifest = load_validated_manifest(&args.manifest)
        .map_err(|e| format!("Invalid manifest: {e}"))?;

    log(
        log_level,
        LogLevel::Normal,
        &format!(
            "Pipeline: {} ({} stages)",
            manifest.name,
            manifest.stages.len()
        ),
    );

    let runner =
        Runner::new(&manifest, log_level).map_err(|e| format!("Invalid pipeline: {e}"))?;
    let options = RunOptions {
        force: args.force,
        dry_run: args.dry_run,
        stage: args.stage,
    };

    let summary = runner.run(&options).map_err(|e| format!("Pipeline failed: {e}"))?;

    if args.dry_run {
        log(
            log_level,
            LogLevel::Normal,
            &format!("✓ Dry run: {} stage(s) would run", summary.executed),
        );
    } else {
        log(
            log_level,
            LogLevel::Normal,
            &format!(
                "✓ Pipeline complete: {} stage(s) run, {} skipped",
                summary.executed, summary.skipped
            ),
        );
    }
    Ok(())
}
