//! Pipeline status command

use crate::cli::LogLevel;
use crate::config::{load_validated_manifest, StatusArgs};
use crate::pipeline::{Freshness, Runner};

pub fn run_status(args: StatusArgs, log_level: LogLevel) -> Result<(), String> {
    let manifest = load_validated_manifest(&args.manifest)
        .map_err(|e| format!("Invalid manifest: {e}"))?;
    let runner =
        Runner::new(&manifest, log_level).map_err(|e| format!("Invalid pipeline: {e}"))?;

    println!("{:<28} {:<10}", "STAGE", "STATE");
    println!("{}", "-".repeat(38));
    let mut stale = 0usize;
    for (name, freshness) in runner.status() {
        println!("{name:<28} {freshness:<10}");
        if freshness != Freshness::Fresh {
            stale += 1;
        }
    }
    println!("\n{stale} stage(s) need to run");
    Ok(())
}
