//! Pipeline runner
//!
//! Executes stale stages in dependency order. Freshness is mtime-based:
//! a stage is fresh when all of its outputs exist and none is older than
//! any input. Failed or checksum-mismatched stages have their declared
//! outputs removed so a rerun is never satisfied by partial artifacts.

use std::fs;
use std::path::Path;
use std::process::Command;
use std::time::SystemTime;

use sha2::{Digest, Sha256};

use super::error::{PipelineError, Result};
use super::graph::StageGraph;
use crate::cli::{log, LogLevel};
use crate::config::{Manifest, Stage};

/// Options for a pipeline run.
#[derive(Debug, Default, Clone)]
pub struct RunOptions {
    /// Rerun every selected stage regardless of freshness.
    pub force: bool,
    /// Print what would run without executing anything.
    pub dry_run: bool,
    /// Limit the run to one stage and its stale prerequisites.
    pub stage: Option<String>,
}

/// Freshness of one stage relative to its files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// All outputs exist and are newer than every input.
    Fresh,
    /// Some output is missing.
    MissingOutputs,
    /// An input is newer than an output.
    Stale,
}

impl std::fmt::Display for Freshness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Freshness::Fresh => write!(f, "fresh"),
            Freshness::MissingOutputs => write!(f, "missing"),
            Freshness::Stale => write!(f, "stale"),
        }
    }
}

/// Summary of a completed run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub executed: usize,
    pub skipped: usize,
}

/// Pipeline runner over a validated manifest.
pub struct Runner<'a> {
    manifest: &'a Manifest,
    graph: StageGraph,
    level: LogLevel,
}

impl<'a> Runner<'a> {
    pub fn new(manifest: &'a Manifest, level: LogLevel) -> Result<Self> {
        let graph = StageGraph::build(manifest)?;
        Ok(Self {
            manifest,
            graph,
            level,
        })
    }

    /// Run the selected stages in dependency order.
    pub fn run(&self, options: &RunOptions) -> Result<RunSummary> {
        let selected = match &options.stage {
            Some(name) => {
                let target = self
                    .manifest
                    .stages
                    .iter()
                    .position(|s| s.name == *name)
                    .ok_or_else(|| PipelineError::UnknownStage {
                        stage: name.clone(),
                    })?;
                self.graph.closure(self.manifest, target)?
            }
            None => self.graph.order(self.manifest)?,
        };

        self.check_external_inputs(&selected)?;

        let mut summary = RunSummary::default();
        for idx in selected {
            let stage = &self.manifest.stages[idx];
            if !options.force && self.freshness(stage) == Freshness::Fresh {
                log(
                    self.level,
                    LogLevel::Normal,
                    &format!("  = {} (fresh, skipped)", stage.name),
                );
                summary.skipped += 1;
                continue;
            }

            if options.dry_run {
                log(
                    self.level,
                    LogLevel::Normal,
                    &format!("  → {} (would run: {})", stage.name, stage.command.join(" ")),
                );
                summary.executed += 1;
                continue;
            }

            self.execute(stage)?;
            summary.executed += 1;
        }

        Ok(summary)
    }

    /// Freshness of every stage, in manifest order.
    pub fn status(&self) -> Vec<(&str, Freshness)> {
        self.manifest
            .stages
            .iter()
            .map(|s| (s.name.as_str(), self.freshness(s)))
            .collect()
    }

    /// Inputs nobody produces must already exist, checked before any
    /// stage runs so a half-finished pipeline is never left behind.
    fn check_external_inputs(&self, selected: &[usize]) -> Result<()> {
        for &idx in selected {
            let stage = &self.manifest.stages[idx];
            for input in &stage.inputs {
                if self.graph.producer(input).is_none() && !input.exists() {
                    return Err(PipelineError::MissingInput {
                        stage: stage.name.clone(),
                        path: input.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    fn freshness(&self, stage: &Stage) -> Freshness {
        let mut oldest_output: Option<SystemTime> = None;
        for output in &stage.outputs {
            match mtime(output) {
                None => return Freshness::MissingOutputs,
                Some(t) => {
                    oldest_output = Some(match oldest_output {
                        Some(prev) if prev < t => prev,
                        _ => t,
                    });
                }
            }
        }

        // A stage with no outputs (e.g. a report published elsewhere) is
        // never fresh; it runs every time.
        let Some(oldest_output) = oldest_output else {
            return Freshness::MissingOutputs;
        };

        for input in &stage.inputs {
            if let Some(t) = mtime(input) {
                if t > oldest_output {
                    return Freshness::Stale;
                }
            }
        }

        Freshness::Fresh
    }

    fn execute(&self, stage: &Stage) -> Result<()> {
        // Manifest validation rejects this, but a Stage built in code
        // can still arrive empty.
        let Some((program, args)) = stage.command.split_first() else {
            return Err(PipelineError::EmptyCommand {
                stage: stage.name.clone(),
            });
        };

        log(
            self.level,
            LogLevel::Normal,
            &format!("  → {}: {}", stage.name, stage.command.join(" ")),
        );

        let status = Command::new(program)
            .args(args)
            .status()
            .map_err(|source| PipelineError::Spawn {
                stage: stage.name.clone(),
                source,
            })?;

        if !status.success() {
            self.remove_outputs(stage);
            return Err(PipelineError::StageFailed {
                stage: stage.name.clone(),
                status,
            });
        }

        for output in &stage.outputs {
            if !output.exists() {
                self.remove_outputs(stage);
                return Err(PipelineError::MissingOutput {
                    stage: stage.name.clone(),
                    path: output.clone(),
                });
            }
        }

        for (path, expected) in &stage.sha256 {
            let actual = sha256_file(path)?;
            if !actual.eq_ignore_ascii_case(expected) {
                self.remove_outputs(stage);
                return Err(PipelineError::ChecksumMismatch {
                    path: path.clone(),
                    expected: expected.clone(),
                    actual,
                });
            }
        }

        log(
            self.level,
            LogLevel::Normal,
            &format!("  ✓ {}", stage.name),
        );
        Ok(())
    }

    fn remove_outputs(&self, stage: &Stage) {
        for output in &stage.outputs {
            if output.exists() {
                if let Err(e) = fs::remove_file(output) {
                    eprintln!(
                        "Warning: could not remove partial output {}: {e}",
                        output.display()
                    );
                }
            }
        }
    }
}

fn mtime(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}

/// Hex SHA-256 digest of a file, streamed.
pub fn sha256_file(path: &Path) -> Result<String> {
    use std::io::Read;

    let mut file = fs::File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 8192];
    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    let digest = hasher.finalize();
    Ok(digest.iter().map(|b| format!("{b:02x}")).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_sha256_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.txt");
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(b"abc").unwrap();
        drop(f);

        // Known digest of "abc".
        assert_eq!(
            sha256_file(&path).unwrap(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_freshness_display() {
        assert_eq!(Freshness::Fresh.to_string(), "fresh");
        assert_eq!(Freshness::MissingOutputs.to_string(), "missing");
        assert_eq!(Freshness::Stale.to_string(), "stale");
    }
}
