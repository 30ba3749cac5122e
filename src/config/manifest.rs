//! Pipeline manifest schema
//!
//! A manifest declares the stages of the training pipeline and the files
//! that chain them together. Execution order comes from the file
//! dependencies, not from declaration order.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A pipeline manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub stages: Vec<Stage>,
}

/// One pipeline stage: an external command chained through files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub name: String,

    /// Program and arguments, exec-style (no shell interpretation).
    pub command: Vec<String>,

    /// Files this stage reads. Inputs produced by another stage form the
    /// dependency edges; the rest must exist on disk before the run.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inputs: Vec<PathBuf>,

    /// Files this stage writes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outputs: Vec<PathBuf>,

    /// Expected SHA-256 digests for outputs, verified after the stage
    /// runs. Used for download stages.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub sha256: BTreeMap<PathBuf, String>,
}

impl Manifest {
    pub fn stage(&self, name: &str) -> Option<&Stage> {
        self.stages.iter().find(|s| s.name == name)
    }
}

/// Load a manifest from a YAML file, without validation.
pub fn load_manifest<P: AsRef<Path>>(path: P) -> Result<Manifest> {
    let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
        Error::ConfigError(format!(
            "Failed to read manifest {}: {e}",
            path.as_ref().display()
        ))
    })?;

    let manifest: Manifest = serde_yaml::from_str(&content)
        .map_err(|e| Error::ConfigError(format!("Failed to parse manifest YAML: {e}")))?;

    Ok(manifest)
}

/// Validate manifest shape (graph properties are checked separately by
/// [`crate::pipeline::StageGraph`]).
pub fn validate_manifest(manifest: &Manifest) -> Result<()> {
    if manifest.name.trim().is_empty() {
        return Err(Error::ConfigError("manifest: name must not be empty".to_string()));
    }
    if manifest.stages.is_empty() {
        return Err(Error::ConfigError(
            "manifest: at least one stage is required".to_string(),
        ));
    }

    let mut names = std::collections::BTreeSet::new();
    for stage in &manifest.stages {
        if stage.name.trim().is_empty() {
            return Err(Error::ConfigError("manifest: stage name must not be empty".to_string()));
        }
        if !names.insert(stage.name.as_str()) {
            return Err(Error::ConfigError(format!(
                "manifest: duplicate stage '{}'",
                stage.name
            )));
        }
        if stage.command.is_empty() {
            return Err(Error::ConfigError(format!(
                "manifest: stage '{}' has an empty command",
                stage.name
            )));
        }
        for path in stage.sha256.keys() {
            if !stage.outputs.contains(path) {
                return Err(Error::ConfigError(format!(
                    "manifest: stage '{}' checksums {} which is not among its outputs",
                    stage.name,
                    path.display()
                )));
            }
        }
    }

    Ok(())
}

/// Load and validate a manifest, including its dependency graph.
pub fn load_validated_manifest<P: AsRef<Path>>(path: P) -> Result<Manifest> {
    let manifest = load_manifest(path)?;
    validate_manifest(&manifest)?;
    crate::pipeline::StageGraph::build(&manifest)?;
    Ok(manifest)
}
