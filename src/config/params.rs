//! Tuning params-grid schema
//!
//! A params grid names the boosting model being tuned, the per-label
//! metric, the fold count, and an ordered list of parameters with the
//! explicit values to sweep. Declaration order is significant: it fixes
//! the expansion order of the grid and the column order of the report.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A single parameter value in a grid or a trial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
    Str(String),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(v) => write!(f, "{v}"),
            ParamValue::Float(v) => write!(f, "{v}"),
            ParamValue::Str(v) => write!(f, "{v}"),
        }
    }
}

/// One parameter and the values to sweep for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamSpec {
    pub name: String,
    pub values: Vec<ParamValue>,
}

/// The tuning grid for one model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamsGrid {
    /// Model identifier, e.g. `enwiki.articletopic.gradient_boosting`.
    pub model: String,

    /// Per-label metric name; trials are ranked by its macro average.
    #[serde(default = "default_metric")]
    pub metric: String,

    /// Cross-validation fold count used by the external tuner.
    #[serde(default = "default_folds")]
    pub folds: usize,

    pub params: Vec<ParamSpec>,
}

fn default_metric() -> String {
    "pr_auc".to_string()
}

fn default_folds() -> usize {
    10
}

impl ParamsGrid {
    /// Number of configurations the grid expands to.
    pub fn size(&self) -> usize {
        self.params.iter().map(|p| p.values.len()).product()
    }
}

/// Load a params grid from a YAML file, without validation.
pub fn load_params<P: AsRef<Path>>(path: P) -> Result<ParamsGrid> {
    let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
        Error::ConfigError(format!(
            "Failed to read params file {}: {e}",
            path.as_ref().display()
        ))
    })?;

    let grid: ParamsGrid = serde_yaml::from_str(&content)
        .map_err(|e| Error::ConfigError(format!("Failed to parse params YAML: {e}")))?;

    Ok(grid)
}

/// Validate a params grid.
pub fn validate_params(grid: &ParamsGrid) -> Result<()> {
    if grid.model.trim().is_empty() {
        return Err(Error::ConfigError("params: model must not be empty".to_string()));
    }
    if grid.folds == 0 {
        return Err(Error::ConfigError("params: folds must be > 0".to_string()));
    }
    if grid.params.is_empty() {
        return Err(Error::ConfigError(
            "params: at least one parameter is required".to_string(),
        ));
    }
    let mut seen = std::collections::BTreeSet::new();
    for spec in &grid.params {
        if !seen.insert(spec.name.as_str()) {
            return Err(Error::ConfigError(format!(
                "params: duplicate parameter '{}'",
                spec.name
            )));
        }
        if spec.values.is_empty() {
            return Err(Error::ConfigError(format!(
                "params: parameter '{}' has no values",
                spec.name
            )));
        }
    }
    Ok(())
}

/// Load and validate a params grid.
pub fn load_validated_params<P: AsRef<Path>>(path: P) -> Result<ParamsGrid> {
    let grid = load_params(path)?;
    validate_params(&grid)?;
    Ok(grid)
}
