//! Labeled observation I/O
//!
//! Observations are the interchange format between every stage of the
//! harness: one JSON object per line. The fields the harness touches are
//! typed; everything else is carried through untouched so that stages can
//! be chained in any order without losing data.

use std::io::{BufRead, Write};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// A single labeled observation.
///
/// `text` is present between the fetch and extract stages; `cache` is
/// populated by the extract stage and consumed by the external trainer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub page_title: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub cache: Map<String, Value>,

    /// Fields the harness does not interpret, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Observation {
    pub fn new(page_title: impl Into<String>) -> Self {
        Self {
            page_title: page_title.into(),
            labels: Vec::new(),
            text: None,
            cache: Map::new(),
            extra: Map::new(),
        }
    }
}

/// Read observations from a JSON-lines reader.
///
/// Blank lines are skipped. Parse failures carry the 1-based line number.
pub fn read_observations<R: BufRead>(reader: R) -> Result<Vec<Observation>> {
    let mut observations = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let obs: Observation =
            serde_json::from_str(&line).map_err(|e| Error::ObservationError {
                line: idx + 1,
                message: e.to_string(),
            })?;
        observations.push(obs);
    }
    Ok(observations)
}

/// Write a single observation as one JSON line.
pub fn dump_observation<W: Write>(obs: &Observation, writer: &mut W) -> Result<()> {
    serde_json::to_writer(&mut *writer, obs)?;
    writer.write_all(b"\n")?;
    Ok(())
}

/// Write a full set of observations as JSON lines.
pub fn dump_observations<W: Write>(observations: &[Observation], writer: &mut W) -> Result<()> {
    for obs in observations {
        dump_observation(obs, writer)?;
    }
    Ok(())
}
