//! Tuning trial results
//!
//! The external tuner emits one JSON line per trial: the parameter
//! assignment it evaluated and the cross-validated per-label scores.
//! Trials are ranked by the macro average of their label scores.

use std::collections::{BTreeMap, BTreeSet};
use std::io::BufRead;

use serde::{Deserialize, Serialize};

use crate::config::ParamValue;
use crate::error::{Error, Result};

/// One evaluated configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trial {
    pub params: BTreeMap<String, ParamValue>,

    /// Per-label metric scores, keyed by label.
    pub labels: BTreeMap<String, f64>,
}

impl Trial {
    /// Unweighted mean of the per-label scores.
    ///
    /// `None` when the trial carries no scores at all.
    pub fn macro_score(&self) -> Option<f64> {
        if self.labels.is_empty() {
            return None;
        }
        Some(self.labels.values().sum::<f64>() / self.labels.len() as f64)
    }
}

/// Read trials from a JSON-lines reader. Blank lines are skipped.
pub fn read_trials<R: BufRead>(reader: R) -> Result<Vec<Trial>> {
    let mut trials = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let trial: Trial = serde_json::from_str(&line)
            .map_err(|e| Error::ResultsError(format!("line {}: {e}", idx + 1)))?;
        trials.push(trial);
    }
    Ok(trials)
}

/// Union of all labels scored by any trial.
pub fn label_union(trials: &[Trial]) -> BTreeSet<String> {
    trials
        .iter()
        .flat_map(|t| t.labels.keys().cloned())
        .collect()
}

/// A ranked trial: original index, macro score, and whether the trial is
/// missing scores for labels other trials carry.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedTrial {
    pub index: usize,
    pub score: f64,
    pub incomplete: bool,
}

/// Rank trials by macro score, descending; results-file order breaks
/// ties. Trials with no scores at all are excluded.
pub fn rank_trials(trials: &[Trial]) -> Vec<RankedTrial> {
    let all_labels = label_union(trials);

    let mut ranked: Vec<RankedTrial> = trials
        .iter()
        .enumerate()
        .filter_map(|(index, trial)| {
            trial.macro_score().map(|score| RankedTrial {
                index,
                score,
                incomplete: trial.labels.len() != all_labels.len(),
            })
        })
        .collect();

    // Stable sort keeps file order among equal scores.
    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trial(rate: f64, scores: &[(&str, f64)]) -> Trial {
        let mut params = BTreeMap::new();
        params.insert("learning_rate".to_string(), ParamValue::Float(rate));
        Trial {
            params,
            labels: scores
                .iter()
                .map(|(label, score)| (label.to_string(), *score))
                .collect(),
        }
    }

    #[test]
    fn test_macro_score_is_unweighted_mean() {
        let t = trial(0.1, &[("Culture.Arts", 0.8), ("STEM.Technology", 0.6)]);
        let score = t.macro_score().unwrap();
        assert!((score - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_macro_score_empty_is_none() {
        let t = trial(0.1, &[]);
        assert!(t.macro_score().is_none());
    }

    #[test]
    fn test_read_trials_json_lines() {
        let input = r#"{"params": {"learning_rate": 0.1}, "labels": {"Culture.Arts": 0.82}}
{"params": {"learning_rate": 0.5}, "labels": {"Culture.Arts": 0.75}}
"#;
        let trials = read_trials(input.as_bytes()).unwrap();
        assert_eq!(trials.len(), 2);
        assert_eq!(
            trials[0].params["learning_rate"],
            ParamValue::Float(0.1)
        );
        assert_eq!(trials[1].labels["Culture.Arts"], 0.75);
    }

    #[test]
    fn test_read_trials_reports_bad_line() {
        let input = "{\"params\": {}, \"labels\": {}}\nnope\n";
        let err = read_trials(input.as_bytes()).unwrap_err();
        assert!(format!("{err}").contains("line 2"));
    }

    #[test]
    fn test_rank_trials_descending_with_stable_ties() {
        let trials = vec![
            trial(0.01, &[("A", 0.5)]),
            trial(0.1, &[("A", 0.9)]),
            trial(0.5, &[("A", 0.9)]),
            trial(1.0, &[("A", 0.2)]),
        ];
        let ranked = rank_trials(&trials);
        let order: Vec<usize> = ranked.iter().map(|r| r.index).collect();
        // The two 0.9 trials keep file order.
        assert_eq!(order, vec![1, 2, 0, 3]);
    }

    #[test]
    fn test_rank_flags_incomplete_trials() {
        let trials = vec![
            trial(0.01, &[("A", 0.5), ("B", 0.7)]),
            trial(0.1, &[("A", 0.9)]),
        ];
        let ranked = rank_trials(&trials);
        let by_index: BTreeMap<usize, &RankedTrial> =
            ranked.iter().map(|r| (r.index, r)).collect();
        assert!(!by_index[&0].incomplete);
        assert!(by_index[&1].incomplete);
    }

    #[test]
    fn test_rank_excludes_scoreless_trials() {
        let trials = vec![trial(0.01, &[]), trial(0.1, &[("A", 0.9)])];
        let ranked = rank_trials(&trials);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].index, 1);
    }
}
