//! Markdown tuning report
//!
//! Renders the record of a tuning sweep: grid provenance, the winning
//! configuration, every trial ranked by macro score, and the per-label
//! breakdown of the winner.

use chrono::{DateTime, Utc};

use super::trial::{label_union, rank_trials, Trial};
use crate::config::ParamsGrid;
use crate::error::{Error, Result};

/// Render the tuning report with the current timestamp.
pub fn render(grid: &ParamsGrid, trials: &[Trial]) -> Result<String> {
    render_at(grid, trials, Utc::now())
}

/// Render the tuning report at a fixed timestamp (testable).
pub fn render_at(grid: &ParamsGrid, trials: &[Trial], now: DateTime<Utc>) -> Result<String> {
    let ranked = rank_trials(trials);
    let best = ranked
        .first()
        .ok_or_else(|| Error::ResultsError("no scored trials to report".to_string()))?;
    let labels = label_union(trials);

    let mut out = String::new();
    out.push_str(&format!("# Model tuning report: {}\n\n", grid.model));
    out.push_str(&format!(
        "- Generated: {}\n- Metric: macro {} over {} labels\n- Cross-validation: {} folds\n- Trials: {} of {} grid configurations\n\n",
        now.format("%Y-%m-%d %H:%M:%S UTC"),
        grid.metric,
        labels.len(),
        grid.folds,
        trials.len(),
        grid.size(),
    ));

    let best_trial = &trials[best.index];
    out.push_str("## Best configuration\n\n");
    out.push_str(&format!("- macro {}: **{:.4}**\n", grid.metric, best.score));
    for spec in &grid.params {
        if let Some(value) = best_trial.params.get(&spec.name) {
            out.push_str(&format!("- {}: {}\n", spec.name, value));
        }
    }
    out.push('\n');

    out.push_str("## Trials\n\n");
    let mut header = format!("| rank | macro {} |", grid.metric);
    let mut rule = String::from("| ---: | ---: |");
    for spec in &grid.params {
        header.push_str(&format!(" {} |", spec.name));
        rule.push_str(" ---: |");
    }
    header.push_str(" note |");
    rule.push_str(" --- |");
    out.push_str(&header);
    out.push('\n');
    out.push_str(&rule);
    out.push('\n');

    for (rank, entry) in ranked.iter().enumerate() {
        let trial = &trials[entry.index];
        let mut row = format!("| {} | {:.4} |", rank + 1, entry.score);
        for spec in &grid.params {
            match trial.params.get(&spec.name) {
                Some(value) => row.push_str(&format!(" {value} |")),
                None => row.push_str(" - |"),
            }
        }
        row.push_str(if entry.incomplete {
            " partial labels |"
        } else {
            "  |"
        });
        out.push_str(&row);
        out.push('\n');
    }
    out.push('\n');

    out.push_str("## Per-label scores (best configuration)\n\n");
    out.push_str(&format!("| label | {} |\n| --- | ---: |\n", grid.metric));
    for label in &labels {
        match best_trial.labels.get(label) {
            Some(score) => out.push_str(&format!("| {label} | {score:.4} |\n")),
            None => out.push_str(&format!("| {label} | - |\n")),
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ParamSpec, ParamValue};
    use chrono::TimeZone;
    use std::collections::BTreeMap;

    fn sample_grid() -> ParamsGrid {
        ParamsGrid {
            model: "enwiki.articletopic.gradient_boosting".to_string(),
            metric: "pr_auc".to_string(),
            folds: 10,
            params: vec![
                ParamSpec {
                    name: "learning_rate".to_string(),
                    values: vec![ParamValue::Float(0.01), ParamValue::Float(0.1)],
                },
                ParamSpec {
                    name: "max_depth".to_string(),
                    values: vec![ParamValue::Int(3), ParamValue::Int(5)],
                },
            ],
        }
    }

    fn trial(rate: f64, depth: i64, arts: f64, tech: f64) -> Trial {
        let mut params = BTreeMap::new();
        params.insert("learning_rate".to_string(), ParamValue::Float(rate));
        params.insert("max_depth".to_string(), ParamValue::Int(depth));
        let mut labels = BTreeMap::new();
        labels.insert("Culture.Arts".to_string(), arts);
        labels.insert("STEM.Technology".to_string(), tech);
        Trial { params, labels }
    }

    fn render_sample() -> String {
        let trials = vec![
            trial(0.01, 3, 0.70, 0.60),
            trial(0.1, 5, 0.85, 0.81),
            trial(0.1, 3, 0.80, 0.74),
        ];
        let now = Utc.with_ymd_and_hms(2020, 6, 1, 12, 0, 0).unwrap();
        render_at(&sample_grid(), &trials, now).unwrap()
    }

    #[test]
    fn test_report_header_and_provenance() {
        let report = render_sample();
        assert!(report.starts_with("# Model tuning report: enwiki.articletopic.gradient_boosting"));
        assert!(report.contains("Generated: 2020-06-01 12:00:00 UTC"));
        assert!(report.contains("macro pr_auc over 2 labels"));
        assert!(report.contains("Cross-validation: 10 folds"));
        assert!(report.contains("Trials: 3 of 4 grid configurations"));
    }

    #[test]
    fn test_report_best_configuration() {
        let report = render_sample();
        assert!(report.contains("macro pr_auc: **0.8300**"));
        assert!(report.contains("- learning_rate: 0.1\n- max_depth: 5"));
    }

    #[test]
    fn test_report_trials_ranked_descending() {
        let report = render_sample();
        let rank1 = report.find("| 1 | 0.8300 |").unwrap();
        let rank2 = report.find("| 2 | 0.7700 |").unwrap();
        let rank3 = report.find("| 3 | 0.6500 |").unwrap();
        assert!(rank1 < rank2 && rank2 < rank3);
    }

    #[test]
    fn test_report_per_label_table() {
        let report = render_sample();
        assert!(report.contains("| Culture.Arts | 0.8500 |"));
        assert!(report.contains("| STEM.Technology | 0.8100 |"));
    }

    #[test]
    fn test_report_flags_partial_trials() {
        let mut partial = trial(0.01, 5, 0.5, 0.5);
        partial.labels.remove("STEM.Technology");
        let trials = vec![trial(0.1, 5, 0.85, 0.81), partial];
        let now = Utc.with_ymd_and_hms(2020, 6, 1, 12, 0, 0).unwrap();
        let report = render_at(&sample_grid(), &trials, now).unwrap();
        assert!(report.contains("partial labels"));
    }

    #[test]
    fn test_report_without_scored_trials_errors() {
        let now = Utc.with_ymd_and_hms(2020, 6, 1, 12, 0, 0).unwrap();
        assert!(render_at(&sample_grid(), &[], now).is_err());
    }
}
