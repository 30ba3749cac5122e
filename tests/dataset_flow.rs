//! Dataset preparation flow tests
//!
//! Chains the offline stages the way the pipeline does: parse labeled
//! observations, extract the word cache, derive the label config, and
//! render a tuning report.

use std::collections::BTreeMap;

use serde_json::Value;

use etiquetar::config::{ParamSpec, ParamValue, ParamsGrid};
use etiquetar::labels::LabelConfig;
use etiquetar::observation::{dump_observations, read_observations};
use etiquetar::tune::{read_trials, render_at, Trial};
use etiquetar::words::{WordTokenizer, REVISION_TEXT_KEY};

use chrono::{TimeZone, Utc};

const LABELED_NDJSON: &str = r#"{"page_title": "Bread", "labels": ["Culture.Food and drink"], "text": "[[Bread]] is a {{staple}} food.", "rev_id": 101}
{"page_title": "Jazz", "labels": ["Culture.Arts"], "text": "<b>Jazz</b> is a music genre.", "rev_id": 102}
{"page_title": "Redirect stub", "labels": ["Culture.Arts"]}
"#;

#[test]
fn extract_then_labels_matches_expectations() {
    let mut observations = read_observations(LABELED_NDJSON.as_bytes()).unwrap();
    assert_eq!(observations.len(), 3);

    let tokenizer = WordTokenizer::default();
    observations.retain_mut(|obs| {
        let Some(text) = obs.text.take() else {
            return false;
        };
        let words = tokenizer.transform(&text);
        obs.cache
            .insert(REVISION_TEXT_KEY.to_string(), Value::String(words.join(" ")));
        true
    });

    // The text-less observation is dropped.
    assert_eq!(observations.len(), 2);
    assert_eq!(
        observations[0].cache[REVISION_TEXT_KEY],
        Value::String("bread is a food".to_string())
    );
    assert_eq!(
        observations[1].cache[REVISION_TEXT_KEY],
        Value::String("jazz is a music genre".to_string())
    );

    // Untyped fields survive the rewrite.
    assert_eq!(observations[0].extra["rev_id"], Value::from(101));

    let config = LabelConfig::from_observations(&observations);
    assert_eq!(config.labels, vec!["Culture.Arts", "Culture.Food and drink"]);
    assert_eq!(config.counts["Culture.Arts"], 1);

    // Round-trip back through the wire format.
    let mut out = Vec::new();
    dump_observations(&observations, &mut out).unwrap();
    let reparsed = read_observations(out.as_slice()).unwrap();
    assert_eq!(reparsed, observations);
}

#[test]
fn trials_to_report_flow() {
    let grid = ParamsGrid {
        model: "enwiki.articletopic.gradient_boosting".to_string(),
        metric: "pr_auc".to_string(),
        folds: 10,
        params: vec![ParamSpec {
            name: "learning_rate".to_string(),
            values: vec![ParamValue::Float(0.01), ParamValue::Float(0.1)],
        }],
    };

    let results = r#"{"params": {"learning_rate": 0.01}, "labels": {"Culture.Arts": 0.71, "Culture.Food and drink": 0.65}}
{"params": {"learning_rate": 0.1}, "labels": {"Culture.Arts": 0.83, "Culture.Food and drink": 0.79}}
"#;
    let trials: Vec<Trial> = read_trials(results.as_bytes()).unwrap();
    assert_eq!(trials.len(), 2);

    let now = Utc.with_ymd_and_hms(2020, 6, 1, 12, 0, 0).unwrap();
    let report = render_at(&grid, &trials, now).unwrap();

    assert!(report.contains("# Model tuning report: enwiki.articletopic.gradient_boosting"));
    assert!(report.contains("- learning_rate: 0.1"));
    assert!(report.contains("macro pr_auc: **0.8100**"));
    assert!(report.contains("| Culture.Arts | 0.8300 |"));
}

#[test]
fn trial_params_accept_mixed_value_types() {
    let line = r#"{"params": {"learning_rate": 0.1, "max_depth": 5, "loss": "deviance"}, "labels": {"A": 0.5}}"#;
    let trials = read_trials(line.as_bytes()).unwrap();

    let mut expected = BTreeMap::new();
    expected.insert("learning_rate".to_string(), ParamValue::Float(0.1));
    expected.insert("max_depth".to_string(), ParamValue::Int(5));
    expected.insert("loss".to_string(), ParamValue::Str("deviance".to_string()));
    assert_eq!(trials[0].params, expected);
}
