//! Label configuration
//!
//! Derives the label config the external trainer consumes from a labeled
//! observation file: the sorted distinct label set with observation
//! counts, optionally after remapping raw WikiProject labels to mid-level
//! taxonomy categories ("Culture.Arts").

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::observation::Observation;
use crate::projects::{Category, Entry, Taxonomy};

/// Label configuration emitted for the external trainer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelConfig {
    pub labels: Vec<String>,
    pub counts: BTreeMap<String, usize>,
}

impl LabelConfig {
    /// Collect the sorted distinct label set with per-label counts.
    pub fn from_observations<'a>(observations: impl IntoIterator<Item = &'a Observation>) -> Self {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for obs in observations {
            for label in &obs.labels {
                *counts.entry(label.clone()).or_insert(0) += 1;
            }
        }
        Self {
            labels: counts.keys().cloned().collect(),
            counts,
        }
    }
}

/// Index from WikiProject shortname (and full name) to its mid-level
/// category path, `"<top>.<mid>"`.
///
/// Projects nested below the mid level map to the mid-level ancestor, so
/// the label space stays at the granularity the tuning reports score.
pub fn midlevel_index(taxonomy: &Taxonomy) -> BTreeMap<String, String> {
    let mut index = BTreeMap::new();
    for (top_name, top) in taxonomy {
        for (mid_name, entry) in &top.topics {
            let path = format!("{top_name}.{mid_name}");
            match entry {
                Entry::Project(p) => {
                    index.insert(p.shortname.clone(), path.clone());
                    index.insert(p.name.clone(), path);
                }
                Entry::Category(mid) => collect_projects(mid, &path, &mut index),
            }
        }
    }
    index
}

fn collect_projects(category: &Category, path: &str, index: &mut BTreeMap<String, String>) {
    for entry in category.topics.values() {
        match entry {
            Entry::Project(p) => {
                index.insert(p.shortname.clone(), path.to_string());
                index.insert(p.name.clone(), path.to_string());
            }
            Entry::Category(nested) => collect_projects(nested, path, index),
        }
    }
}

/// Replace an observation's WikiProject labels with mid-level categories.
///
/// Labels with no taxonomy entry are dropped; the result is sorted and
/// deduplicated. Returns the number of labels that could not be mapped.
pub fn remap_labels(obs: &mut Observation, index: &BTreeMap<String, String>) -> usize {
    let mut unmapped = 0;
    let mut mapped: Vec<String> = Vec::new();
    for label in obs.labels.drain(..) {
        match index.get(&label) {
            Some(path) => mapped.push(path.clone()),
            None => unmapped += 1,
        }
    }
    mapped.sort();
    mapped.dedup();
    obs.labels = mapped;
    unmapped
}
