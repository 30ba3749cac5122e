//! Hyperparameter tuning support
//!
//! Grid expansion for the external tuner's inputs and markdown report
//! generation for its outputs. The search itself (cross-validated
//! training per configuration) happens in the external tool.

mod grid;
mod report;
mod trial;

pub use grid::{expand, Assignment};
pub use report::{render, render_at};
pub use trial::{label_union, rank_trials, read_trials, RankedTrial, Trial};
