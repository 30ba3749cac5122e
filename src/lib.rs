//! Etiquetar: dataset preparation and tuning harness for multi-label
//! topic classifiers.
//!
//! The harness prepares labeled observation files, drives the external
//! trainer and tuner through a file-dependency pipeline, and renders the
//! resulting tuning sweeps as markdown reports. Feature extraction,
//! gradient boosting, and cross-validation all live in the external
//! tooling; this crate owns everything around them.

pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod labels;
pub mod mwapi;
pub mod observation;
pub mod parallel;
pub mod pipeline;
pub mod projects;
pub mod tune;
pub mod words;

pub use error::{Error, Result};
