//! Pipeline orchestration
//!
//! The manifest's stages are chained through files: each stage declares
//! the files it reads and writes, the graph orders them, and the runner
//! executes whatever is stale.

mod error;
mod graph;
mod runner;

pub use error::PipelineError;
pub use graph::StageGraph;
pub use runner::{sha256_file, Freshness, RunOptions, RunSummary, Runner};
