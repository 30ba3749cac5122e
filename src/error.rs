//! Crate-level error types

use thiserror::Error;

/// Harness errors
#[derive(Debug, Error)]
pub enum Error {
    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Observation parse error at line {line}: {message}")]
    ObservationError { line: usize, message: String },

    #[error("Results parse error: {0}")]
    ResultsError(String),

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] crate::pipeline::PipelineError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type for harness operations
pub type Result<T> = std::result::Result<T, Error>;
