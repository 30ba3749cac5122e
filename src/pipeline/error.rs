//! Pipeline error types

use std::path::PathBuf;
use thiserror::Error;

/// Orchestration errors
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Output {path} is produced by both '{first}' and '{second}'")]
    DuplicateProducer {
        path: PathBuf,
        first: String,
        second: String,
    },

    #[error("Dependency cycle involving stage '{stage}'")]
    Cycle { stage: String },

    #[error("Unknown stage '{stage}'")]
    UnknownStage { stage: String },

    #[error("Stage '{stage}' needs {path} which no stage produces and which does not exist")]
    MissingInput { stage: String, path: PathBuf },

    #[error("Stage '{stage}' has an empty command")]
    EmptyCommand { stage: String },

    #[error("Stage '{stage}' failed to start: {source}")]
    Spawn {
        stage: String,
        source: std::io::Error,
    },

    #[error("Stage '{stage}' exited with {status}")]
    StageFailed {
        stage: String,
        status: std::process::ExitStatus,
    },

    #[error("Stage '{stage}' did not produce declared output {path}")]
    MissingOutput { stage: String, path: PathBuf },

    #[error("Checksum mismatch for {path}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;
