//! Error types for evaluation documents.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or writing an evaluation document.
#[derive(Error, Debug)]
pub enum EvaluationError {
    /// The evaluation file does not exist.
    #[error("Evaluation file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read evaluation file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse evaluation file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to write evaluation file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result type for evaluation document operations.
pub type EvaluationResult<T> = Result<T, EvaluationError>;
