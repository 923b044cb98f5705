//! Error types for template promotion.

use crate::evaluation::EvaluationError;
use qg_protocol::status::GateStatus;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a promotion run.
///
/// Failures on individual templates are not represented here; they are
/// logged and counted in the promotion summary instead.
#[derive(Error, Debug)]
pub enum PromotionError {
    /// The QA evaluation could not be loaded.
    #[error("Failed to load QA results: {0}")]
    Evaluation(#[from] EvaluationError),

    /// The evaluation did not pass, so nothing is promoted.
    #[error("Cannot promote: QA validation status is {0}")]
    GatesNotPassed(GateStatus),

    #[error("No template files found in {0}")]
    NoTemplates(PathBuf),

    #[error("Failed to walk directory {path}: {source}")]
    DirectoryWalk {
        path: PathBuf,
        source: walkdir::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Template not found: {0}")]
    TemplateNotFound(String),
}

/// Result type for promotion operations.
pub type PromotionResult<T> = Result<T, PromotionError>;
