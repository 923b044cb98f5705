//! Evaluation document persistence and status checks.
//!
//! `qa-gates evaluate` saves a [`GateEvaluation`] with [`save_evaluation`];
//! later pipeline steps load it back with [`load_evaluation`] or reduce it
//! to a pass/fail decision with [`check_gate_status`].

pub mod error;

pub use error::{EvaluationError, EvaluationResult};

use crate::write_json;
use qg_protocol::evaluation_models::GateEvaluation;
use qg_protocol::status::GateStatus;
use std::path::Path;

/// Loads an evaluation document.
///
/// # Errors
///
/// - `NotFound` if `path` does not exist
/// - `Read` if it cannot be read
/// - `Parse` if it is not a JSON evaluation document
pub async fn load_evaluation(path: &Path) -> EvaluationResult<GateEvaluation> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(EvaluationError::NotFound(path.to_path_buf()))
        }
        Err(source) => {
            return Err(EvaluationError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    serde_json::from_str(&content).map_err(|source| EvaluationError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Saves an evaluation document as pretty JSON, creating parent directories.
pub async fn save_evaluation(path: &Path, evaluation: &GateEvaluation) -> EvaluationResult<()> {
    write_json(path, evaluation)
        .await
        .map_err(|source| EvaluationError::Write {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::info!(path = %path.display(), "Saved QA evaluation");
    Ok(())
}

/// Outcome of checking a stored evaluation.
#[derive(Debug)]
pub struct StatusCheck {
    /// Effective status. `FAILED` whenever the document is unusable or
    /// does not record a status.
    pub status: GateStatus,

    /// The document, when it could be loaded.
    pub evaluation: Option<GateEvaluation>,

    /// Why the document could not be loaded.
    pub error: Option<EvaluationError>,
}

impl StatusCheck {
    pub fn passed(&self) -> bool {
        self.status.is_passed()
    }
}

/// Reduces the evaluation at `path` to a gate status.
///
/// Never fails: a missing or corrupt file yields `FAILED` with the
/// underlying error attached for display.
pub async fn check_gate_status(path: &Path) -> StatusCheck {
    match load_evaluation(path).await {
        Ok(evaluation) => StatusCheck {
            status: evaluation.status_or(GateStatus::Failed),
            evaluation: Some(evaluation),
            error: None,
        },
        Err(error) => {
            tracing::warn!("Gate status check failed: {error}");
            StatusCheck {
                status: GateStatus::Failed,
                evaluation: None,
                error: Some(error),
            }
        }
    }
}
