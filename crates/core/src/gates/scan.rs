//! Reading scanner output files.
//!
//! Every gate consumes JSON written by an external tool. A missing file is
//! not an error (the scanner simply did not run); an unreadable or invalid
//! file is, and each gate decides how much credit that is worth.

use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while reading a scanner report.
#[derive(Error, Debug)]
pub enum ScanReportError {
    #[error("Failed to read report {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse report {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Valid JSON whose shape the gate cannot score.
    #[error("Unexpected structure in report {path}: {reason}")]
    Shape { path: PathBuf, reason: String },
}

pub type ScanResult<T> = Result<T, ScanReportError>;

/// Reads and parses a JSON report.
///
/// Returns `Ok(None)` when the file does not exist.
pub async fn read_report(path: &Path) -> ScanResult<Option<Value>> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "Report not found");
            return Ok(None);
        }
        Err(source) => {
            return Err(ScanReportError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    serde_json::from_str(&content)
        .map(Some)
        .map_err(|source| ScanReportError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

/// Reads an optional numeric field, using `default` when the key is absent.
///
/// A key that is present but not a number is a shape error.
pub(crate) fn number_or(
    report: &Value,
    key: &str,
    default: f64,
    path: &Path,
) -> ScanResult<f64> {
    match report.get(key) {
        None | Some(Value::Null) => Ok(default),
        Some(value) => value.as_f64().ok_or_else(|| ScanReportError::Shape {
            path: path.to_path_buf(),
            reason: format!("'{key}' is not a number"),
        }),
    }
}

/// Requires the report root to be a JSON object.
pub(crate) fn expect_object<'a>(report: &'a Value, path: &Path) -> ScanResult<&'a Value> {
    if report.is_object() {
        Ok(report)
    } else {
        Err(ScanReportError::Shape {
            path: path.to_path_buf(),
            reason: "expected a JSON object".to_string(),
        })
    }
}

/// Reads the findings array under `key`, empty when the key is absent.
///
/// A non-array value or a finding that is not an object is a shape error.
pub(crate) fn findings<'a>(report: &'a Value, key: &str, path: &Path) -> ScanResult<&'a [Value]> {
    let entries = match report.get(key) {
        None | Some(Value::Null) => return Ok(&[]),
        Some(Value::Array(entries)) => entries,
        Some(_) => {
            return Err(ScanReportError::Shape {
                path: path.to_path_buf(),
                reason: format!("'{key}' is not an array"),
            })
        }
    };

    if let Some(index) = entries.iter().position(|entry| !entry.is_object()) {
        return Err(ScanReportError::Shape {
            path: path.to_path_buf(),
            reason: format!("'{key}[{index}]' is not an object"),
        });
    }
    Ok(entries)
}
