//! # qg-core
//!
//! Quality gate evaluation and template promotion for qa-gates.
//!
//! This crate provides:
//! - Configuration loading from the `.qa-gates/` directory
//! - Scoring of security, compliance, quality and performance scanner output
//! - Status checks over stored evaluation documents
//! - Promotion reports and template promotion to the next stage
//! - Markdown checklist parsing
//!
//! ## Modules
//!
//! - [`config`]: Configuration loading and validation
//! - [`gates`]: Per-area gate evaluation and the combined evaluator
//! - [`evaluation`]: Reading, writing and status-checking evaluation documents
//! - [`promotion`]: Promotion reports and the template promoter
//! - [`checklist`]: Markdown task list parsing
//! - [`init`]: Starter `.qa-gates/` generation

pub mod checklist;
pub mod config;
pub mod evaluation;
pub mod gates;
pub mod init;
pub mod promotion;

/// Current local time in RFC 3339 form, as stamped onto documents.
pub(crate) fn timestamp_now() -> String {
    chrono::Local::now().to_rfc3339()
}

/// Writes `value` as pretty-printed JSON, creating parent directories.
pub(crate) async fn write_json<T: serde::Serialize>(
    path: &std::path::Path,
    value: &T,
) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    let json = serde_json::to_string_pretty(value).map_err(std::io::Error::other)?;
    tokio::fs::write(path, json).await
}
