//! Code quality gate.
//!
//! Combines a complexity report, a technical debt report and a coverage
//! summary:
//! - `complexity-report.json`: `averageComplexity`, each point costs 5
//! - `technical-debt.json`: `debt_score`, used as-is
//! - `coverage/*summary*`: `total.lines.pct` from the first summary file

use super::scan::{expect_object, number_or, read_report, ScanResult};
use qg_protocol::config_models::GateThresholds;
use qg_protocol::evaluation_models::QualityEvaluation;
use serde_json::Value;
use std::path::{Path, PathBuf};

pub const COMPLEXITY_REPORT: &str = "complexity-report.json";
pub const DEBT_REPORT: &str = "technical-debt.json";
pub const COVERAGE_DIR: &str = "coverage";

const DEFAULT_COMPLEXITY: f64 = 10.0;
const DEFAULT_DEBT_SCORE: f64 = 80.0;
const DEFAULT_COVERAGE: f64 = 85.0;

/// Score used when neither complexity nor debt produced any points.
const DEFAULT_QUALITY_SCORE: f64 = 85.0;

/// Credit given to a report that exists but cannot be scored.
const UNREADABLE_REPORT_SCORE: f64 = 70.0;

/// Number of components the quality score is averaged over.
const QUALITY_COMPONENTS: f64 = 2.0;

pub fn score_complexity(report: &Value, path: &Path) -> ScanResult<f64> {
    let report = expect_object(report, path)?;
    let complexity = number_or(report, "averageComplexity", DEFAULT_COMPLEXITY, path)?;
    Ok((100.0 - complexity * 5.0).max(0.0))
}

pub fn score_debt(report: &Value, path: &Path) -> ScanResult<f64> {
    let report = expect_object(report, path)?;
    number_or(report, "debt_score", DEFAULT_DEBT_SCORE, path)
}

/// Line coverage from an Istanbul-style `coverage-summary.json`.
pub fn coverage_from_summary(summary: &Value) -> f64 {
    summary
        .pointer("/total/lines/pct")
        .and_then(Value::as_f64)
        .unwrap_or(DEFAULT_COVERAGE)
}

/// Evaluates the quality gate from the reports in `dir`.
pub async fn evaluate_quality(dir: &Path, thresholds: &GateThresholds) -> QualityEvaluation {
    let complexity_path = dir.join(COMPLEXITY_REPORT);
    let debt_path = dir.join(DEBT_REPORT);

    let complexity = component_score(&complexity_path, |r| score_complexity(r, &complexity_path)).await;
    let debt = component_score(&debt_path, |r| score_debt(r, &debt_path)).await;

    let total = complexity.unwrap_or(0.0) + debt.unwrap_or(0.0);
    let quality_score = if total > 0.0 {
        total / QUALITY_COMPONENTS
    } else {
        DEFAULT_QUALITY_SCORE
    };

    let coverage_score = coverage_score(&dir.join(COVERAGE_DIR)).await;

    QualityEvaluation {
        quality_score,
        coverage_score,
        passed: quality_score >= thresholds.code_quality_score
            && coverage_score >= thresholds.test_coverage_minimum,
    }
}

async fn component_score<F>(path: &Path, score: F) -> Option<f64>
where
    F: FnOnce(&Value) -> ScanResult<f64>,
{
    let scored = match read_report(path).await {
        Ok(None) => return None,
        Ok(Some(report)) => score(&report),
        Err(e) => Err(e),
    };

    Some(scored.unwrap_or_else(|e| {
        tracing::warn!("Could not score quality report: {e}");
        UNREADABLE_REPORT_SCORE
    }))
}

/// Reads coverage from the first `*summary*` file in `coverage_dir`.
///
/// A summary that fails to parse is skipped in favour of the next one; a
/// non-JSON summary ends the search with the default coverage.
async fn coverage_score(coverage_dir: &Path) -> f64 {
    for path in summary_files(coverage_dir).await {
        if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            break;
        }

        match read_report(&path).await {
            Ok(Some(summary)) => return coverage_from_summary(&summary),
            Ok(None) => continue,
            Err(e) => tracing::warn!("Could not parse coverage summary: {e}"),
        }
    }

    DEFAULT_COVERAGE
}

/// Files in `dir` whose name contains `summary`, sorted by name.
async fn summary_files(dir: &Path) -> Vec<PathBuf> {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(_) => return Vec::new(),
    };

    let mut files = Vec::new();
    while let Ok(Some(entry)) = entries.next_entry().await {
        let path = entry.path();
        let is_summary = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.contains("summary"));
        if is_summary && path.is_file() {
            files.push(path);
        }
    }

    files.sort();
    files
}
