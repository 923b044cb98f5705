//! Compliance gate.
//!
//! Each configured framework is checked through `<framework>-compliance.json`.
//! A framework passes when its report says `"status": "PASSED"` or
//! `"compliant": true`; a missing or unreadable report does not pass.

use super::scan::{read_report, ScanReportError};
use qg_protocol::config_models::GateThresholds;
use qg_protocol::evaluation_models::ComplianceEvaluation;
use serde_json::Value;
use std::path::Path;

/// File name of the report for `framework`.
pub fn report_file_name(framework: &str) -> String {
    format!("{framework}-compliance.json")
}

/// Whether a parsed compliance report records a pass.
pub fn report_passes(report: &Value) -> bool {
    report.get("status").and_then(Value::as_str) == Some("PASSED")
        || report.get("compliant").and_then(Value::as_bool) == Some(true)
}

/// Evaluates the compliance gate for `frameworks` using the reports in `dir`.
pub async fn evaluate_compliance(
    dir: &Path,
    frameworks: &[String],
    thresholds: &GateThresholds,
) -> ComplianceEvaluation {
    let mut passed_checks = 0u32;

    for framework in frameworks {
        let path = dir.join(report_file_name(framework));
        if framework_passes(&path).await {
            passed_checks += 1;
        }
    }

    let total_checks = frameworks.len() as u32;
    let compliance_pass_rate = if total_checks > 0 {
        f64::from(passed_checks) / f64::from(total_checks) * 100.0
    } else {
        0.0
    };

    ComplianceEvaluation {
        compliance_pass_rate,
        passed_checks,
        total_checks,
        passed: compliance_pass_rate >= thresholds.compliance_pass_rate,
    }
}

async fn framework_passes(path: &Path) -> bool {
    match read_report(path).await {
        Ok(Some(report)) if report.is_object() => report_passes(&report),
        Ok(Some(_)) => {
            let e = ScanReportError::Shape {
                path: path.to_path_buf(),
                reason: "expected a JSON object".to_string(),
            };
            tracing::warn!("Could not evaluate compliance report: {e}");
            false
        }
        Ok(None) => {
            tracing::warn!(path = %path.display(), "Compliance report not found");
            false
        }
        Err(e) => {
            tracing::warn!("Could not evaluate compliance report: {e}");
            false
        }
    }
}
