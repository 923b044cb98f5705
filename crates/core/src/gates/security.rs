//! Security gate.
//!
//! Scores the output of three scanners: Bandit (static analysis), Safety
//! (dependency advisories) and Semgrep (pattern rules). Each scanner yields
//! a score out of 100; the gate score is their mean over all three, so a
//! scanner that did not run pulls the average down.

use super::scan::{expect_object, findings, read_report, ScanReportError, ScanResult};
use qg_protocol::config_models::GateThresholds;
use qg_protocol::evaluation_models::SecurityEvaluation;
use serde_json::Value;
use std::path::Path;

pub const BANDIT_REPORT: &str = "bandit-report.json";
pub const SAFETY_REPORT: &str = "safety-report.json";
pub const SEMGREP_REPORT: &str = "semgrep-report.json";

const SCANNER_COUNT: f64 = 3.0;

/// Credit given to a scanner whose report exists but cannot be scored.
const UNREADABLE_REPORT_SCORE: f64 = 50.0;

/// Score and findings attributed to a single scanner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScannerScore {
    pub score: f64,
    pub vulnerabilities: u32,
}

/// Bandit: high severity findings cost 20 points, medium cost 10.
pub fn score_bandit(report: &Value, path: &Path) -> ScanResult<ScannerScore> {
    let results = findings(expect_object(report, path)?, "results", path)?;

    let count_severity = |severity: &str| {
        results
            .iter()
            .filter(|f| f.get("issue_severity").and_then(Value::as_str) == Some(severity))
            .count() as u32
    };
    let high = count_severity("HIGH");
    let medium = count_severity("MEDIUM");

    Ok(ScannerScore {
        score: penalised(f64::from(high) * 20.0 + f64::from(medium) * 10.0),
        vulnerabilities: high + medium,
    })
}

/// Safety: every reported advisory costs 15 points.
///
/// Accepts both the legacy top-level array and the newer object form with
/// a `vulnerabilities` array. Anything else counts as clean.
pub fn score_safety(report: &Value) -> ScannerScore {
    let advisories = match report {
        Value::Array(entries) => entries.len(),
        Value::Object(map) => map
            .get("vulnerabilities")
            .and_then(Value::as_array)
            .map_or(0, Vec::len),
        _ => 0,
    } as u32;

    ScannerScore {
        score: penalised(f64::from(advisories) * 15.0),
        vulnerabilities: advisories,
    }
}

/// Semgrep: every `ERROR` severity finding costs 25 points.
pub fn score_semgrep(report: &Value, path: &Path) -> ScanResult<ScannerScore> {
    let results = findings(expect_object(report, path)?, "results", path)?;
    let critical = results
        .iter()
        .filter(|f| f.pointer("/extra/severity").and_then(Value::as_str) == Some("ERROR"))
        .count() as u32;

    Ok(ScannerScore {
        score: penalised(f64::from(critical) * 25.0),
        vulnerabilities: critical,
    })
}

fn penalised(penalty: f64) -> f64 {
    (100.0 - penalty).max(0.0)
}

/// Evaluates the security gate from the reports in `dir`.
pub async fn evaluate_security(dir: &Path, thresholds: &GateThresholds) -> SecurityEvaluation {
    let bandit_path = dir.join(BANDIT_REPORT);
    let safety_path = dir.join(SAFETY_REPORT);
    let semgrep_path = dir.join(SEMGREP_REPORT);

    let scores = [
        scanner_score(&bandit_path, |report| score_bandit(report, &bandit_path)).await,
        scanner_score(&safety_path, |report| Ok(score_safety(report))).await,
        scanner_score(&semgrep_path, |report| score_semgrep(report, &semgrep_path)).await,
    ];

    let total: f64 = scores.iter().flatten().map(|s| s.score).sum();
    let vulnerability_count: u32 = scores.iter().flatten().map(|s| s.vulnerabilities).sum();
    let security_score = total / SCANNER_COUNT;

    SecurityEvaluation {
        security_score,
        vulnerability_count,
        passed: security_score >= thresholds.security_score_threshold
            && vulnerability_count <= thresholds.vulnerability_count_limit,
    }
}

/// Scores one scanner report. `None` when the scanner produced no report.
async fn scanner_score<F>(path: &Path, score: F) -> Option<ScannerScore>
where
    F: FnOnce(&Value) -> ScanResult<ScannerScore>,
{
    let scored = match read_report(path).await {
        Ok(None) => return None,
        Ok(Some(report)) => score(&report),
        Err(e) => Err(e),
    };

    Some(scored.unwrap_or_else(|e: ScanReportError| {
        tracing::warn!("Could not score security report: {e}");
        ScannerScore {
            score: UNREADABLE_REPORT_SCORE,
            vulnerabilities: 0,
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_score_bandit_counts_high_and_medium() {
        let report = json!({
            "results": [
                {"issue_severity": "HIGH"},
                {"issue_severity": "MEDIUM"},
                {"issue_severity": "MEDIUM"},
                {"issue_severity": "LOW"}
            ]
        });

        let score = score_bandit(&report, Path::new(BANDIT_REPORT)).unwrap();
        assert_eq!(score.score, 60.0);
        assert_eq!(score.vulnerabilities, 3);
    }

    #[test]
    fn test_score_bandit_floors_at_zero() {
        let findings: Vec<Value> = (0..6).map(|_| json!({"issue_severity": "HIGH"})).collect();
        let score = score_bandit(&json!({ "results": findings }), Path::new(BANDIT_REPORT)).unwrap();
        assert_eq!(score.score, 0.0);
        assert_eq!(score.vulnerabilities, 6);
    }

    #[test]
    fn test_score_bandit_rejects_non_object() {
        let result = score_bandit(&json!([1, 2]), Path::new(BANDIT_REPORT));
        assert!(matches!(result, Err(ScanReportError::Shape { .. })));
    }

    #[test]
    fn test_results_must_be_an_array_of_objects() {
        let not_array = json!({"results": {"a": 1}});
        assert!(matches!(
            score_bandit(&not_array, Path::new(BANDIT_REPORT)),
            Err(ScanReportError::Shape { .. })
        ));
        assert!(matches!(
            score_semgrep(&not_array, Path::new(SEMGREP_REPORT)),
            Err(ScanReportError::Shape { .. })
        ));

        let bad_entry = json!({"results": [{"issue_severity": "HIGH"}, "HIGH"]});
        assert!(matches!(
            score_bandit(&bad_entry, Path::new(BANDIT_REPORT)),
            Err(ScanReportError::Shape { .. })
        ));
        assert!(matches!(
            score_semgrep(&json!({"results": [42]}), Path::new(SEMGREP_REPORT)),
            Err(ScanReportError::Shape { .. })
        ));
    }

    #[test]
    fn test_missing_results_is_clean() {
        let score = score_bandit(&json!({"errors": []}), Path::new(BANDIT_REPORT)).unwrap();
        assert_eq!(score.score, 100.0);
    }

    #[tokio::test]
    async fn test_evaluate_security_misshapen_results_get_partial_credit() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(BANDIT_REPORT), r#"{"results": {"a": 1}}"#).unwrap();
        fs::write(dir.path().join(SAFETY_REPORT), "[]").unwrap();
        fs::write(dir.path().join(SEMGREP_REPORT), r#"{"results": ["ERROR"]}"#).unwrap();

        let result = evaluate_security(dir.path(), &GateThresholds::default()).await;

        assert_eq!(result.security_score, 200.0 / 3.0);
        assert!(!result.passed);
    }

    #[test]
    fn test_score_safety_shapes() {
        assert_eq!(score_safety(&json!([{}, {}])).vulnerabilities, 2);
        assert_eq!(score_safety(&json!([{}, {}])).score, 70.0);
        assert_eq!(
            score_safety(&json!({"vulnerabilities": [{}]})).vulnerabilities,
            1
        );
        assert_eq!(score_safety(&json!({"report_meta": {}})).score, 100.0);
    }

    #[test]
    fn test_score_semgrep_only_counts_errors() {
        let report = json!({
            "results": [
                {"extra": {"severity": "ERROR"}},
                {"extra": {"severity": "WARNING"}},
                {"check_id": "no-extra"}
            ]
        });

        let score = score_semgrep(&report, Path::new(SEMGREP_REPORT)).unwrap();
        assert_eq!(score.score, 75.0);
        assert_eq!(score.vulnerabilities, 1);
    }

    #[tokio::test]
    async fn test_evaluate_security_clean_reports_pass() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(BANDIT_REPORT), r#"{"results": []}"#).unwrap();
        fs::write(dir.path().join(SAFETY_REPORT), "[]").unwrap();
        fs::write(dir.path().join(SEMGREP_REPORT), r#"{"results": []}"#).unwrap();

        let result = evaluate_security(dir.path(), &GateThresholds::default()).await;

        assert_eq!(result.security_score, 100.0);
        assert_eq!(result.vulnerability_count, 0);
        assert!(result.passed);
    }

    #[tokio::test]
    async fn test_evaluate_security_missing_scanner_lowers_average() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(BANDIT_REPORT), r#"{"results": []}"#).unwrap();
        fs::write(dir.path().join(SAFETY_REPORT), "[]").unwrap();

        let result = evaluate_security(dir.path(), &GateThresholds::default()).await;

        assert!((result.security_score - 200.0 / 3.0).abs() < 1e-9);
        assert!(!result.passed);
    }

    #[tokio::test]
    async fn test_evaluate_security_unparseable_report_gets_partial_credit() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(BANDIT_REPORT), "<<not json>>").unwrap();
        fs::write(dir.path().join(SAFETY_REPORT), "[]").unwrap();
        fs::write(dir.path().join(SEMGREP_REPORT), r#"{"results": []}"#).unwrap();

        let result = evaluate_security(dir.path(), &GateThresholds::default()).await;

        assert_eq!(result.security_score, 250.0 / 3.0);
        assert_eq!(result.vulnerability_count, 0);
    }

    #[tokio::test]
    async fn test_evaluate_security_vulnerability_limit() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(BANDIT_REPORT), r#"{"results": []}"#).unwrap();
        fs::write(dir.path().join(SAFETY_REPORT), "[{}]").unwrap();
        fs::write(dir.path().join(SEMGREP_REPORT), r#"{"results": []}"#).unwrap();

        // 285 / 3 = 95 clears the score threshold, but one advisory is over
        // the default limit of zero.
        let strict = evaluate_security(dir.path(), &GateThresholds::default()).await;
        assert_eq!(strict.security_score, 95.0);
        assert!(!strict.passed);

        let lenient = GateThresholds {
            vulnerability_count_limit: 1,
            ..GateThresholds::default()
        };
        assert!(evaluate_security(dir.path(), &lenient).await.passed);
    }

    #[tokio::test]
    async fn test_evaluate_security_no_reports() {
        let dir = tempdir().unwrap();
        let result = evaluate_security(dir.path(), &GateThresholds::default()).await;
        assert_eq!(result.security_score, 0.0);
        assert!(!result.passed);
    }
}
