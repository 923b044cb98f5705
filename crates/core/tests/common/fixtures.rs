//! Test fixtures for scanner output and template trees.

use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Compliance frameworks covered by the default configuration.
pub const FRAMEWORKS: [&str; 4] = ["gdpr", "hipaa", "soc2", "iso27001"];

/// Create a `qa-results/` tree in which every gate passes.
///
/// ```text
/// qa-results/
/// ├── security/     bandit, safety and semgrep reports, all clean
/// ├── compliance/   one PASSED report per default framework
/// ├── quality/      complexity 2, debt 90, coverage 92.5
/// └── performance/  200 ms, 128 MB, Lighthouse 95
/// ```
///
/// Returns a TempDir that must be kept alive for the test duration.
#[allow(dead_code)]
pub fn create_passing_results() -> std::io::Result<TempDir> {
    let temp_dir = tempfile::tempdir()?;
    let results = temp_dir.path().join("qa-results");

    write_security(&results.join("security"), &[], 0, 0)?;

    let compliance = results.join("compliance");
    fs::create_dir_all(&compliance)?;
    for framework in FRAMEWORKS {
        fs::write(
            compliance.join(format!("{framework}-compliance.json")),
            r#"{"framework": "audit", "status": "PASSED"}"#,
        )?;
    }

    let quality = results.join("quality");
    fs::create_dir_all(quality.join("coverage"))?;
    fs::write(
        quality.join("complexity-report.json"),
        r#"{"averageComplexity": 2, "files": 41}"#,
    )?;
    fs::write(quality.join("technical-debt.json"), r#"{"debt_score": 90}"#)?;
    fs::write(
        quality.join("coverage/coverage-summary.json"),
        r#"{"total": {"lines": {"total": 400, "covered": 370, "pct": 92.5}}}"#,
    )?;

    let performance = results.join("performance");
    fs::create_dir_all(&performance)?;
    fs::write(
        performance.join("performance-baseline.json"),
        r#"{"avg_response_time": 200, "peak_memory_mb": 128, "lighthouse_performance": 95}"#,
    )?;

    Ok(temp_dir)
}

/// Overwrite the security reports under `dir`.
///
/// `bandit` lists issue severities; `safety` and `semgrep_errors` are the
/// number of vulnerable packages and ERROR findings.
#[allow(dead_code)]
pub fn write_security(
    dir: &Path,
    bandit: &[&str],
    safety: usize,
    semgrep_errors: usize,
) -> std::io::Result<()> {
    fs::create_dir_all(dir)?;

    let bandit_results: Vec<_> = bandit
        .iter()
        .map(|severity| serde_json::json!({"issue_severity": severity, "test_id": "B101"}))
        .collect();
    fs::write(
        dir.join("bandit-report.json"),
        serde_json::json!({"results": bandit_results}).to_string(),
    )?;

    let safety_entries: Vec<_> = (0..safety)
        .map(|i| serde_json::json!(["package", "<1.0", format!("1.{i}"), "advisory", i]))
        .collect();
    fs::write(
        dir.join("safety-report.json"),
        serde_json::Value::Array(safety_entries).to_string(),
    )?;

    let semgrep_results: Vec<_> = (0..semgrep_errors)
        .map(|_| serde_json::json!({"check_id": "rule", "extra": {"severity": "ERROR"}}))
        .collect();
    fs::write(
        dir.join("semgrep-report.json"),
        serde_json::json!({"results": semgrep_results}).to_string(),
    )?;

    Ok(())
}

/// Create a nested QA template tree under `root`.
///
/// Returns the number of templates written.
#[allow(dead_code)]
pub fn create_template_tree(root: &Path) -> std::io::Result<usize> {
    fs::create_dir_all(root.join("web/api"))?;
    fs::create_dir_all(root.join("data"))?;

    fs::write(
        root.join("web/api/rest-service.md"),
        "---\nname: rest-service\nversion: \"2.0\"\n---\n# REST service\n\n- [x] Auth reviewed\n- [x] Rate limits\n- [ ] Load test\n",
    )?;
    fs::write(root.join("web/landing.md"), "# Landing page\n")?;
    fs::write(
        root.join("data/etl.md"),
        "# ETL\n\n```markdown\n- [ ] example only\n```\n- [ ] Lineage documented\n",
    )?;
    fs::write(root.join("data/schema.sql"), "create table t (id int);")?;

    Ok(3)
}
