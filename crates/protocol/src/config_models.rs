//! Configuration models for `.qa-gates/config.toml`.
//!
//! This module defines the structure of the configuration file that
//! controls gate thresholds, the compliance frameworks checked and the
//! metadata stamped onto promotions.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Complete contents of `.qa-gates/config.toml`.
///
/// Every section is optional; missing sections take their defaults.
///
/// # Example
///
/// ```toml
/// # .qa-gates/config.toml
/// [thresholds]
/// security_score_threshold = 90.0
/// vulnerability_count_limit = 0
///
/// [compliance]
/// frameworks = ["gdpr", "soc2"]
///
/// [promotion]
/// target_stage = "testing"
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, TS)]
#[serde(default)]
pub struct GatesConfig {
    /// Numeric gate thresholds.
    pub thresholds: GateThresholds,

    /// Compliance frameworks to check.
    pub compliance: ComplianceConfig,

    /// Stage names and metadata used when promoting templates.
    pub promotion: PromotionConfig,
}

/// Thresholds each evaluation area is held to.
///
/// These are also recorded verbatim in every evaluation document under
/// the `quality_gates` key.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
#[serde(default)]
pub struct GateThresholds {
    /// Minimum averaged security score (percent).
    pub security_score_threshold: f64,

    /// Minimum share of compliance frameworks that must pass (percent).
    pub compliance_pass_rate: f64,

    /// Minimum code quality score (percent).
    pub code_quality_score: f64,

    /// Whether the performance baseline must be met for the performance
    /// gate to pass. When false, performance is reported but never blocks.
    pub performance_baseline_met: bool,

    /// Maximum number of vulnerabilities tolerated across all scanners.
    pub vulnerability_count_limit: u32,

    /// Minimum line coverage (percent).
    pub test_coverage_minimum: f64,

    /// Score at or above which the performance baseline counts as met.
    pub performance_baseline_score: f64,
}

impl Default for GateThresholds {
    fn default() -> Self {
        Self {
            security_score_threshold: 90.0,
            compliance_pass_rate: 100.0,
            code_quality_score: 85.0,
            performance_baseline_met: true,
            vulnerability_count_limit: 0,
            test_coverage_minimum: 80.0,
            performance_baseline_score: 75.0,
        }
    }
}

/// Compliance frameworks evaluated by the compliance gate.
///
/// Each framework `name` is looked up as `<name>-compliance.json` in the
/// compliance results directory.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
#[serde(default)]
pub struct ComplianceConfig {
    pub frameworks: Vec<String>,
}

impl Default for ComplianceConfig {
    fn default() -> Self {
        Self {
            frameworks: ["gdpr", "hipaa", "soc2", "iso27001"]
                .iter()
                .map(|name| (*name).to_string())
                .collect(),
        }
    }
}

/// Settings for promotion reports and template promotion.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
#[serde(default)]
pub struct PromotionConfig {
    /// Stage templates are promoted from.
    pub source_stage: String,

    /// Stage templates are promoted to.
    pub target_stage: String,

    /// Version of the overall template pipeline.
    pub pipeline_version: String,

    /// Version of the QA stage tooling.
    pub stage_version: String,

    /// Label recorded as the validation framework in reports.
    pub validation_framework: String,

    /// File extension (without dot) identifying template files.
    pub template_extension: String,

    /// Requirements the next stage imposes, recorded on reports and
    /// template metadata.
    pub next_stage: StageRequirements,
}

impl Default for PromotionConfig {
    fn default() -> Self {
        Self {
            source_stage: "qa".to_string(),
            target_stage: "testing".to_string(),
            pipeline_version: "3.0.0".to_string(),
            stage_version: "2.0.0".to_string(),
            validation_framework: "Enterprise QA Gates".to_string(),
            template_extension: "md".to_string(),
            next_stage: StageRequirements::default(),
        }
    }
}

/// Requirements a promoted template must satisfy in the next stage.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
#[serde(default)]
pub struct StageRequirements {
    pub ultra_strict_validation: bool,

    /// Required accuracy in the next stage (percent).
    pub accuracy_threshold: f64,

    pub comprehensive_testing: bool,
    pub performance_benchmarking: bool,
    pub security_certification_required: bool,
}

impl Default for StageRequirements {
    fn default() -> Self {
        Self {
            ultra_strict_validation: true,
            accuracy_threshold: 99.9999,
            comprehensive_testing: true,
            performance_benchmarking: true,
            security_certification_required: true,
        }
    }
}
