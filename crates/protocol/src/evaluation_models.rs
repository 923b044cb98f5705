//! Gate evaluation documents.
//!
//! `qa-gates evaluate` writes a [`GateEvaluation`] as JSON; `status`,
//! `report` and `promote` read it back. Every field is optional on read
//! so documents produced by other tool versions remain usable.

use crate::config_models::GateThresholds;
use crate::status::GateStatus;
use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

/// Result of the security gate.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, TS)]
#[serde(default)]
pub struct SecurityEvaluation {
    /// Scanner scores averaged over all expected scanners (percent).
    pub security_score: f64,

    /// Vulnerabilities counted across every scanner.
    pub vulnerability_count: u32,

    pub passed: bool,
}

/// Result of the compliance gate.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, TS)]
#[serde(default)]
pub struct ComplianceEvaluation {
    /// Share of frameworks that passed (percent).
    pub compliance_pass_rate: f64,
    pub passed_checks: u32,
    pub total_checks: u32,
    pub passed: bool,
}

/// Result of the code quality gate.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, TS)]
#[serde(default)]
pub struct QualityEvaluation {
    pub quality_score: f64,

    /// Line coverage (percent).
    pub coverage_score: f64,

    pub passed: bool,
}

/// Result of the performance gate.
///
/// The measured fields are only present when a baseline file was read.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, TS)]
#[serde(default)]
pub struct PerformanceEvaluation {
    pub performance_score: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_usage_mb: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lighthouse_score: Option<f64>,

    pub baseline_met: bool,
    pub passed: bool,

    /// Explanation when the score is an assumed default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// A complete quality gate evaluation.
///
/// # Example
///
/// ```json
/// {
///   "security": {"security_score": 96.7, "vulnerability_count": 0, "passed": true},
///   "compliance": {"compliance_pass_rate": 100.0, "passed_checks": 4, "total_checks": 4, "passed": true},
///   "quality": {"quality_score": 87.5, "coverage_score": 91.2, "passed": true},
///   "performance": {"performance_score": 80.0, "baseline_met": true, "passed": true},
///   "overall_status": "PASSED",
///   "timestamp": "2026-10-18T09:30:00+00:00",
///   "quality_gates": {"security_score_threshold": 90.0}
/// }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, TS)]
#[serde(default)]
pub struct GateEvaluation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security: Option<SecurityEvaluation>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub compliance: Option<ComplianceEvaluation>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<QualityEvaluation>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance: Option<PerformanceEvaluation>,

    /// `None` only when reading a document that lacks the field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_status: Option<GateStatus>,

    #[serde(deserialize_with = "null_as_default")]
    pub timestamp: String,

    /// Thresholds the evaluation was performed against.
    #[serde(deserialize_with = "null_as_default")]
    pub quality_gates: GateThresholds,
}

/// Reads an explicit `null` as the field's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl GateEvaluation {
    /// The recorded overall status, or `fallback` when absent.
    pub fn status_or(&self, fallback: GateStatus) -> GateStatus {
        self.overall_status.unwrap_or(fallback)
    }

    /// True only when the document explicitly records `PASSED`.
    pub fn is_passed(&self) -> bool {
        self.overall_status.is_some_and(GateStatus::is_passed)
    }

    pub fn security_score(&self) -> f64 {
        self.security.as_ref().map_or(0.0, |s| s.security_score)
    }

    pub fn compliance_pass_rate(&self) -> f64 {
        self.compliance.as_ref().map_or(0.0, |c| c.compliance_pass_rate)
    }

    pub fn quality_score(&self) -> f64 {
        self.quality.as_ref().map_or(0.0, |q| q.quality_score)
    }

    pub fn performance_score(&self) -> f64 {
        self.performance.as_ref().map_or(0.0, |p| p.performance_score)
    }
}
