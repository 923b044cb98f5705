//! Quality gate evaluation.
//!
//! The [`QualityGateEvaluator`] scores four areas from scanner output and
//! combines them into a [`GateEvaluation`]. Area evaluation never fails:
//! unreadable scanner files degrade to partial scores and are logged.
//!
//! - [`security`]: Bandit, Safety and Semgrep reports
//! - [`compliance`]: one report per compliance framework
//! - [`quality`]: complexity, technical debt and coverage
//! - [`performance`]: response time, memory and Lighthouse baseline

pub mod compliance;
pub mod performance;
pub mod quality;
pub mod scan;
pub mod security;

use crate::timestamp_now;
use qg_protocol::config_models::{GateThresholds, GatesConfig};
use qg_protocol::evaluation_models::GateEvaluation;
use qg_protocol::status::GateStatus;
use std::path::{Path, PathBuf};

/// Directories holding each area's scanner output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultDirs {
    pub security: PathBuf,
    pub compliance: PathBuf,
    pub quality: PathBuf,
    pub performance: PathBuf,
}

impl ResultDirs {
    /// Conventional layout: one subdirectory per area under `root`.
    pub fn under(root: &Path) -> Self {
        Self {
            security: root.join("security"),
            compliance: root.join("compliance"),
            quality: root.join("quality"),
            performance: root.join("performance"),
        }
    }
}

/// Evaluates scanner output against configured thresholds.
#[derive(Debug, Clone)]
pub struct QualityGateEvaluator {
    thresholds: GateThresholds,
    frameworks: Vec<String>,
}

impl QualityGateEvaluator {
    pub fn new(config: &GatesConfig) -> Self {
        Self {
            thresholds: config.thresholds.clone(),
            frameworks: config.compliance.frameworks.clone(),
        }
    }

    pub fn thresholds(&self) -> &GateThresholds {
        &self.thresholds
    }

    /// Evaluate all four areas and derive the overall status.
    ///
    /// Areas are evaluated concurrently. The overall status is `PASSED`
    /// only when every area passed.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use qg_core::gates::{QualityGateEvaluator, ResultDirs};
    /// use qg_protocol::config_models::GatesConfig;
    /// use std::path::Path;
    ///
    /// # async fn example() {
    /// let evaluator = QualityGateEvaluator::new(&GatesConfig::default());
    /// let evaluation = evaluator.evaluate(&ResultDirs::under(Path::new("qa-results"))).await;
    /// println!("{:?}", evaluation.overall_status);
    /// # }
    /// ```
    pub async fn evaluate(&self, dirs: &ResultDirs) -> GateEvaluation {
        tracing::info!("Evaluating QA quality gates");

        let (security, compliance, quality, performance) = tokio::join!(
            security::evaluate_security(&dirs.security, &self.thresholds),
            compliance::evaluate_compliance(&dirs.compliance, &self.frameworks, &self.thresholds),
            quality::evaluate_quality(&dirs.quality, &self.thresholds),
            performance::evaluate_performance(&dirs.performance, &self.thresholds),
        );

        let all_passed =
            security.passed && compliance.passed && quality.passed && performance.passed;
        let overall_status = GateStatus::from_passed(all_passed);

        tracing::info!(
            security = security.passed,
            compliance = compliance.passed,
            quality = quality.passed,
            performance = performance.passed,
            %overall_status,
            "Quality gate evaluation finished"
        );

        GateEvaluation {
            security: Some(security),
            compliance: Some(compliance),
            quality: Some(quality),
            performance: Some(performance),
            overall_status: Some(overall_status),
            timestamp: timestamp_now(),
            quality_gates: self.thresholds.clone(),
        }
    }
}
