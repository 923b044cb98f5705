//! Promotion report generation.

use super::error::{PromotionError, PromotionResult};
use super::stage_title;
use crate::evaluation::load_evaluation;
use crate::{timestamp_now, write_json};
use qg_protocol::config_models::PromotionConfig;
use qg_protocol::evaluation_models::GateEvaluation;
use qg_protocol::promotion_models::{
    ComplianceValidation, DetailedScores, PromotionDocument, PromotionMetadata, PromotionReport,
    SecurityValidation,
};
use qg_protocol::status::GateStatus;
use std::path::Path;

/// Builds the promotion report for the evaluation at `evaluation_path`.
///
/// `status` is the decision being recorded, normally the result of the
/// status check. An unreadable evaluation is logged and treated as empty,
/// so its scores read as zero and its summary as `UNKNOWN`.
pub async fn create_promotion_report(
    evaluation_path: &Path,
    target_stage: &str,
    status: GateStatus,
    config: &PromotionConfig,
) -> PromotionDocument {
    let evaluation = match load_evaluation(evaluation_path).await {
        Ok(evaluation) => evaluation,
        Err(e) => {
            tracing::warn!("Error loading QA evaluation: {e}");
            GateEvaluation::default()
        }
    };

    let (recommendation, action_taken) = if status.is_passed() {
        let target = stage_title(target_stage);
        (
            format!("APPROVED - All QA quality gates passed, ready for {target} stage"),
            format!("Automatic promotion to {target} stage initiated"),
        )
    } else {
        (
            "REJECTED - QA quality gates failed, requires remediation".to_string(),
            "Promotion blocked, manual review required".to_string(),
        )
    };

    let security_validation = evaluation
        .security
        .as_ref()
        .map(|s| SecurityValidation {
            vulnerability_count: s.vulnerability_count,
            security_certified: s.passed,
        })
        .unwrap_or_default();

    let compliance_validation = evaluation
        .compliance
        .as_ref()
        .map(|c| ComplianceValidation {
            passed_checks: c.passed_checks,
            total_checks: c.total_checks,
            compliance_validated: c.passed,
        })
        .unwrap_or_default();

    PromotionDocument {
        promotion_report: PromotionReport {
            timestamp: timestamp_now(),
            source_stage: config.source_stage.clone(),
            target_stage: target_stage.to_string(),
            promotion_status: status,
            qa_validation_summary: evaluation.status_or(GateStatus::Unknown),
            detailed_scores: DetailedScores::from_evaluation(&evaluation),
            security_validation,
            compliance_validation,
            next_stage_requirements: config.next_stage.clone(),
            recommendation,
            action_taken,
        },
        promotion_metadata: PromotionMetadata {
            pipeline_version: config.pipeline_version.clone(),
            qa_stage_version: config.stage_version.clone(),
            validation_framework: config.validation_framework.clone(),
            promotion_automation: true,
            quality_gates_enforced: true,
        },
    }
}

/// Writes a promotion report as pretty JSON, creating parent directories.
pub async fn save_promotion_report(path: &Path, document: &PromotionDocument) -> PromotionResult<()> {
    write_json(path, document)
        .await
        .map_err(|source| PromotionError::Write {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::info!(path = %path.display(), "Saved promotion report");
    Ok(())
}
