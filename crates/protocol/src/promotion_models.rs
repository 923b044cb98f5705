//! Promotion documents.
//!
//! This module defines the JSON documents produced when a QA evaluation
//! is turned into a promotion decision:
//! - [`PromotionDocument`]: the report written by `qa-gates report`
//! - [`TemplateMetadata`]: the sidecar written next to each promoted template
//! - [`PromotionSummary`]: `promotion_summary.json` in the target stage

use crate::config_models::StageRequirements;
use crate::evaluation_models::GateEvaluation;
use crate::status::GateStatus;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Top-level promotion report document.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
pub struct PromotionDocument {
    pub promotion_report: PromotionReport,
    pub promotion_metadata: PromotionMetadata,
}

/// Promotion decision and the evidence it was based on.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
pub struct PromotionReport {
    pub timestamp: String,
    pub source_stage: String,
    pub target_stage: String,

    /// Status requested by the caller, normally the status check result.
    pub promotion_status: GateStatus,

    /// Overall status recorded in the evaluation, `UNKNOWN` if unreadable.
    pub qa_validation_summary: GateStatus,

    pub detailed_scores: DetailedScores,
    pub security_validation: SecurityValidation,
    pub compliance_validation: ComplianceValidation,
    pub next_stage_requirements: StageRequirements,
    pub recommendation: String,
    pub action_taken: String,
}

/// Headline score of each gate area.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, TS)]
pub struct DetailedScores {
    pub security_score: f64,
    pub compliance_pass_rate: f64,
    pub quality_score: f64,
    pub performance_score: f64,
}

impl DetailedScores {
    pub fn from_evaluation(evaluation: &GateEvaluation) -> Self {
        Self {
            security_score: evaluation.security_score(),
            compliance_pass_rate: evaluation.compliance_pass_rate(),
            quality_score: evaluation.quality_score(),
            performance_score: evaluation.performance_score(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, TS)]
pub struct SecurityValidation {
    pub vulnerability_count: u32,
    pub security_certified: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, TS)]
pub struct ComplianceValidation {
    pub passed_checks: u32,
    pub total_checks: u32,
    pub compliance_validated: bool,
}

/// Pipeline provenance stamped onto every report.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
pub struct PromotionMetadata {
    pub pipeline_version: String,
    pub qa_stage_version: String,
    pub validation_framework: String,
    pub promotion_automation: bool,
    pub quality_gates_enforced: bool,
}

/// Gate scores copied onto a promoted template's metadata.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
pub struct QaValidation {
    pub security_score: f64,
    pub compliance_pass_rate: f64,
    pub quality_score: f64,
    pub performance_score: f64,
    pub overall_status: GateStatus,
}

/// Checklist progress found in a template.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, TS)]
pub struct ChecklistCounts {
    pub total: usize,
    pub completed: usize,
}

/// Sidecar metadata written as `<template-stem>.json` beside each
/// promoted template.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
pub struct TemplateMetadata {
    /// Front matter `name` when present, otherwise the file stem.
    pub template_name: String,

    /// Front matter `version`, if the template declares one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_version: Option<String>,

    pub original_file: String,
    pub promoted_from: String,
    pub promotion_timestamp: String,
    pub qa_validation: QaValidation,
    pub checklist: ChecklistCounts,
    pub testing_stage_requirements: StageRequirements,
}

/// One successfully promoted template.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
pub struct PromotedTemplate {
    pub name: String,
    pub source_path: String,
    pub target_path: String,
    pub size_bytes: u64,
}

/// `promotion_summary.json`, written into the target stage directory.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
pub struct PromotionSummary {
    /// Unique identifier for this promotion run.
    #[ts(type = "string")]
    pub promotion_id: Uuid,

    pub promotion_timestamp: String,
    pub source_stage: String,
    pub target_stage: String,
    pub promoted_templates: Vec<PromotedTemplate>,

    /// The full evaluation the promotion was authorised by.
    pub qa_validation_summary: GateEvaluation,

    pub total_templates: usize,
    pub successfully_promoted: usize,
}

impl PromotionSummary {
    /// Promoted share of discovered templates (percent).
    pub fn success_rate(&self) -> f64 {
        if self.total_templates == 0 {
            return 0.0;
        }
        self.successfully_promoted as f64 / self.total_templates as f64 * 100.0
    }

    pub fn all_promoted(&self) -> bool {
        self.total_templates > 0 && self.successfully_promoted == self.total_templates
    }
}
