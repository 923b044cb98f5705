//! Template promotion from one pipeline stage to the next.
//!
//! Promotion copies every template under the source stage directory into
//! the target stage, preserving relative paths, and stamps each copy with
//! a `<stem>.json` sidecar recording the QA scores it was promoted under.

use super::error::{PromotionError, PromotionResult};
use super::stage_title;
use crate::checklist::parse_checklist;
use crate::evaluation::load_evaluation;
use crate::init::templates::get_template;
use crate::{timestamp_now, write_json};
use gray_matter::engine::YAML;
use gray_matter::Matter;
use qg_protocol::config_models::PromotionConfig;
use qg_protocol::evaluation_models::GateEvaluation;
use qg_protocol::promotion_models::{
    PromotedTemplate, PromotionSummary, QaValidation, TemplateMetadata,
};
use qg_protocol::status::GateStatus;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use uuid::Uuid;
use walkdir::WalkDir;

const SUMMARY_FILE: &str = "promotion_summary.json";
const README_FILE: &str = "README.md";
const README_TEMPLATE: &str = "stage/README.md";

/// Result of a promotion run that got as far as copying templates.
#[derive(Debug, Clone)]
pub struct PromotionOutcome {
    pub summary: PromotionSummary,
    pub summary_path: PathBuf,

    /// Stage README, written only when every template was promoted.
    pub readme_path: Option<PathBuf>,
}

impl PromotionOutcome {
    pub fn success(&self) -> bool {
        self.summary.all_promoted()
    }
}

/// Front matter fields copied onto template metadata.
#[derive(Debug, Default, Deserialize)]
struct TemplateFrontMatter {
    name: Option<String>,
    version: Option<serde_json::Value>,
}

/// Promotes QA-validated templates to the configured target stage.
#[derive(Debug, Clone)]
pub struct TemplatePromoter {
    config: PromotionConfig,
}

impl TemplatePromoter {
    pub fn new(config: PromotionConfig) -> Self {
        Self { config }
    }

    /// Promote every template under `source_dir` into `target_dir`.
    ///
    /// Nothing is written unless the evaluation at `qa_results` is
    /// `PASSED` and at least one template exists. Individual copy failures
    /// are logged and counted; check [`PromotionOutcome::success`].
    ///
    /// # Errors
    ///
    /// - `Evaluation` if the QA results cannot be loaded
    /// - `GatesNotPassed` if the QA results did not pass
    /// - `NoTemplates` if `source_dir` holds no templates
    /// - `DirectoryWalk` if `source_dir` cannot be traversed
    /// - `Write` if the promotion summary or README cannot be written
    pub async fn promote(
        &self,
        source_dir: &Path,
        target_dir: &Path,
        qa_results: &Path,
    ) -> PromotionResult<PromotionOutcome> {
        let evaluation = load_evaluation(qa_results).await?;

        let status = evaluation.status_or(GateStatus::Unknown);
        if !status.is_passed() {
            return Err(PromotionError::GatesNotPassed(status));
        }

        let templates = self.find_templates(source_dir)?;
        if templates.is_empty() {
            return Err(PromotionError::NoTemplates(source_dir.to_path_buf()));
        }

        tracing::info!(
            source = %source_dir.display(),
            target = %target_dir.display(),
            count = templates.len(),
            "Promoting templates from {} to {}",
            self.config.source_stage,
            self.config.target_stage
        );

        let promotion_timestamp = timestamp_now();
        let qa_validation = QaValidation {
            security_score: evaluation.security_score(),
            compliance_pass_rate: evaluation.compliance_pass_rate(),
            quality_score: evaluation.quality_score(),
            performance_score: evaluation.performance_score(),
            overall_status: status,
        };

        let mut promoted = Vec::with_capacity(templates.len());
        for source_path in &templates {
            let relative = source_path.strip_prefix(source_dir).unwrap_or(source_path);
            let target_path = target_dir.join(relative);

            match self
                .copy_with_metadata(source_path, &target_path, &promotion_timestamp, &qa_validation)
                .await
            {
                Ok(size_bytes) => {
                    tracing::debug!(template = %source_path.display(), "Promoted template");
                    promoted.push(PromotedTemplate {
                        name: file_stem(source_path),
                        source_path: source_path.display().to_string(),
                        target_path: target_path.display().to_string(),
                        size_bytes,
                    });
                }
                Err(e) => {
                    tracing::warn!(template = %source_path.display(), "Failed to promote: {e}");
                }
            }
        }

        let summary = PromotionSummary {
            promotion_id: Uuid::new_v4(),
            promotion_timestamp,
            source_stage: self.config.source_stage.clone(),
            target_stage: self.config.target_stage.clone(),
            successfully_promoted: promoted.len(),
            promoted_templates: promoted,
            qa_validation_summary: evaluation,
            total_templates: templates.len(),
        };

        let summary_path = target_dir.join(SUMMARY_FILE);
        write_json(&summary_path, &summary)
            .await
            .map_err(|source| PromotionError::Write {
                path: summary_path.clone(),
                source,
            })?;

        let readme_path = if summary.all_promoted() {
            Some(self.write_stage_readme(target_dir, &summary).await?)
        } else {
            None
        };

        tracing::info!(
            total = summary.total_templates,
            promoted = summary.successfully_promoted,
            "Promotion finished"
        );

        Ok(PromotionOutcome {
            summary,
            summary_path,
            readme_path,
        })
    }

    /// Every file with the template extension under `source_dir`, sorted.
    fn find_templates(&self, source_dir: &Path) -> PromotionResult<Vec<PathBuf>> {
        if !source_dir.exists() {
            return Ok(Vec::new());
        }

        let mut templates = Vec::new();
        for entry in WalkDir::new(source_dir).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|source| PromotionError::DirectoryWalk {
                path: source_dir.to_path_buf(),
                source,
            })?;

            let path = entry.path();
            if entry.file_type().is_file()
                && path.extension().and_then(|s| s.to_str())
                    == Some(self.config.template_extension.as_str())
            {
                templates.push(path.to_path_buf());
            }
        }
        templates.sort();
        Ok(templates)
    }

    /// Copies one template and writes its metadata sidecar.
    ///
    /// Returns the size of the source template in bytes.
    async fn copy_with_metadata(
        &self,
        source_path: &Path,
        target_path: &Path,
        promotion_timestamp: &str,
        qa_validation: &QaValidation,
    ) -> std::io::Result<u64> {
        if let Some(parent) = target_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let size_bytes = tokio::fs::copy(source_path, target_path).await?;

        // Templates are copied verbatim; only the metadata scan decodes them
        let bytes = tokio::fs::read(source_path).await?;
        let content = String::from_utf8_lossy(&bytes);

        let front_matter = parse_front_matter(&content);
        let metadata = TemplateMetadata {
            template_name: front_matter.name.unwrap_or_else(|| file_stem(source_path)),
            template_version: front_matter.version.map(|version| match version {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            }),
            original_file: source_path.display().to_string(),
            promoted_from: self.config.source_stage.clone(),
            promotion_timestamp: promotion_timestamp.to_string(),
            qa_validation: qa_validation.clone(),
            checklist: parse_checklist(&content).counts(),
            testing_stage_requirements: self.config.next_stage.clone(),
        };

        write_json(&target_path.with_extension("json"), &metadata).await?;
        Ok(size_bytes)
    }

    async fn write_stage_readme(
        &self,
        target_dir: &Path,
        summary: &PromotionSummary,
    ) -> PromotionResult<PathBuf> {
        let template = get_template(README_TEMPLATE)
            .ok_or_else(|| PromotionError::TemplateNotFound(README_TEMPLATE.to_string()))?;
        let content = render_stage_readme(&template, &self.config, summary);

        let readme_path = target_dir.join(README_FILE);
        tokio::fs::write(&readme_path, content)
            .await
            .map_err(|source| PromotionError::Write {
                path: readme_path.clone(),
                source,
            })?;

        tracing::info!(path = %readme_path.display(), "Stage README created");
        Ok(readme_path)
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Reads `name` and `version` from YAML front matter, if any.
fn parse_front_matter(content: &str) -> TemplateFrontMatter {
    Matter::<YAML>::new()
        .parse(content)
        .data
        .and_then(|data| data.deserialize().ok())
        .unwrap_or_default()
}

fn render_stage_readme(
    template: &str,
    config: &PromotionConfig,
    summary: &PromotionSummary,
) -> String {
    let evaluation = &summary.qa_validation_summary;
    let score = |value: Option<f64>| value.map_or_else(|| "N/A".to_string(), |v| v.to_string());

    let replacements = [
        ("{{target_stage_title}}", stage_title(&summary.target_stage)),
        ("{{source_stage_title}}", stage_title(&summary.source_stage)),
        ("{{target_stage}}", summary.target_stage.clone()),
        ("{{promotion_timestamp}}", summary.promotion_timestamp.clone()),
        ("{{promotion_id}}", summary.promotion_id.to_string()),
        (
            "{{successfully_promoted}}",
            summary.successfully_promoted.to_string(),
        ),
        (
            "{{accuracy_threshold}}",
            config.next_stage.accuracy_threshold.to_string(),
        ),
        ("{{security_score}}", score(area_score(evaluation, Area::Security))),
        (
            "{{compliance_pass_rate}}",
            score(area_score(evaluation, Area::Compliance)),
        ),
        ("{{quality_score}}", score(area_score(evaluation, Area::Quality))),
        (
            "{{performance_score}}",
            score(area_score(evaluation, Area::Performance)),
        ),
    ];

    replacements
        .iter()
        .fold(template.to_string(), |acc, (placeholder, value)| {
            acc.replace(placeholder, value)
        })
}

#[derive(Clone, Copy)]
enum Area {
    Security,
    Compliance,
    Quality,
    Performance,
}

/// Headline score of an area, `None` when the evaluation omits it.
fn area_score(evaluation: &GateEvaluation, area: Area) -> Option<f64> {
    match area {
        Area::Security => evaluation.security.as_ref().map(|s| s.security_score),
        Area::Compliance => evaluation.compliance.as_ref().map(|c| c.compliance_pass_rate),
        Area::Quality => evaluation.quality.as_ref().map(|q| q.quality_score),
        Area::Performance => evaluation.performance.as_ref().map(|p| p.performance_score),
    }
}
