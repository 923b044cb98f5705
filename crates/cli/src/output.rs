//! Human-readable output for `qa-gates` commands.
//!
//! Everything here writes to stdout. Logs go to stderr, so stdout stays
//! parseable by the shell steps that consume it.

use colored::{ColoredString, Colorize};
use qg_core::evaluation::StatusCheck;
use qg_core::promotion::PromotionOutcome;
use qg_protocol::checklist_models::ChecklistSummary;
use qg_protocol::config_models::GateThresholds;
use qg_protocol::evaluation_models::GateEvaluation;
use qg_protocol::promotion_models::PromotionDocument;
use qg_protocol::status::GateStatus;
use std::path::Path;

const RULE_WIDTH: usize = 60;
const SHORT_RULE_WIDTH: usize = 40;

fn verdict(passed: bool) -> ColoredString {
    if passed {
        "PASSED".green().bold()
    } else {
        "FAILED".red().bold()
    }
}

fn mark(passed: bool) -> ColoredString {
    if passed {
        "+".green()
    } else {
        "x".red()
    }
}

fn status_label(status: GateStatus) -> ColoredString {
    match status {
        GateStatus::Passed => status.as_str().green().bold(),
        GateStatus::Failed => status.as_str().red().bold(),
        GateStatus::Pending | GateStatus::Unknown => status.as_str().yellow().bold(),
    }
}

fn header(title: &str, width: usize) {
    println!();
    println!("{}", title.cyan().bold());
    println!("{}", "=".repeat(width));
}

/// Full summary printed after `qa-gates evaluate`.
pub fn print_evaluation(evaluation: &GateEvaluation, thresholds: &GateThresholds) {
    header("QA Quality Gates Evaluation Summary", RULE_WIDTH);

    if let Some(security) = &evaluation.security {
        println!("Security:    {}", verdict(security.passed));
        println!(
            "  Score: {:.1}% (threshold: {}%)",
            security.security_score, thresholds.security_score_threshold
        );
        println!(
            "  Vulnerabilities: {} (limit: {})",
            security.vulnerability_count, thresholds.vulnerability_count_limit
        );
    }

    if let Some(compliance) = &evaluation.compliance {
        println!("Compliance:  {}", verdict(compliance.passed));
        println!(
            "  Pass Rate: {:.1}% ({}/{})",
            compliance.compliance_pass_rate, compliance.passed_checks, compliance.total_checks
        );
    }

    if let Some(quality) = &evaluation.quality {
        println!("Quality:     {}", verdict(quality.passed));
        println!(
            "  Score: {:.1}% (threshold: {}%)",
            quality.quality_score, thresholds.code_quality_score
        );
        println!(
            "  Coverage: {:.1}% (minimum: {}%)",
            quality.coverage_score, thresholds.test_coverage_minimum
        );
    }

    if let Some(performance) = &evaluation.performance {
        println!("Performance: {}", verdict(performance.passed));
        println!("  Score: {:.1}%", performance.performance_score);
        println!("  Baseline Met: {}", performance.baseline_met);
        if let Some(note) = &performance.note {
            println!("  Note: {}", note.dimmed());
        }
    }

    println!();
    println!(
        "Overall Status: {}",
        status_label(evaluation.status_or(GateStatus::Failed))
    );
}

/// Output of `qa-gates status`. The bare status is always the last line.
pub fn print_status_check(check: &StatusCheck, path: &Path) {
    match (&check.evaluation, &check.error) {
        (Some(evaluation), _) => {
            header("QA Quality Gate Status Check", SHORT_RULE_WIDTH);
            if let Some(security) = &evaluation.security {
                println!("{} Security: {:.1}%", mark(security.passed), security.security_score);
            }
            if let Some(compliance) = &evaluation.compliance {
                println!(
                    "{} Compliance: {:.1}%",
                    mark(compliance.passed),
                    compliance.compliance_pass_rate
                );
            }
            if let Some(quality) = &evaluation.quality {
                println!("{} Quality: {:.1}%", mark(quality.passed), quality.quality_score);
            }
            if let Some(performance) = &evaluation.performance {
                println!(
                    "{} Performance: {:.1}%",
                    mark(performance.passed),
                    performance.performance_score
                );
            }
            println!();
            println!("Overall Status: {}", status_label(check.status));
        }
        (None, Some(error)) => {
            println!("{} {error}", "x".red());
        }
        (None, None) => {
            println!("{} No evaluation at {}", "x".red(), path.display());
        }
    }

    println!("{}", check.status);
}

pub fn print_report(document: &PromotionDocument, path: &Path) {
    let report = &document.promotion_report;

    header("QA Promotion Report Created", SHORT_RULE_WIDTH);
    println!("Status: {}", status_label(report.promotion_status));
    println!("Target Stage: {}", report.target_stage);
    println!("Report saved: {}", path.display());
    if report.promotion_status.is_passed() {
        println!("{} Recommendation: APPROVED for promotion", mark(true));
    } else {
        println!("{} Recommendation: REJECTED - requires remediation", mark(false));
    }
}

pub fn print_promotion(outcome: &PromotionOutcome) {
    let summary = &outcome.summary;

    for template in &summary.promoted_templates {
        println!("{} Promoted: {}", mark(true), template.target_path);
    }

    header("Promotion Summary", SHORT_RULE_WIDTH);
    println!("  Total templates: {}", summary.total_templates);
    println!("  Successfully promoted: {}", summary.successfully_promoted);
    println!("  Success rate: {:.1}%", summary.success_rate());
    println!("  Promotion summary saved: {}", outcome.summary_path.display());
    if let Some(readme) = &outcome.readme_path {
        println!("  Stage README created: {}", readme.display());
    }

    println!();
    if outcome.success() {
        println!(
            "{} All templates successfully promoted to {}",
            mark(true),
            summary.target_stage
        );
    } else {
        println!("{} Template promotion failed", mark(false));
    }
}

pub fn print_checklist(summary: &ChecklistSummary, path: &Path) {
    header(&format!("Checklist: {}", path.display()), RULE_WIDTH);

    for item in &summary.items {
        let box_mark = if item.completed {
            "[x]".green()
        } else {
            "[ ]".yellow()
        };
        println!("{:>4}  {box_mark} {}", item.line, item.text);
    }

    println!();
    println!(
        "{}/{} completed ({:.0}%)",
        summary.completed(),
        summary.total(),
        summary.completion_ratio() * 100.0
    );

    let mut outstanding = summary.outstanding().peekable();
    if outstanding.peek().is_some() {
        println!();
        println!("{}", "Outstanding:".yellow().bold());
        for item in outstanding {
            println!("  line {}: {}", item.line, item.text);
        }
    }
}
