//! Command handlers.
//!
//! Each handler returns whether its gate passed; `main` maps that onto
//! the process exit code. Errors are reserved for conditions the user
//! has to fix, such as an invalid config file.

use crate::cli::{Cli, Commands};
use crate::output;
use color_eyre::eyre::{Result, WrapErr};
use qg_core::checklist::parse_checklist;
use qg_core::config::loader::load_config;
use qg_core::evaluation::{check_gate_status, save_evaluation};
use qg_core::gates::{QualityGateEvaluator, ResultDirs};
use qg_core::init::{generate_config_structure, InitOptions};
use qg_core::promotion::{
    create_promotion_report, save_promotion_report, PromotionError, TemplatePromoter,
};
use std::path::{Path, PathBuf};

pub async fn run(cli: &Cli) -> Result<bool> {
    match &cli.command {
        Commands::Evaluate {
            results_root,
            security_results,
            compliance_results,
            quality_results,
            performance_results,
            output,
        } => {
            let ResultDirs {
                security,
                compliance,
                quality,
                performance,
            } = ResultDirs::under(&cli.resolve(results_root));
            let pick = |explicit: &Option<PathBuf>, default: PathBuf| {
                explicit.as_deref().map_or(default, |p| cli.resolve(p))
            };
            let dirs = ResultDirs {
                security: pick(security_results, security),
                compliance: pick(compliance_results, compliance),
                quality: pick(quality_results, quality),
                performance: pick(performance_results, performance),
            };
            evaluate(cli, &dirs, &cli.resolve(output)).await
        }
        Commands::Status { evaluation_file } => status(&cli.resolve(evaluation_file)).await,
        Commands::Report {
            qa_evaluation,
            target,
            status,
            output,
        } => {
            let config = load_config(&cli.root).await?;
            let promotion = &config.gates.promotion;
            let target = target.as_deref().unwrap_or(&promotion.target_stage);

            let document =
                create_promotion_report(&cli.resolve(qa_evaluation), target, *status, promotion)
                    .await;
            let report_path = cli.resolve(output);
            save_promotion_report(&report_path, &document).await?;
            output::print_report(&document, &report_path);
            Ok(true)
        }
        Commands::Promote {
            source_dir,
            target_dir,
            qa_results,
        } => {
            promote(
                cli,
                &cli.resolve(source_dir),
                &cli.resolve(target_dir),
                &cli.resolve(qa_results),
            )
            .await
        }
        Commands::Checklist { file, json } => {
            let path = cli.resolve(file);
            let content = tokio::fs::read_to_string(&path)
                .await
                .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
            let summary = parse_checklist(&content);

            if *json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                output::print_checklist(&summary, &path);
            }
            Ok(true)
        }
        Commands::Init { force, minimal } => {
            let written = generate_config_structure(InitOptions {
                target_dir: cli.root.clone(),
                force: *force,
                minimal: *minimal,
            })
            .await?;

            for path in &written {
                println!("Created {}", path.display());
            }
            Ok(true)
        }
    }
}

async fn evaluate(cli: &Cli, dirs: &ResultDirs, output_path: &Path) -> Result<bool> {
    let config = load_config(&cli.root).await?;
    let evaluator = QualityGateEvaluator::new(&config.gates);

    let evaluation = evaluator.evaluate(dirs).await;
    save_evaluation(output_path, &evaluation).await?;

    output::print_evaluation(&evaluation, evaluator.thresholds());
    println!();
    println!("QA evaluation results saved to: {}", output_path.display());

    Ok(evaluation.is_passed())
}

async fn status(path: &Path) -> Result<bool> {
    let check = check_gate_status(path).await;
    output::print_status_check(&check, path);
    Ok(check.passed())
}

async fn promote(cli: &Cli, source: &Path, target: &Path, qa_results: &Path) -> Result<bool> {
    let config = load_config(&cli.root).await?;
    let promoter = TemplatePromoter::new(config.gates.promotion);

    match promoter.promote(source, target, qa_results).await {
        Ok(outcome) => {
            output::print_promotion(&outcome);
            Ok(outcome.success())
        }
        Err(
            e @ (PromotionError::Evaluation(_)
            | PromotionError::GatesNotPassed(_)
            | PromotionError::NoTemplates(_)),
        ) => {
            println!("{e}");
            println!("Template promotion failed");
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}
