//! Configuration file loader for the `.qa-gates/` directory.
//!
//! This module reads `.qa-gates/config.toml`, falls back to defaults when
//! it is absent, and rejects values that would make a gate meaningless.

use crate::config::error::ConfigError;
use crate::config::error::ConfigResult;
use crate::config::models::AppConfig;
use qg_protocol::config_models::GatesConfig;
use std::path::Path;

/// Name of the project configuration directory.
pub const CONFIG_DIR: &str = ".qa-gates";

/// Name of the configuration file inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.toml";

/// Loads configuration from the `.qa-gates/` directory.
///
/// # Arguments
///
/// * `root` - Root directory containing the `.qa-gates/` folder
///
/// # Returns
///
/// An `AppConfig` with the parsed settings. If the directory or the file
/// is missing, returns the default configuration rather than an error.
///
/// # Errors
///
/// Returns `ConfigError` if:
/// - The file exists but cannot be read
/// - The file is not valid TOML
/// - A threshold or stage name is out of range
///
/// # Example
///
/// ```rust,no_run
/// use qg_core::config::loader::load_config;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new(".")).await?;
/// println!("Checking {} frameworks", config.gates.compliance.frameworks.len());
/// # Ok(())
/// # }
/// ```
pub async fn load_config(root: &Path) -> ConfigResult<AppConfig> {
    let config_path = root.join(CONFIG_DIR).join(CONFIG_FILE);

    // If config.toml doesn't exist, return default config
    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config file, using defaults");
        return Ok(AppConfig::default());
    }

    let content = tokio::fs::read_to_string(&config_path)
        .await
        .map_err(|source| ConfigError::FileRead {
            path: config_path.clone(),
            source,
        })?;

    let gates: GatesConfig =
        toml::from_str(&content).map_err(|source| ConfigError::TomlParse {
            path: config_path.clone(),
            source,
        })?;

    validate(&gates).map_err(|reason| ConfigError::InvalidConfig {
        path: config_path.clone(),
        reason,
    })?;

    tracing::info!(path = %config_path.display(), "Loaded configuration");

    Ok(AppConfig {
        gates,
        source: Some(config_path),
    })
}

/// Checks semantic constraints serde cannot express.
fn validate(config: &GatesConfig) -> Result<(), String> {
    let thresholds = &config.thresholds;
    let percentages = [
        ("security_score_threshold", thresholds.security_score_threshold),
        ("compliance_pass_rate", thresholds.compliance_pass_rate),
        ("code_quality_score", thresholds.code_quality_score),
        ("test_coverage_minimum", thresholds.test_coverage_minimum),
        ("performance_baseline_score", thresholds.performance_baseline_score),
        (
            "next_stage.accuracy_threshold",
            config.promotion.next_stage.accuracy_threshold,
        ),
    ];

    for (name, value) in percentages {
        if !(0.0..=100.0).contains(&value) {
            return Err(format!("{name} must be between 0 and 100, got {value}"));
        }
    }

    if config
        .compliance
        .frameworks
        .iter()
        .any(|framework| framework.trim().is_empty())
    {
        return Err("compliance frameworks must not contain blank names".to_string());
    }
    if let Some(framework) = config
        .compliance
        .frameworks
        .iter()
        .find(|framework| framework.contains(['/', '\\']) || framework.contains(".."))
    {
        return Err(format!(
            "compliance framework '{framework}' must be a plain name, not a path"
        ));
    }

    let promotion = &config.promotion;
    if promotion.source_stage.trim().is_empty() || promotion.target_stage.trim().is_empty() {
        return Err("source_stage and target_stage must not be empty".to_string());
    }
    if promotion.source_stage == promotion.target_stage {
        return Err(format!(
            "source_stage and target_stage must differ, both are '{}'",
            promotion.source_stage
        ));
    }
    if promotion.template_extension.trim().is_empty() {
        return Err("template_extension must not be empty".to_string());
    }

    Ok(())
}
