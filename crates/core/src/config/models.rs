//! Configuration models that aggregate all settings.

use qg_protocol::config_models::GatesConfig;
use std::path::PathBuf;

/// Application configuration loaded from the `.qa-gates/` directory.
///
/// # Example
///
/// ```rust,no_run
/// use qg_core::config::loader::load_config;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new(".")).await?;
/// println!("Security threshold: {}%",
///          config.gates.thresholds.security_score_threshold);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Settings from `config.toml`, or defaults when the file is absent.
    pub gates: GatesConfig,

    /// Path the settings were read from. `None` when defaults are in use.
    pub source: Option<PathBuf>,
}
