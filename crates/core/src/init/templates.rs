//! Embedded template files.
//!
//! This module uses `rust-embed` to embed the repository `templates/`
//! directory into the binary at compile time:
//! - `init/`: files written into a new `.qa-gates/` directory
//! - `stage/README.md`: README rendered into a promoted stage directory

use rust_embed::RustEmbed;

/// Embedded template files from the `templates/` directory.
///
/// The path is relative to the crate root:
/// - `CARGO_MANIFEST_DIR` = `crates/core`
/// - `../../templates` = repository `templates/`
///
/// With the `debug-embed` feature, debug builds embed the files as well,
/// so tests see the same content as release builds.
#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/../../templates"]
pub struct TemplateAssets;

/// Get template file content by path.
///
/// # Arguments
/// * `path` - Relative path from templates root (e.g., "init/config.toml")
///
/// # Returns
/// The file content as a String, or None if the file doesn't exist.
///
/// # Example
/// ```
/// use qg_core::init::templates::get_template;
///
/// let config = get_template("init/config.toml").expect("config.toml should exist");
/// assert!(config.contains("[thresholds]"));
/// ```
pub fn get_template(path: &str) -> Option<String> {
    TemplateAssets::get(path).map(|file| String::from_utf8_lossy(file.data.as_ref()).to_string())
}

/// List all template files under a directory prefix, sorted.
///
/// # Example
/// ```
/// use qg_core::init::templates::list_templates;
///
/// let files = list_templates("init/");
/// assert!(files.contains(&"init/config.toml".to_string()));
/// ```
pub fn list_templates(prefix: &str) -> Vec<String> {
    let mut paths: Vec<String> = TemplateAssets::iter()
        .filter(|path| path.starts_with(prefix))
        .map(|path| path.to_string())
        .collect();
    paths.sort();
    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_config_template() {
        let content = get_template("init/config.toml").expect("config.toml should be embedded");
        assert!(content.contains("security_score_threshold = 90.0"));
        assert!(content.contains("frameworks = "));
    }

    /// The shipped config template must parse back to the defaults.
    #[test]
    fn test_config_template_matches_defaults() {
        let content = get_template("init/config.toml").expect("config.toml should be embedded");
        let parsed: qg_protocol::config_models::GatesConfig =
            toml::from_str(&content).expect("config template should be valid TOML");
        assert_eq!(parsed, qg_protocol::config_models::GatesConfig::default());
    }

    #[test]
    fn test_get_stage_readme_template() {
        let content = get_template("stage/README.md").expect("stage README should be embedded");
        assert!(content.contains("{{promotion_timestamp}}"));
        assert!(content.contains("{{security_score}}"));
    }

    #[test]
    fn test_get_nonexistent_template() {
        assert!(get_template("nonexistent.txt").is_none());
    }

    #[test]
    fn test_list_init_templates() {
        let files = list_templates("init/");
        assert_eq!(files, vec!["init/config.toml", "init/gates.md"]);
    }
}
