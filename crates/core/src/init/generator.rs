//! Directory structure and file generation for `.qa-gates` initialization.

use super::error::{InitError, InitResult};
use super::templates::{get_template, list_templates};
use crate::config::loader::{CONFIG_DIR, CONFIG_FILE};
use std::fs;
use std::path::{Path, PathBuf};

/// Prefix of the embedded templates copied into `.qa-gates/`.
const INIT_PREFIX: &str = "init/";

/// Options for initializing a .qa-gates directory.
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Target directory where .qa-gates will be created.
    pub target_dir: PathBuf,

    /// Overwrite existing .qa-gates directory if it exists.
    pub force: bool,

    /// Write only `config.toml`, without the reviewer checklist.
    pub minimal: bool,
}

impl Default for InitOptions {
    fn default() -> Self {
        Self {
            target_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            force: false,
            minimal: false,
        }
    }
}

/// Generate a `.qa-gates` directory from the embedded templates.
///
/// ```text
/// .qa-gates/
/// ├── config.toml
/// └── gates.md (unless minimal)
/// ```
///
/// # Returns
/// The paths written, or an `InitError` if:
/// - The .qa-gates directory already exists (without force flag)
/// - A template file cannot be found
/// - File system operations fail
pub async fn generate_config_structure(options: InitOptions) -> InitResult<Vec<PathBuf>> {
    let gates_dir = options.target_dir.join(CONFIG_DIR);

    if gates_dir.exists() && !options.force {
        return Err(InitError::DirectoryExists(gates_dir));
    }

    fs::create_dir_all(&gates_dir).map_err(|source| InitError::DirectoryCreate {
        path: gates_dir.clone(),
        source,
    })?;

    let templates = if options.minimal {
        vec![format!("{INIT_PREFIX}{CONFIG_FILE}")]
    } else {
        list_templates(INIT_PREFIX)
    };

    let mut written = Vec::with_capacity(templates.len());
    for template_path in &templates {
        written.push(write_template_file(&gates_dir, template_path)?);
    }

    tracing::info!(path = %gates_dir.display(), files = written.len(), "Initialized .qa-gates");
    Ok(written)
}

/// Writes one embedded template, stripping the `init/` prefix.
fn write_template_file(gates_dir: &Path, template_path: &str) -> InitResult<PathBuf> {
    let content = get_template(template_path)
        .ok_or_else(|| InitError::TemplateNotFound(template_path.to_string()))?;

    let relative = template_path
        .strip_prefix(INIT_PREFIX)
        .unwrap_or(template_path);
    let target_path = gates_dir.join(relative);

    if let Some(parent) = target_path.parent() {
        fs::create_dir_all(parent).map_err(|source| InitError::DirectoryCreate {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(&target_path, content).map_err(|source| InitError::FileWrite {
        path: target_path.clone(),
        source,
    })?;

    Ok(target_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::loader::load_config;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_generate_structure_success() {
        let dir = tempdir().unwrap();
        let options = InitOptions {
            target_dir: dir.path().to_path_buf(),
            force: false,
            minimal: false,
        };

        let written = generate_config_structure(options).await.unwrap();
        assert_eq!(written.len(), 2);

        let gates_dir = dir.path().join(CONFIG_DIR);
        assert!(gates_dir.join("config.toml").exists());
        assert!(gates_dir.join("gates.md").exists());

        // The generated config loads cleanly
        let config = load_config(dir.path()).await.unwrap();
        assert!(config.source.is_some());
        assert_eq!(config.gates.thresholds.security_score_threshold, 90.0);
    }

    #[tokio::test]
    async fn test_generate_structure_minimal() {
        let dir = tempdir().unwrap();
        let options = InitOptions {
            target_dir: dir.path().to_path_buf(),
            force: false,
            minimal: true,
        };

        generate_config_structure(options).await.unwrap();

        let gates_dir = dir.path().join(CONFIG_DIR);
        assert!(gates_dir.join("config.toml").exists());
        assert!(
            !gates_dir.join("gates.md").exists(),
            "gates.md should not exist in minimal mode"
        );
    }

    #[tokio::test]
    async fn test_generate_structure_exists_without_force() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join(CONFIG_DIR)).unwrap();

        let options = InitOptions {
            target_dir: dir.path().to_path_buf(),
            force: false,
            minimal: false,
        };

        let result = generate_config_structure(options).await;
        assert!(matches!(result, Err(InitError::DirectoryExists(_))));
    }

    #[tokio::test]
    async fn test_generate_structure_exists_with_force() {
        let dir = tempdir().unwrap();
        let gates_dir = dir.path().join(CONFIG_DIR);
        fs::create_dir_all(&gates_dir).unwrap();
        fs::write(gates_dir.join("config.toml"), "[thresholds]\ncode_quality_score = 50.0").unwrap();

        let options = InitOptions {
            target_dir: dir.path().to_path_buf(),
            force: true,
            minimal: true,
        };

        generate_config_structure(options).await.unwrap();

        let config = fs::read_to_string(gates_dir.join("config.toml")).unwrap();
        assert!(config.contains("code_quality_score = 85.0"));
    }

    #[test]
    fn test_default_init_options() {
        let options = InitOptions::default();
        assert!(!options.force);
        assert!(!options.minimal);
    }
}
