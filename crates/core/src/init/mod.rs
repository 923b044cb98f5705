//! Initialization module for creating `.qa-gates` directory structures.
//!
//! This module generates a `.qa-gates/` directory with:
//! - A documented `config.toml` holding the default thresholds
//! - A reviewer checklist (`gates.md`) unless minimal mode is requested
//!
//! # Example
//!
//! ```no_run
//! use qg_core::init::{InitOptions, generate_config_structure};
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let options = InitOptions {
//!     target_dir: PathBuf::from("."),
//!     force: false,
//!     minimal: false,
//! };
//!
//! let written = generate_config_structure(options).await?;
//! println!("Wrote {} files", written.len());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod generator;
pub mod templates;

// Re-export commonly used types for convenience
pub use error::{InitError, InitResult};
pub use generator::{generate_config_structure, InitOptions};
pub use templates::{get_template, list_templates};
