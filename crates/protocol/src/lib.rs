//! # qg-protocol
//!
//! Document models shared by every qa-gates tool.
//!
//! This crate defines the on-disk data structures used for:
//! - Configuration file parsing (`.qa-gates/config.toml`)
//! - Gate evaluation documents written by `qa-gates evaluate`
//! - Promotion reports, per-template metadata and promotion summaries
//! - Markdown checklist summaries
//!
//! ## Modules
//!
//! - [`config_models`]: Thresholds, compliance frameworks and promotion settings
//! - [`status`]: The `PASSED`/`FAILED` gate status
//! - [`evaluation_models`]: Per-area gate results and the evaluation document
//! - [`promotion_models`]: Promotion report and template promotion records
//! - [`checklist_models`]: Parsed markdown checklist items
//!
//! ## Design Principles
//!
//! - Minimal dependencies: Only serde, ts-rs, and uuid
//! - TypeScript generation: All types derive `TS` for dashboard compatibility
//! - Lenient reading: documents written by older tools must still load

pub mod checklist_models;
pub mod config_models;
pub mod evaluation_models;
pub mod promotion_models;
pub mod status;

// Re-export all public types for convenience
pub use checklist_models::*;
pub use config_models::*;
pub use evaluation_models::*;
pub use promotion_models::*;
pub use status::*;
