//! Configuration loading and management.
//!
//! This module loads `.qa-gates/config.toml` and validates the thresholds
//! and stage settings it contains.

pub mod error;
pub mod loader;
pub mod models;
