//! Common test utilities for integration tests.
//!
//! - Scanner output fixtures laid out the way CI jobs write them
//! - Template trees for promotion tests

pub mod fixtures;

#[allow(unused_imports)]
pub use fixtures::*;
