//! Sprinkle system tests
//!
//! Tests for dependency resolution, artifact validation, manifest discovery
//! and the manager façade.

pub mod test_utils;
pub mod manifest_tests;
pub mod resolver_tests;
