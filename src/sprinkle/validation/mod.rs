//! Sprinkle validation
//!
//! Provides manifest validation and the artifact validator that materializes
//! commands, route definitions and container definitions.

pub mod artifact_validator;
pub mod manifest_validator;

pub use artifact_validator::ArtifactValidator;
pub use manifest_validator::{ManifestValidator, ValidationResult};
