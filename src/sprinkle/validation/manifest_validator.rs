//! Manifest validation
//!
//! Validates sprinkle manifests for structure before they are registered.

use std::collections::HashSet;
use tracing::{debug, warn};

use crate::sprinkle::registry::manifest::SprinkleManifest;
use crate::sprinkle::traits::SprinkleError;

/// Validation result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// Manifest is valid
    Valid,
    /// Manifest is invalid with specific errors
    Invalid(Vec<String>),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    /// Turn an invalid result into an `InvalidSprinkle` error for `name`
    pub fn into_result(self, name: &str) -> Result<(), SprinkleError> {
        match self {
            ValidationResult::Valid => Ok(()),
            ValidationResult::Invalid(errors) => {
                Err(SprinkleError::invalid_sprinkle(name, errors.join("; ")))
            }
        }
    }
}

/// Manifest validator
pub struct ManifestValidator {
    /// Maximum sprinkle name length
    max_name_len: usize,
}

impl ManifestValidator {
    /// Create a new manifest validator
    pub fn new() -> Self {
        Self { max_name_len: 64 }
    }

    /// Validate a sprinkle manifest
    pub fn validate(&self, manifest: &SprinkleManifest) -> ValidationResult {
        let mut errors = Vec::new();

        if !self.is_valid_name(&manifest.name) {
            errors.push(format!(
                "Invalid sprinkle name: {:?} (must be alphanumeric with dashes/underscores)",
                manifest.name
            ));
        }

        if let Some(version) = &manifest.version {
            if !self.is_valid_version(version) {
                errors.push(format!(
                    "Invalid version format: {} (expected semantic versioning)",
                    version
                ));
            }
        }

        if let Err(dep_errors) = self.validate_dependencies(&manifest.dependencies) {
            errors.extend(dep_errors);
        }

        for command in &manifest.commands {
            if command.trim().is_empty() {
                errors.push("Command identifier cannot be empty".to_string());
            }
        }

        for path in manifest.routes.iter().chain(&manifest.services) {
            if path.as_os_str().is_empty() {
                errors.push("Route and service file paths cannot be empty".to_string());
            }
        }

        for resource in &manifest.resources {
            if !self.is_valid_name(&resource.scheme) {
                errors.push(format!("Invalid resource scheme: {:?}", resource.scheme));
            }
        }

        if errors.is_empty() {
            debug!("Manifest validation passed for sprinkle: {}", manifest.name);
            ValidationResult::Valid
        } else {
            warn!(
                "Manifest validation failed for sprinkle {}: {:?}",
                manifest.name, errors
            );
            ValidationResult::Invalid(errors)
        }
    }

    /// Validate name format
    #[inline]
    fn is_valid_name(&self, name: &str) -> bool {
        if name.is_empty() || name.len() > self.max_name_len {
            return false;
        }

        // Must start with alphanumeric
        if !name.chars().next().map_or(false, |c| c.is_alphanumeric()) {
            return false;
        }

        name.chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    }

    /// Validate version format (semantic versioning)
    ///
    /// Accepts: major.minor[.patch][-prerelease][+build]
    #[inline]
    fn is_valid_version(&self, version: &str) -> bool {
        let base = version.split('+').next().unwrap_or_default();
        let version_part = base.split('-').next().unwrap_or_default();

        let nums: Vec<&str> = version_part.split('.').collect();
        if nums.len() < 2 || nums.len() > 3 {
            return false;
        }

        nums.iter().all(|n| {
            !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()) && n.parse::<u32>().is_ok()
        })
    }

    /// Validate dependency names; a dependency listed twice is an error
    fn validate_dependencies(&self, dependencies: &[String]) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        let mut seen = HashSet::new();

        for dep_name in dependencies {
            if !self.is_valid_name(dep_name) {
                errors.push(format!("Invalid dependency name: {:?}", dep_name));
            }
            if !seen.insert(dep_name.as_str()) {
                errors.push(format!("Duplicate dependency: {}", dep_name));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl Default for ManifestValidator {
    fn default() -> Self {
        Self::new()
    }
}
