//! Sprinkle system traits and errors
//!
//! Defines the capability contract every sprinkle implements and the error type
//! shared by the resolver, the artifact validator and the manager.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::sprinkle::container::ServiceSource;
use crate::sprinkle::resources::ResourceLocation;
use crate::sprinkle::routes::RouteSource;

/// Sprinkle trait that all sprinkles must implement
///
/// A sprinkle is a purely declarative unit: it names the sprinkles it depends
/// on and the artifacts it contributes. The manager never mutates a sprinkle.
pub trait Sprinkle: Send + Sync {
    /// Unique sprinkle name. Must match the identifier it is registered under.
    fn name(&self) -> &str;

    /// Names of the sprinkles this sprinkle depends on, in declaration order
    fn dependencies(&self) -> Vec<String> {
        Vec::new()
    }

    /// Identifiers of the console commands this sprinkle contributes
    ///
    /// Identifiers are looked up in the [`CommandRegistry`](crate::sprinkle::command::CommandRegistry).
    fn commands(&self) -> Vec<String> {
        Vec::new()
    }

    /// Route definitions contributed by this sprinkle
    fn routes(&self) -> Vec<RouteSource> {
        Vec::new()
    }

    /// Service container definitions contributed by this sprinkle
    fn services(&self) -> Vec<ServiceSource> {
        Vec::new()
    }

    /// Resource locations, keyed by scheme
    fn resources(&self) -> Vec<(String, ResourceLocation)> {
        Vec::new()
    }
}

impl fmt::Debug for dyn Sprinkle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sprinkle")
            .field("name", &self.name())
            .field("dependencies", &self.dependencies())
            .finish_non_exhaustive()
    }
}

/// Sprinkle system errors
#[derive(Debug, Error)]
pub enum SprinkleError {
    #[error("Invalid sprinkle {name}: {reason}")]
    InvalidSprinkle { name: String, reason: String },

    #[error("Circular sprinkle dependency detected: {}", .path.join(" -> "))]
    CyclicDependency { path: Vec<String> },

    #[error("Invalid command {command}: expected an implementation of {expected}")]
    InvalidCommand {
        command: String,
        expected: &'static str,
    },

    #[error("File not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    #[error("Invalid route definition in {}: {reason}", .path.display())]
    InvalidRouteDefinition { path: PathBuf, reason: String },

    #[error("Invalid container definition in {}: {reason}", .path.display())]
    InvalidContainerDefinition { path: PathBuf, reason: String },

    #[error("Invalid sprinkle manifest: {0}")]
    InvalidManifest(String),

    #[error("Command {command} failed: {reason}")]
    CommandFailed { command: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SprinkleError {
    /// Build an `InvalidSprinkle` error
    pub(crate) fn invalid_sprinkle(name: impl Into<String>, reason: impl Into<String>) -> Self {
        SprinkleError::InvalidSprinkle {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
