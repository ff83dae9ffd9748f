//! Sprinkle registry and discovery
//!
//! Handles sprinkle registration, manifest parsing, discovery and dependency
//! resolution.

pub mod catalog;
pub mod dependencies;
pub mod discovery;
pub mod manifest;

pub use catalog::{SprinkleFactory, SprinkleRegistry};
pub use dependencies::{DependencyResolver, ResolvedSprinkles};
pub use discovery::SprinkleDiscovery;
pub use manifest::{ManifestResource, ManifestSprinkle, SprinkleManifest, MANIFEST_FILE};
