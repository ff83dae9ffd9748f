//! Sprinkle system
//!
//! A sprinkle is a self-contained slice of an application: it declares the
//! sprinkles it builds on and contributes console commands, route definitions,
//! service container definitions and resource locations.
//!
//! ## Architecture
//!
//! - **Registry**: identifiers map to sprinkle factories; manifest sprinkles are
//!   discovered from `sprinkle.toml` files
//! - **Resolver**: depth-first expansion of the main sprinkle's dependencies into
//!   a deduplicated list, with cycle detection
//! - **Validator**: commands, route files and container files are checked before
//!   they reach the host
//! - **Manager**: façade the host bootstrap queries

pub mod command;
pub mod container;
pub mod manager;
pub mod registry;
pub mod resources;
pub mod routes;
pub mod traits;
pub mod validation;

pub use command::{Command, CommandInput, CommandOutput, CommandRegistry, CommandTester};
pub use container::{ContainerDefinitions, ServiceDefinition, ServiceSource};
pub use manager::SprinkleManager;
pub use registry::{DependencyResolver, ManifestSprinkle, SprinkleDiscovery, SprinkleRegistry};
pub use resources::{ResourceLocation, ResourceLocator};
pub use routes::{Method, Route, RouteDefinition, RouteSource, RouteTable, Router};
pub use traits::{Sprinkle, SprinkleError};
pub use validation::{ArtifactValidator, ManifestValidator, ValidationResult};
