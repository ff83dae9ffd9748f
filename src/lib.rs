//! Sprinkle Manager - modular application loader
//!
//! Applications are assembled from sprinkles: named modules that declare the
//! sprinkles they build on and contribute console commands, routes, service
//! container definitions and resource locations. The manager resolves the main
//! sprinkle's dependency set and hands validated artifacts to the host.
//!
//! ## Design Principles
//!
//! 1. **Explicit registries**: sprinkles and commands are registered up front,
//!    nothing is looked up by reflection
//! 2. **Deterministic order**: the main sprinkle first, then dependencies in
//!    depth-first declaration order
//! 3. **Fail loudly**: cycles, unknown sprinkles and malformed artifacts are
//!    typed errors, never silently dropped

pub mod config;
pub mod sprinkle;
pub mod utils;

pub use config::{LoggingConfig, ManagerConfig};
pub use sprinkle::{
    ArtifactValidator, Command, CommandInput, CommandOutput, CommandRegistry, CommandTester,
    ContainerDefinitions, DependencyResolver, ResourceLocation, ResourceLocator, RouteDefinition,
    RouteSource, ServiceDefinition, ServiceSource, Sprinkle, SprinkleError, SprinkleManager,
    SprinkleRegistry,
};
