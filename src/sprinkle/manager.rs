//! Sprinkle manager
//!
//! Entry point used by the host bootstrap. Resolves the main sprinkle's
//! dependency set once at construction and answers artifact queries against
//! it. Artifact queries are never cached: every call re-validates commands and
//! re-reads route and container files.

use std::sync::Arc;
use tracing::info;

use crate::config::ManagerConfig;
use crate::sprinkle::command::{Command, CommandRegistry};
use crate::sprinkle::container::ContainerDefinitions;
use crate::sprinkle::registry::{
    DependencyResolver, ResolvedSprinkles, SprinkleDiscovery, SprinkleRegistry,
};
use crate::sprinkle::resources::ResourceLocator;
use crate::sprinkle::routes::RouteDefinition;
use crate::sprinkle::traits::{Sprinkle, SprinkleError};
use crate::sprinkle::validation::ArtifactValidator;

/// Sprinkle manager
pub struct SprinkleManager {
    /// Available sprinkles
    registry: SprinkleRegistry,
    /// Constructible commands
    commands: CommandRegistry,
    /// Main sprinkle name
    root: String,
    /// Resolved sprinkles, root first
    sprinkles: ResolvedSprinkles,
}

impl SprinkleManager {
    /// Create a manager and resolve `root` eagerly
    pub fn new(
        registry: SprinkleRegistry,
        commands: CommandRegistry,
        root: impl Into<String>,
    ) -> Result<Self, SprinkleError> {
        let root = root.into();
        info!("Loading main sprinkle: {}", root);

        let sprinkles = DependencyResolver::new(&registry).resolve(&root)?;
        info!("Resolved {} sprinkles for {}", sprinkles.len(), root);

        Ok(Self {
            registry,
            commands,
            root,
            sprinkles,
        })
    }

    /// Create a manager from configuration
    ///
    /// Sprinkles found in `config.sprinkles_dir` are added to `registry`
    /// before the root is resolved.
    pub fn from_config(
        config: &ManagerConfig,
        mut registry: SprinkleRegistry,
        commands: CommandRegistry,
    ) -> Result<Self, SprinkleError> {
        if let Some(dir) = &config.sprinkles_dir {
            let count = SprinkleDiscovery::new(dir).register_all(&mut registry)?;
            info!("Registered {} sprinkles from {}", count, dir);
        }
        Self::new(registry, commands, config.root.clone())
    }

    /// Re-resolve the dependency set from the registry
    ///
    /// On failure the previously resolved set is kept.
    pub fn reload(&mut self) -> Result<(), SprinkleError> {
        self.sprinkles = DependencyResolver::new(&self.registry).resolve(&self.root)?;
        Ok(())
    }

    /// Resolved sprinkles, root first
    pub fn sprinkles(&self) -> &[Arc<dyn Sprinkle>] {
        &self.sprinkles
    }

    pub fn sprinkle_names(&self) -> Vec<&str> {
        self.sprinkles.iter().map(|s| s.name()).collect()
    }

    pub fn main_sprinkle(&self) -> &Arc<dyn Sprinkle> {
        // The resolver always emits the root first.
        &self.sprinkles[0]
    }

    /// True if `name` is part of the resolved set
    pub fn is_available(&self, name: &str) -> bool {
        self.sprinkles.iter().any(|s| s.name() == name)
    }

    pub fn registry(&self) -> &SprinkleRegistry {
        &self.registry
    }

    pub fn command_registry(&self) -> &CommandRegistry {
        &self.commands
    }

    /// Validated commands of all sprinkles, in sprinkle order
    pub fn commands(&self) -> Result<Vec<Box<dyn Command>>, SprinkleError> {
        self.validator().collect_commands(&self.sprinkles)
    }

    /// Validated route definitions of all sprinkles, in sprinkle order
    pub fn routes(&self) -> Result<Vec<RouteDefinition>, SprinkleError> {
        self.validator().collect_routes(&self.sprinkles)
    }

    /// Merged container definitions; the root's entries win
    pub fn container_definitions(&self) -> Result<ContainerDefinitions, SprinkleError> {
        self.validator()
            .collect_container_definitions(&self.sprinkles)
    }

    /// Resource locator holding every sprinkle's locations
    ///
    /// Dependencies are registered before dependents so the root's locations
    /// are searched first.
    pub fn resource_locator(&self) -> ResourceLocator {
        let mut locator = ResourceLocator::new();
        for sprinkle in self.sprinkles.iter().rev() {
            for (scheme, location) in sprinkle.resources() {
                locator.register_location(scheme, location);
            }
        }
        locator
    }

    fn validator(&self) -> ArtifactValidator<'_> {
        ArtifactValidator::new(&self.commands)
    }
}
