//! Artifact validation
//!
//! Validates and materializes the commands, route definitions and container
//! definitions declared by resolved sprinkles. Every failure aborts the whole
//! aggregation; nothing is skipped.

use std::sync::Arc;
use tracing::{debug, trace};

use crate::sprinkle::command::{Command, CommandRegistry};
use crate::sprinkle::container::{self, ContainerDefinitions, ServiceSource};
use crate::sprinkle::routes::{self, RouteDefinition, RouteSource};
use crate::sprinkle::traits::{Sprinkle, SprinkleError};

/// Artifact validator
pub struct ArtifactValidator<'a> {
    commands: &'a CommandRegistry,
}

impl<'a> ArtifactValidator<'a> {
    pub fn new(commands: &'a CommandRegistry) -> Self {
        Self { commands }
    }

    /// Construct a command and check it implements `Command`
    pub fn validate_command(&self, id: &str) -> Result<Box<dyn Command>, SprinkleError> {
        self.commands.construct(id)
    }

    /// Turn a route source into an invokable route definition
    ///
    /// Route files are read from disk on every call.
    pub fn validate_route(&self, source: &RouteSource) -> Result<RouteDefinition, SprinkleError> {
        match source {
            RouteSource::Registrar(definition) => Ok(definition.clone()),
            RouteSource::File(path) => routes::load_route_file(path),
        }
    }

    /// Turn a service source into a container definition mapping
    ///
    /// Container files are read from disk on every call.
    pub fn validate_services(
        &self,
        source: &ServiceSource,
    ) -> Result<ContainerDefinitions, SprinkleError> {
        match source {
            ServiceSource::Definitions(definitions) => Ok(definitions.clone()),
            ServiceSource::File(path) => container::load_container_file(path),
        }
    }

    /// Commands of every sprinkle, concatenated in sprinkle order
    ///
    /// The same command declared by two sprinkles appears twice.
    pub fn collect_commands(
        &self,
        sprinkles: &[Arc<dyn Sprinkle>],
    ) -> Result<Vec<Box<dyn Command>>, SprinkleError> {
        let mut commands = Vec::new();
        for sprinkle in sprinkles {
            for id in sprinkle.commands() {
                trace!("Validating command {} from {}", id, sprinkle.name());
                commands.push(self.validate_command(&id)?);
            }
        }
        debug!("Collected {} commands", commands.len());
        Ok(commands)
    }

    /// Route definitions of every sprinkle, concatenated in sprinkle order
    pub fn collect_routes(
        &self,
        sprinkles: &[Arc<dyn Sprinkle>],
    ) -> Result<Vec<RouteDefinition>, SprinkleError> {
        let mut definitions = Vec::new();
        for sprinkle in sprinkles {
            for source in sprinkle.routes() {
                trace!("Validating route source {:?} from {}", source, sprinkle.name());
                definitions.push(self.validate_route(&source)?);
            }
        }
        debug!("Collected {} route definitions", definitions.len());
        Ok(definitions)
    }

    /// Container definitions of every sprinkle, merged
    ///
    /// Sprinkles are merged in resolved order and on a key collision the
    /// entry merged first wins, so the root overrides its dependencies.
    /// Within one sprinkle, later sources override earlier ones.
    pub fn collect_container_definitions(
        &self,
        sprinkles: &[Arc<dyn Sprinkle>],
    ) -> Result<ContainerDefinitions, SprinkleError> {
        let mut merged = ContainerDefinitions::new();
        for sprinkle in sprinkles {
            let mut own = ContainerDefinitions::new();
            for source in sprinkle.services() {
                trace!("Validating service source {:?} from {}", source, sprinkle.name());
                let mut definitions = self.validate_services(&source)?;
                definitions.merge(own);
                own = definitions;
            }
            merged.merge(own);
        }
        debug!("Collected {} container definitions", merged.len());
        Ok(merged)
    }
}
