//! Sprinkle registry
//!
//! Maps sprinkle identifiers to factories. This is the only way an identifier
//! becomes a concrete sprinkle: the resolver asks the registry, never the
//! filesystem.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

use crate::sprinkle::registry::manifest::ManifestSprinkle;
use crate::sprinkle::traits::{Sprinkle, SprinkleError};
use crate::sprinkle::validation::ManifestValidator;

/// Factory producing a sprinkle instance
pub type SprinkleFactory = Arc<dyn Fn() -> Arc<dyn Sprinkle> + Send + Sync>;

/// Registry of available sprinkles
#[derive(Clone, Default)]
pub struct SprinkleRegistry {
    factories: HashMap<String, SprinkleFactory>,
}

impl SprinkleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a sprinkle factory under `id`
    ///
    /// Registering the same id twice replaces the earlier factory.
    pub fn register<S, F>(&mut self, id: impl Into<String>, factory: F)
    where
        S: Sprinkle + 'static,
        F: Fn() -> S + Send + Sync + 'static,
    {
        let id = id.into();
        debug!("Registering sprinkle: {}", id);
        self.factories
            .insert(id, Arc::new(move || Arc::new(factory()) as Arc<dyn Sprinkle>));
    }

    /// Register a sprinkle constructed with `Default`
    pub fn register_default<S>(&mut self, id: impl Into<String>)
    where
        S: Sprinkle + Default + 'static,
    {
        self.register(id, S::default);
    }

    /// Validate and register a manifest-backed sprinkle under its own name
    pub fn register_manifest(&mut self, sprinkle: ManifestSprinkle) -> Result<(), SprinkleError> {
        ManifestValidator::new()
            .validate(sprinkle.manifest())
            .into_result(sprinkle.name())?;

        let id = sprinkle.name().to_string();
        debug!(
            "Registering manifest sprinkle: {} ({:?})",
            id,
            sprinkle.directory()
        );
        let shared: Arc<dyn Sprinkle> = Arc::new(sprinkle);
        self.factories
            .insert(id, Arc::new(move || Arc::clone(&shared)));
        Ok(())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.factories.contains_key(id)
    }

    /// Registered identifiers, sorted
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Instantiate the sprinkle registered under `id`
    ///
    /// Fails with `InvalidSprinkle` if nothing is registered under `id` or the
    /// instance reports a different name.
    pub fn instantiate(&self, id: &str) -> Result<Arc<dyn Sprinkle>, SprinkleError> {
        let factory = self
            .factories
            .get(id)
            .ok_or_else(|| SprinkleError::invalid_sprinkle(id, "sprinkle is not registered"))?;

        let sprinkle = factory();
        if sprinkle.name() != id {
            return Err(SprinkleError::invalid_sprinkle(
                id,
                format!("registered factory produced sprinkle {:?}", sprinkle.name()),
            ));
        }

        trace!("Instantiated sprinkle {}", id);
        Ok(sprinkle)
    }
}

impl fmt::Debug for SprinkleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SprinkleRegistry")
            .field("sprinkles", &self.ids())
            .finish()
    }
}
