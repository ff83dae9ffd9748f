//! Command registry
//!
//! Maps command identifiers to factories. Construction and the capability
//! check are separate steps: a factory may produce any object, and only types
//! registered through [`CommandRegistry::register`] are known to implement
//! [`Command`]. Everything else fails validation with `InvalidCommand`.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use tracing::{debug, trace, warn};

use crate::sprinkle::command::console::Command;
use crate::sprinkle::traits::SprinkleError;

/// Capability name reported in `InvalidCommand` errors
pub const COMMAND_CAPABILITY: &str = "Command";

type AnyObject = Box<dyn Any + Send>;
type Factory = Box<dyn Fn() -> AnyObject + Send + Sync>;
type Upcast = fn(AnyObject) -> Result<Box<dyn Command>, AnyObject>;

/// Registry of constructible command objects
#[derive(Default)]
pub struct CommandRegistry {
    factories: HashMap<String, Factory>,
    /// Concrete types known to implement `Command`
    capabilities: HashMap<TypeId, Upcast>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command type under `id`
    pub fn register<C, F>(&mut self, id: impl Into<String>, factory: F)
    where
        C: Command + 'static,
        F: Fn() -> C + Send + Sync + 'static,
    {
        let id = id.into();
        debug!("Registering command: {}", id);
        self.capabilities.insert(TypeId::of::<C>(), upcast::<C>);
        self.factories
            .insert(id, Box::new(move || Box::new(factory()) as AnyObject));
    }

    /// Register a command type constructed with `Default`
    pub fn register_default<C>(&mut self, id: impl Into<String>)
    where
        C: Command + Default + 'static,
    {
        self.register(id, C::default);
    }

    /// Register an arbitrary object factory under `id`
    ///
    /// The object only passes validation if its concrete type was also
    /// registered as a command.
    pub fn register_object<T, F>(&mut self, id: impl Into<String>, factory: F)
    where
        T: Any + Send,
        F: Fn() -> T + Send + Sync + 'static,
    {
        let id = id.into();
        debug!("Registering command object: {}", id);
        self.factories
            .insert(id, Box::new(move || Box::new(factory()) as AnyObject));
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

    /// Construct the object registered under `id` and check it is a `Command`
    pub fn construct(&self, id: &str) -> Result<Box<dyn Command>, SprinkleError> {
        let invalid = || SprinkleError::InvalidCommand {
            command: id.to_string(),
            expected: COMMAND_CAPABILITY,
        };

        let factory = self.factories.get(id).ok_or_else(|| {
            warn!("Command {} is not registered", id);
            invalid()
        })?;

        let object = factory();
        let type_id = (*object).type_id();
        let upcast = self.capabilities.get(&type_id).ok_or_else(|| {
            warn!("Command {} does not implement {}", id, COMMAND_CAPABILITY);
            invalid()
        })?;

        let command = upcast(object).map_err(|_| invalid())?;
        trace!("Constructed command {} ({})", id, command.name());
        Ok(command)
    }
}

fn upcast<C: Command + 'static>(object: AnyObject) -> Result<Box<dyn Command>, AnyObject> {
    object.downcast::<C>().map(|command| command as Box<dyn Command>)
}
