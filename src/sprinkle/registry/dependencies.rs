//! Sprinkle dependency resolution
//!
//! Expands a root sprinkle into the flat, deduplicated list of itself and all
//! its transitive dependencies.
//!
//! Order is depth-first pre-order over declared dependency order: the root
//! first, then each dependency followed by its own dependencies, keeping only
//! the first occurrence of every sprinkle. For `site -> [account, core]` and
//! `account -> [core]` this gives `site, account, core`.

use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, trace};

use crate::sprinkle::registry::catalog::SprinkleRegistry;
use crate::sprinkle::traits::{Sprinkle, SprinkleError};

/// Ordered, deduplicated set of resolved sprinkles
pub type ResolvedSprinkles = Vec<Arc<dyn Sprinkle>>;

/// Dependency resolver
pub struct DependencyResolver<'a> {
    registry: &'a SprinkleRegistry,
}

/// Traversal state for a single `resolve` call
#[derive(Default)]
struct Walk {
    /// Sprinkles on the active recursion path, root first
    path: Vec<String>,
    /// Sprinkles already emitted
    seen: HashSet<String>,
    resolved: ResolvedSprinkles,
}

impl<'a> DependencyResolver<'a> {
    pub fn new(registry: &'a SprinkleRegistry) -> Self {
        Self { registry }
    }

    /// Resolve `root` and all of its transitive dependencies
    ///
    /// Fails with `InvalidSprinkle` for any identifier that is not registered
    /// and with `CyclicDependency` if a sprinkle depends on itself, directly
    /// or transitively. Nothing is returned on failure.
    pub fn resolve(&self, root: &str) -> Result<ResolvedSprinkles, SprinkleError> {
        let mut walk = Walk::default();
        self.expand(root, &mut walk)?;

        debug!(
            "Dependency resolution complete for {}: {:?}",
            root,
            walk.resolved.iter().map(|s| s.name()).collect::<Vec<_>>()
        );
        Ok(walk.resolved)
    }

    fn expand(&self, name: &str, walk: &mut Walk) -> Result<(), SprinkleError> {
        if let Some(start) = walk.path.iter().position(|p| p == name) {
            let mut cycle = walk.path[start..].to_vec();
            cycle.push(name.to_string());
            return Err(SprinkleError::CyclicDependency { path: cycle });
        }

        // Everything reachable from an emitted sprinkle was emitted right after it.
        if walk.seen.contains(name) {
            trace!("Sprinkle {} already resolved", name);
            return Ok(());
        }

        let sprinkle = self.registry.instantiate(name)?;
        let dependencies = sprinkle.dependencies();
        trace!("Expanding sprinkle {}: {:?}", name, dependencies);

        walk.seen.insert(name.to_string());
        walk.resolved.push(sprinkle);
        walk.path.push(name.to_string());

        for dependency in &dependencies {
            self.expand(dependency, walk)?;
        }

        walk.path.pop();
        Ok(())
    }
}
