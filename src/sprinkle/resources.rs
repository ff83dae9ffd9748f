//! Resource locations
//!
//! A [`ResourceLocation`] is a named filesystem root. Locations are registered
//! under a scheme (`templates`, `config`, `locale`, ...) in a
//! [`ResourceLocator`] owned by the composition root.
//!
//! A non-shared location is a sprinkle root: `scheme://file` resolves to
//! `<path>/<scheme>/file`. A shared location points straight at a directory
//! shared across sprinkles: `scheme://file` resolves to `<path>/file`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Named, possibly shared, filesystem location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLocation {
    name: String,
    path: PathBuf,
    #[serde(default)]
    shared: bool,
}

impl ResourceLocation {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            shared: false,
        }
    }

    pub fn with_shared(mut self, shared: bool) -> Self {
        self.shared = shared;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_shared(&self) -> bool {
        self.shared
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = name.into();
        self
    }

    pub fn set_path(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.path = path.into();
        self
    }

    pub fn set_shared(&mut self, shared: bool) -> &mut Self {
        self.shared = shared;
        self
    }

    /// Candidate path of `relative` under this location for `scheme`
    pub fn resolve(&self, scheme: &str, relative: &str) -> PathBuf {
        let relative = relative.trim_start_matches('/');
        if self.shared {
            self.path.join(relative)
        } else {
            self.path.join(scheme).join(relative)
        }
    }
}

/// Registry of resource locations keyed by scheme
///
/// Locations registered later are searched first.
#[derive(Debug, Clone, Default)]
pub struct ResourceLocator {
    schemes: BTreeMap<String, Vec<ResourceLocation>>,
}

impl ResourceLocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a location under `scheme`
    ///
    /// A location with the same name already registered under the scheme is
    /// replaced and moves to the front of the search order.
    pub fn register_location(&mut self, scheme: impl Into<String>, location: ResourceLocation) {
        let scheme = scheme.into();
        debug!(
            "Registering resource location {} for scheme {}: {:?}",
            location.name(),
            scheme,
            location.path()
        );
        let locations = self.schemes.entry(scheme).or_default();
        locations.retain(|l| l.name() != location.name());
        locations.push(location);
    }

    /// Remove a location from `scheme`, returning it
    pub fn unregister_location(&mut self, scheme: &str, name: &str) -> Option<ResourceLocation> {
        let locations = self.schemes.get_mut(scheme)?;
        let index = locations.iter().position(|l| l.name() == name)?;
        let removed = locations.remove(index);
        if locations.is_empty() {
            self.schemes.remove(scheme);
        }
        Some(removed)
    }

    /// Remove a scheme and all its locations
    pub fn unregister_scheme(&mut self, scheme: &str) -> Vec<ResourceLocation> {
        self.schemes.remove(scheme).unwrap_or_default()
    }

    pub fn is_registered(&self, scheme: &str) -> bool {
        self.schemes.contains_key(scheme)
    }

    pub fn schemes(&self) -> impl Iterator<Item = &str> {
        self.schemes.keys().map(String::as_str)
    }

    /// Locations of `scheme` in search order
    pub fn locations(&self, scheme: &str) -> Vec<&ResourceLocation> {
        self.schemes
            .get(scheme)
            .map(|l| l.iter().rev().collect())
            .unwrap_or_default()
    }

    /// First existing path for `scheme://relative`
    pub fn find(&self, scheme: &str, relative: &str) -> Option<PathBuf> {
        self.find_all(scheme, relative).into_iter().next()
    }

    /// Every existing path for `scheme://relative`, in search order
    pub fn find_all(&self, scheme: &str, relative: &str) -> Vec<PathBuf> {
        self.locations(scheme)
            .into_iter()
            .map(|location| location.resolve(scheme, relative))
            .filter(|candidate| {
                let exists = candidate.exists();
                trace!("Resource candidate {:?} exists: {}", candidate, exists);
                exists
            })
            .collect()
    }
}
