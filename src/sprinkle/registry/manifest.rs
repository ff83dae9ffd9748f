//! Sprinkle manifest parsing
//!
//! Handles parsing `sprinkle.toml` manifests into declarative sprinkles.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::sprinkle::container::ServiceSource;
use crate::sprinkle::resources::ResourceLocation;
use crate::sprinkle::routes::RouteSource;
use crate::sprinkle::traits::{Sprinkle, SprinkleError};

/// Manifest file name looked up in each sprinkle directory
pub const MANIFEST_FILE: &str = "sprinkle.toml";

/// Sprinkle manifest (sprinkle.toml structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SprinkleManifest {
    /// Sprinkle name
    pub name: String,
    /// Sprinkle version (semantic versioning)
    #[serde(default)]
    pub version: Option<String>,
    /// Human-readable description
    #[serde(default)]
    pub description: Option<String>,
    /// Sprinkles this one depends on, in order
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Command identifiers
    #[serde(default)]
    pub commands: Vec<String>,
    /// Route files, relative to the manifest directory
    #[serde(default)]
    pub routes: Vec<PathBuf>,
    /// Container files, relative to the manifest directory
    #[serde(default)]
    pub services: Vec<PathBuf>,
    /// Resource locations
    #[serde(default)]
    pub resources: Vec<ManifestResource>,
}

/// `[[resources]]` entry of a manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestResource {
    pub scheme: String,
    /// Location name, defaults to the sprinkle name
    #[serde(default)]
    pub name: Option<String>,
    /// Location root, relative to the manifest directory
    pub path: PathBuf,
    #[serde(default)]
    pub shared: bool,
}

impl SprinkleManifest {
    /// Load manifest from file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SprinkleError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            SprinkleError::InvalidManifest(format!(
                "Failed to read manifest file {:?}: {}",
                path, e
            ))
        })?;

        Self::from_toml(&contents).map_err(|e| match e {
            SprinkleError::InvalidManifest(msg) => {
                SprinkleError::InvalidManifest(format!("{:?}: {}", path, msg))
            }
            other => other,
        })
    }

    /// Parse manifest from TOML text
    pub fn from_toml(contents: &str) -> Result<Self, SprinkleError> {
        let manifest: SprinkleManifest = toml::from_str(contents).map_err(|e| {
            SprinkleError::InvalidManifest(format!("Failed to parse manifest TOML: {}", e))
        })?;

        if manifest.name.is_empty() {
            return Err(SprinkleError::InvalidManifest(
                "Sprinkle name cannot be empty".to_string(),
            ));
        }

        Ok(manifest)
    }
}

/// Sprinkle backed by a manifest
#[derive(Debug, Clone)]
pub struct ManifestSprinkle {
    manifest: SprinkleManifest,
    /// Directory relative paths resolve against
    directory: PathBuf,
}

impl ManifestSprinkle {
    pub fn new<P: AsRef<Path>>(manifest: SprinkleManifest, directory: P) -> Self {
        Self {
            manifest,
            directory: directory.as_ref().to_path_buf(),
        }
    }

    /// Load `sprinkle.toml` from `directory`
    pub fn from_dir<P: AsRef<Path>>(directory: P) -> Result<Self, SprinkleError> {
        let directory = directory.as_ref();
        let manifest = SprinkleManifest::from_file(directory.join(MANIFEST_FILE))?;
        Ok(Self::new(manifest, directory))
    }

    pub fn manifest(&self) -> &SprinkleManifest {
        &self.manifest
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.directory.join(path)
        }
    }
}

impl Sprinkle for ManifestSprinkle {
    fn name(&self) -> &str {
        &self.manifest.name
    }

    fn dependencies(&self) -> Vec<String> {
        self.manifest.dependencies.clone()
    }

    fn commands(&self) -> Vec<String> {
        self.manifest.commands.clone()
    }

    fn routes(&self) -> Vec<RouteSource> {
        self.manifest
            .routes
            .iter()
            .map(|p| RouteSource::File(self.resolve_path(p)))
            .collect()
    }

    fn services(&self) -> Vec<ServiceSource> {
        self.manifest
            .services
            .iter()
            .map(|p| ServiceSource::File(self.resolve_path(p)))
            .collect()
    }

    fn resources(&self) -> Vec<(String, ResourceLocation)> {
        self.manifest
            .resources
            .iter()
            .map(|r| {
                let name = r.name.clone().unwrap_or_else(|| self.manifest.name.clone());
                let location =
                    ResourceLocation::new(name, self.resolve_path(&r.path)).with_shared(r.shared);
                (r.scheme.clone(), location)
            })
            .collect()
    }
}
