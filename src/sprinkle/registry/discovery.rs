//! Sprinkle discovery
//!
//! Scans a sprinkles directory and discovers manifest-backed sprinkles.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::sprinkle::registry::catalog::SprinkleRegistry;
use crate::sprinkle::registry::manifest::{ManifestSprinkle, MANIFEST_FILE};
use crate::sprinkle::traits::SprinkleError;

/// Sprinkle discovery scanner
pub struct SprinkleDiscovery {
    /// Base directory to scan for sprinkles
    sprinkles_dir: PathBuf,
}

impl SprinkleDiscovery {
    /// Create a new sprinkle discovery scanner
    pub fn new<P: AsRef<Path>>(sprinkles_dir: P) -> Self {
        Self {
            sprinkles_dir: sprinkles_dir.as_ref().to_path_buf(),
        }
    }

    /// Discover all sprinkles in the sprinkles directory
    ///
    /// Every sub-directory containing a `sprinkle.toml` is a sprinkle; other
    /// entries are skipped. A manifest that fails to parse aborts discovery.
    /// Results are sorted by directory name.
    pub fn discover_sprinkles(&self) -> Result<Vec<ManifestSprinkle>, SprinkleError> {
        info!("Discovering sprinkles in {:?}", self.sprinkles_dir);

        if !self.sprinkles_dir.is_dir() {
            return Err(SprinkleError::FileNotFound {
                path: self.sprinkles_dir.clone(),
            });
        }

        let mut directories = Vec::new();
        for entry in fs::read_dir(&self.sprinkles_dir)? {
            let path = entry?.path();
            if !path.is_dir() {
                continue;
            }
            if !path.join(MANIFEST_FILE).is_file() {
                debug!("No {} found in {:?}, skipping", MANIFEST_FILE, path);
                continue;
            }
            directories.push(path);
        }
        directories.sort();

        let sprinkles = directories
            .iter()
            .map(ManifestSprinkle::from_dir)
            .collect::<Result<Vec<_>, _>>()?;

        info!("Discovered {} sprinkles", sprinkles.len());
        Ok(sprinkles)
    }

    /// Discover a specific sprinkle by directory name
    pub fn discover_sprinkle(&self, name: &str) -> Result<ManifestSprinkle, SprinkleError> {
        let sprinkle_dir = self.sprinkles_dir.join(name);
        let manifest_path = sprinkle_dir.join(MANIFEST_FILE);

        if !manifest_path.is_file() {
            return Err(SprinkleError::invalid_sprinkle(
                name,
                format!("no {} in {:?}", MANIFEST_FILE, sprinkle_dir),
            ));
        }

        ManifestSprinkle::from_dir(&sprinkle_dir)
    }

    /// Discover every sprinkle and register it, returning how many were added
    pub fn register_all(&self, registry: &mut SprinkleRegistry) -> Result<usize, SprinkleError> {
        let sprinkles = self.discover_sprinkles()?;
        let count = sprinkles.len();
        for sprinkle in sprinkles {
            registry.register_manifest(sprinkle)?;
        }
        Ok(count)
    }
}
