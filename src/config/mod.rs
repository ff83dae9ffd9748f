//! Configuration management for the sprinkle manager
//!
//! Handles configuration loading, environment overrides and validation.

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::utils::env_opt;

/// Environment variable overriding the main sprinkle
pub const ROOT_ENV: &str = "SPRINKLE_ROOT";

/// Environment variable overriding the sprinkles directory
pub const SPRINKLES_DIR_ENV: &str = "SPRINKLE_DIR";

/// Logging configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log filter (e.g. "info", "sprinkle_manager=debug")
    ///
    /// RUST_LOG takes precedence when set.
    #[serde(default)]
    pub filter: Option<String>,

    /// Emit JSON log lines (requires the `json-logging` feature)
    #[serde(default)]
    pub json_format: bool,
}

/// Sprinkle manager configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerConfig {
    /// Main sprinkle name
    #[serde(default = "default_root")]
    pub root: String,

    /// Directory scanned for manifest sprinkles (none = registered sprinkles only)
    #[serde(default)]
    pub sprinkles_dir: Option<String>,

    /// Logging configuration
    #[serde(default)]
    pub logging: Option<LoggingConfig>,
}

fn default_root() -> String {
    "app".to_string()
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            sprinkles_dir: Some("sprinkles".to_string()),
            logging: None,
        }
    }
}

impl ManagerConfig {
    /// Load configuration from JSON file
    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: ManagerConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON config {:?}", path))?;
        Ok(config)
    }

    /// Save configuration to JSON file
    pub fn to_json_file(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file {:?}", path))?;
        Ok(())
    }

    /// Load configuration from TOML file
    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: ManagerConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config {:?}", path))?;
        Ok(config)
    }

    /// Load configuration, picking the format from the file extension
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_file(path),
            Some("toml") => Self::from_toml_file(path),
            other => bail!("Unsupported config format {:?} for {:?}", other, path),
        }
    }

    /// Apply SPRINKLE_ROOT / SPRINKLE_DIR overrides
    pub fn apply_env_overrides(&mut self) {
        if let Some(root) = env_opt(ROOT_ENV) {
            self.root = root;
        }
        if let Some(dir) = env_opt(SPRINKLES_DIR_ENV) {
            self.sprinkles_dir = Some(dir);
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.root.trim().is_empty() {
            bail!("Main sprinkle name cannot be empty");
        }
        if let Some(dir) = &self.sprinkles_dir {
            if dir.trim().is_empty() {
                bail!("Sprinkles directory cannot be empty; omit it to disable discovery");
            }
        }
        Ok(())
    }
}
