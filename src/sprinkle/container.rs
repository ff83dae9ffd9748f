//! Service container definitions
//!
//! Sprinkles contribute service definitions as a mapping from service id to
//! [`ServiceDefinition`]. The manager merges the mappings of every resolved
//! sprinkle into one [`ContainerDefinitions`] for the host's DI container.

use serde_json::Value;
use std::any::Any;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use crate::sprinkle::traits::SprinkleError;

/// Factory producing a service instance
pub type ServiceFactory = Arc<dyn Fn() -> Box<dyn Any + Send + Sync> + Send + Sync>;

/// A single service definition
#[derive(Clone)]
pub enum ServiceDefinition {
    /// Literal value (parameters, settings)
    Value(Value),
    /// Reference to another service id
    Alias(String),
    /// Factory invoked by the container
    Factory(ServiceFactory),
}

impl ServiceDefinition {
    pub fn value(value: impl Into<Value>) -> Self {
        ServiceDefinition::Value(value.into())
    }

    pub fn alias(target: impl Into<String>) -> Self {
        ServiceDefinition::Alias(target.into())
    }

    pub fn factory<T, F>(factory: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn() -> T + Send + Sync + 'static,
    {
        ServiceDefinition::Factory(Arc::new(move || Box::new(factory()) as Box<dyn Any + Send + Sync>))
    }

    /// Convert a loaded file entry. A table with a single `alias` string key
    /// becomes an alias; everything else is a literal value.
    fn from_value(value: Value) -> Self {
        if let Value::Object(map) = &value {
            if map.len() == 1 {
                if let Some(Value::String(target)) = map.get("alias") {
                    return ServiceDefinition::Alias(target.clone());
                }
            }
        }
        ServiceDefinition::Value(value)
    }
}

impl fmt::Debug for ServiceDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceDefinition::Value(v) => f.debug_tuple("Value").field(v).finish(),
            ServiceDefinition::Alias(t) => f.debug_tuple("Alias").field(t).finish(),
            ServiceDefinition::Factory(_) => f.write_str("Factory(..)"),
        }
    }
}

/// Mapping of service id to definition
#[derive(Debug, Clone, Default)]
pub struct ContainerDefinitions {
    entries: BTreeMap<String, ServiceDefinition>,
}

impl ContainerDefinitions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, id: impl Into<String>, definition: ServiceDefinition) -> Self {
        self.insert(id, definition);
        self
    }

    /// Insert or replace a definition, returning the previous one
    pub fn insert(
        &mut self,
        id: impl Into<String>,
        definition: ServiceDefinition,
    ) -> Option<ServiceDefinition> {
        self.entries.insert(id.into(), definition)
    }

    pub fn get(&self, id: &str) -> Option<&ServiceDefinition> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Service ids in sorted order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ServiceDefinition)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Merge `other` beneath this mapping
    ///
    /// Entries already present win on key collision; only ids missing here are
    /// taken from `other`.
    pub fn merge(&mut self, other: ContainerDefinitions) {
        for (id, definition) in other.entries {
            self.entries.entry(id).or_insert(definition);
        }
    }

    /// Follow aliases until a non-alias definition is reached
    ///
    /// Returns `None` for unknown ids and for alias loops.
    pub fn resolve(&self, id: &str) -> Option<&ServiceDefinition> {
        let mut seen = HashSet::new();
        let mut current = id;
        loop {
            if !seen.insert(current) {
                return None;
            }
            match self.entries.get(current)? {
                ServiceDefinition::Alias(target) => current = target.as_str(),
                definition => return Some(definition),
            }
        }
    }
}

/// Where a sprinkle's container definitions come from
#[derive(Debug, Clone)]
pub enum ServiceSource {
    /// In-process mapping
    Definitions(ContainerDefinitions),
    /// Container file, loaded on every query
    File(PathBuf),
}

impl ServiceSource {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        ServiceSource::File(path.into())
    }
}

impl From<ContainerDefinitions> for ServiceSource {
    fn from(definitions: ContainerDefinitions) -> Self {
        ServiceSource::Definitions(definitions)
    }
}

/// Load and validate a container file
///
/// `.json` files are parsed as JSON, everything else as TOML. Fails with
/// `FileNotFound` if the path does not exist and with
/// `InvalidContainerDefinition` if the content is not a mapping.
pub fn load_container_file(path: &Path) -> Result<ContainerDefinitions, SprinkleError> {
    if !path.is_file() {
        return Err(SprinkleError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let contents = std::fs::read_to_string(path)?;
    let invalid = |reason: String| SprinkleError::InvalidContainerDefinition {
        path: path.to_path_buf(),
        reason,
    };

    let is_json = path
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));

    let entries = if is_json {
        match serde_json::from_str::<Value>(&contents).map_err(|e| invalid(e.to_string()))? {
            Value::Object(map) => map,
            other => {
                return Err(invalid(format!(
                    "expected a mapping of service ids, found {}",
                    json_kind(&other)
                )))
            }
        }
    } else {
        let table: toml::Table = toml::from_str(&contents).map_err(|e| invalid(e.to_string()))?;
        table
            .into_iter()
            .map(|(id, value)| toml_to_json(value).map(|value| (id, value)))
            .collect::<Result<serde_json::Map<String, Value>, String>>()
            .map_err(invalid)?
    };

    let mut definitions = ContainerDefinitions::new();
    for (id, value) in entries {
        definitions.insert(id, ServiceDefinition::from_value(value));
    }

    debug!("Loaded {} service definitions from {:?}", definitions.len(), path);
    Ok(definitions)
}

/// Convert a TOML value to the JSON value model
///
/// Datetimes become their RFC 3339 string form. Non-finite floats have no
/// JSON form and are rejected.
fn toml_to_json(value: toml::Value) -> Result<Value, String> {
    Ok(match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .ok_or_else(|| format!("float {} has no JSON representation", f))?,
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(toml_to_json)
                .collect::<Result<_, _>>()?,
        ),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(key, value)| toml_to_json(value).map(|value| (key, value)))
                .collect::<Result<_, _>>()?,
        ),
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}
