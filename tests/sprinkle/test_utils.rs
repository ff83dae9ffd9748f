//! Test utilities for sprinkle system testing
//!
//! Provides a temporary sprinkles directory, in-memory mock sprinkles and a
//! few console commands.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

use sprinkle_manager::sprinkle::command::ExitStatus;
use sprinkle_manager::sprinkle::registry::manifest::MANIFEST_FILE;
use sprinkle_manager::{
    Command, CommandInput, CommandOutput, CommandRegistry, ResourceLocation, RouteSource,
    ServiceSource, Sprinkle, SprinkleRegistry,
};

/// Test fixture with an isolated sprinkles directory
pub struct SprinkleTestFixture {
    /// Temporary directory for test data
    pub temp_dir: TempDir,
    /// Sprinkles directory path
    pub sprinkles_dir: PathBuf,
}

impl SprinkleTestFixture {
    /// Create a new test fixture with isolated directories
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let temp_dir = TempDir::new()?;
        let sprinkles_dir = temp_dir.path().join("sprinkles");
        std::fs::create_dir_all(&sprinkles_dir)?;

        Ok(Self {
            temp_dir,
            sprinkles_dir,
        })
    }

    /// Directory of sprinkle `name`
    pub fn sprinkle_dir(&self, name: &str) -> PathBuf {
        self.sprinkles_dir.join(name)
    }

    /// Write `sprinkles/<name>/sprinkle.toml`
    ///
    /// `extra` is appended verbatim after the name and dependencies.
    pub fn create_manifest(
        &self,
        name: &str,
        dependencies: &[&str],
        extra: &str,
    ) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let dependencies = dependencies
            .iter()
            .map(|d| format!("\"{}\"", d))
            .collect::<Vec<_>>()
            .join(", ");
        let contents = format!(
            "name = \"{}\"\nversion = \"1.0.0\"\ndependencies = [{}]\n{}",
            name, dependencies, extra
        );
        self.write_file(&Path::new(name).join(MANIFEST_FILE), &contents)
    }

    /// Write a file relative to the sprinkles directory
    pub fn write_file(
        &self,
        relative: &Path,
        contents: &str,
    ) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let path = self.sprinkles_dir.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, contents)?;
        Ok(path)
    }
}

impl Default for SprinkleTestFixture {
    fn default() -> Self {
        Self::new().expect("Failed to create test fixture")
    }
}

/// Route file with a single GET route
pub fn route_file(path: &str, handler: &str) -> String {
    format!(
        "[[routes]]\nmethod = \"GET\"\npath = \"{}\"\nhandler = \"{}\"\n",
        path, handler
    )
}

/// Mock sprinkle for testing
///
/// Declares whatever it is built with; clones share nothing mutable.
#[derive(Clone, Default)]
pub struct MockSprinkle {
    pub name: String,
    pub dependencies: Vec<String>,
    pub commands: Vec<String>,
    pub routes: Vec<RouteSource>,
    pub services: Vec<ServiceSource>,
    pub resources: Vec<(String, ResourceLocation)>,
}

impl MockSprinkle {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn depends_on(mut self, dependencies: &[&str]) -> Self {
        self.dependencies = dependencies.iter().map(|d| d.to_string()).collect();
        self
    }

    pub fn with_commands(mut self, commands: &[&str]) -> Self {
        self.commands = commands.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn with_route(mut self, source: RouteSource) -> Self {
        self.routes.push(source);
        self
    }

    pub fn with_services(mut self, source: impl Into<ServiceSource>) -> Self {
        self.services.push(source.into());
        self
    }

    pub fn with_resource(mut self, scheme: &str, location: ResourceLocation) -> Self {
        self.resources.push((scheme.to_string(), location));
        self
    }
}

impl Sprinkle for MockSprinkle {
    fn name(&self) -> &str {
        &self.name
    }

    fn dependencies(&self) -> Vec<String> {
        self.dependencies.clone()
    }

    fn commands(&self) -> Vec<String> {
        self.commands.clone()
    }

    fn routes(&self) -> Vec<RouteSource> {
        self.routes.clone()
    }

    fn services(&self) -> Vec<ServiceSource> {
        self.services.clone()
    }

    fn resources(&self) -> Vec<(String, ResourceLocation)> {
        self.resources.clone()
    }
}

/// Registry holding each mock under its own name
pub fn registry_of(sprinkles: Vec<MockSprinkle>) -> SprinkleRegistry {
    let mut registry = SprinkleRegistry::new();
    for sprinkle in sprinkles {
        let id = sprinkle.name.clone();
        registry.register(id, move || sprinkle.clone());
    }
    registry
}

/// Registry counting how often each factory runs
pub fn counting_registry(
    sprinkles: Vec<MockSprinkle>,
) -> (SprinkleRegistry, Arc<AtomicUsize>) {
    let counter = Arc::new(AtomicUsize::new(0));
    let mut registry = SprinkleRegistry::new();
    for sprinkle in sprinkles {
        let id = sprinkle.name.clone();
        let counter = Arc::clone(&counter);
        registry.register(id, move || {
            counter.fetch_add(1, Ordering::SeqCst);
            sprinkle.clone()
        });
    }
    (registry, counter)
}

/// Names of resolved sprinkles
pub fn names(sprinkles: &[Arc<dyn Sprinkle>]) -> Vec<String> {
    sprinkles.iter().map(|s| s.name().to_string()).collect()
}

/// Prints its arguments back
#[derive(Default)]
pub struct EchoCommand;

impl Command for EchoCommand {
    fn name(&self) -> &str {
        "echo"
    }

    fn description(&self) -> &str {
        "Print the arguments"
    }

    fn execute(
        &mut self,
        input: &CommandInput,
        output: &mut CommandOutput,
    ) -> anyhow::Result<ExitStatus> {
        output.writeln(input.arguments().join(" "));
        Ok(0)
    }
}

/// Clears a pretend cache
#[derive(Default)]
pub struct ClearCacheCommand;

impl Command for ClearCacheCommand {
    fn name(&self) -> &str {
        "cache:clear"
    }

    fn execute(
        &mut self,
        input: &CommandInput,
        output: &mut CommandOutput,
    ) -> anyhow::Result<ExitStatus> {
        if input.flag("dry-run") {
            output.writeln("Would clear cache");
            return Ok(0);
        }
        anyhow::ensure!(input.option("store").is_some(), "missing --store");
        output.writeln("Cache cleared");
        Ok(0)
    }
}

/// Object registered as a command that is not one
pub struct NotACommand;

/// Command registry with `echo`, `cache:clear` and the non-command `broken`
pub fn command_registry() -> CommandRegistry {
    let mut commands = CommandRegistry::new();
    commands.register_default::<EchoCommand>("echo");
    commands.register_default::<ClearCacheCommand>("cache:clear");
    commands.register_object("broken", || NotACommand);
    commands
}
