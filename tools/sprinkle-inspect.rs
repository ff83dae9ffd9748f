//! Inspect a sprinkles directory
//!
//! Discovers manifest sprinkles, resolves the main sprinkle's dependency set and
//! prints what each sprinkle contributes. With `--check`, route and container
//! files are loaded and validated as the host would at boot.
//!
//! Usage:
//!   sprinkle-inspect --dir app/sprinkles --root site [--check]

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info};

use sprinkle_manager::sprinkle::RouteTable;
use sprinkle_manager::utils::init_logging_from_config;
use sprinkle_manager::{
    CommandRegistry, LoggingConfig, ManagerConfig, SprinkleManager, SprinkleRegistry,
};

#[derive(Parser, Debug)]
#[command(name = "sprinkle-inspect", about = "Resolve and inspect sprinkles")]
struct Args {
    /// Configuration file (.toml or .json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Sprinkles directory (overrides config and SPRINKLE_DIR)
    #[arg(long)]
    dir: Option<String>,

    /// Main sprinkle (overrides config and SPRINKLE_ROOT)
    #[arg(long)]
    root: Option<String>,

    /// Load and validate route and container files
    #[arg(long)]
    check: bool,

    /// Log filter (e.g. "debug")
    #[arg(long)]
    log: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ManagerConfig::from_file(path)?,
        None => ManagerConfig::default(),
    };
    config.apply_env_overrides();
    if let Some(dir) = args.dir {
        config.sprinkles_dir = Some(dir);
    }
    if let Some(root) = args.root {
        config.root = root;
    }
    if let Some(filter) = args.log {
        config.logging = Some(LoggingConfig {
            filter: Some(filter),
            ..config.logging.unwrap_or_default()
        });
    }
    config.validate()?;

    init_logging_from_config(config.logging.as_ref());
    debug!("Configuration: {:?}", config);

    let manager = SprinkleManager::from_config(&config, SprinkleRegistry::new(), CommandRegistry::new())
        .with_context(|| format!("Failed to load main sprinkle {}", config.root))?;

    println!("Sprinkles ({}):", manager.sprinkles().len());
    for sprinkle in manager.sprinkles() {
        let dependencies = sprinkle.dependencies();
        if dependencies.is_empty() {
            println!("  {}", sprinkle.name());
        } else {
            println!("  {} -> {}", sprinkle.name(), dependencies.join(", "));
        }

        for command in sprinkle.commands() {
            println!("    command  {}", command);
        }
        println!(
            "    routes   {} source(s), services {} source(s), resources {}",
            sprinkle.routes().len(),
            sprinkle.services().len(),
            sprinkle.resources().len()
        );
    }

    if !args.check {
        return Ok(());
    }

    info!("Validating route and container files");

    let mut table = RouteTable::new();
    for definition in manager.routes()? {
        debug!("Registering routes from {}", definition.origin());
        definition.register(&mut table);
    }
    println!("Routes ({}):", table.len());
    for route in table.routes() {
        println!("  {:?} {} => {}", route.method, route.path, route.handler);
    }

    let container = manager.container_definitions()?;
    println!("Services ({}):", container.len());
    for id in container.ids() {
        println!("  {}", id);
    }

    Ok(())
}
