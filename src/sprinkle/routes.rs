//! Route definitions
//!
//! A sprinkle contributes routes either as an in-process registration function
//! or as a route file. Both end up as a [`RouteDefinition`]: a callable that
//! registers routes on a [`Router`] when the host invokes it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use crate::sprinkle::traits::SprinkleError;

/// HTTP method of a route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Options,
    Head,
    /// Matches every method
    Any,
}

/// A single route registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub method: Method,
    pub path: String,
    /// Handler identifier, resolved by the host's container
    pub handler: String,
}

/// Registration target for route definitions
///
/// Implemented by the host's HTTP router.
pub trait Router {
    fn add_route(&mut self, route: Route);
}

/// In-memory router that records every registered route
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Last registered route matching method and path
    ///
    /// Routes registered later shadow earlier ones, the way most routers
    /// resolve duplicate patterns.
    pub fn find(&self, method: Method, path: &str) -> Option<&Route> {
        self.routes
            .iter()
            .rev()
            .find(|r| r.path == path && (r.method == method || r.method == Method::Any))
    }
}

impl Router for RouteTable {
    fn add_route(&mut self, route: Route) {
        self.routes.push(route);
    }
}

type RegisterFn = dyn Fn(&mut dyn Router) + Send + Sync;

/// A validated, invokable route definition
#[derive(Clone)]
pub struct RouteDefinition {
    origin: String,
    register: Arc<RegisterFn>,
}

impl RouteDefinition {
    /// Create a route definition from a registration function
    ///
    /// `origin` names where the definition came from (sprinkle or file) and
    /// only appears in diagnostics.
    pub fn new<F>(origin: impl Into<String>, register: F) -> Self
    where
        F: Fn(&mut dyn Router) + Send + Sync + 'static,
    {
        Self {
            origin: origin.into(),
            register: Arc::new(register),
        }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Register this definition's routes on `router`
    pub fn register(&self, router: &mut dyn Router) {
        (self.register)(router)
    }
}

impl fmt::Debug for RouteDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteDefinition")
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}

/// Where a sprinkle's routes come from
#[derive(Debug, Clone)]
pub enum RouteSource {
    /// In-process registration function
    Registrar(RouteDefinition),
    /// Route file, loaded on every query
    File(PathBuf),
}

impl RouteSource {
    pub fn registrar<F>(origin: impl Into<String>, register: F) -> Self
    where
        F: Fn(&mut dyn Router) + Send + Sync + 'static,
    {
        RouteSource::Registrar(RouteDefinition::new(origin, register))
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        RouteSource::File(path.into())
    }
}

/// Route file (TOML)
///
/// ```toml
/// prefix = "/account"
///
/// [[routes]]
/// method = "GET"
/// path = "/login"
/// handler = "account.login"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct RouteFile {
    #[serde(default)]
    prefix: Option<String>,
    routes: Vec<Route>,
}

/// Load and validate a route file
///
/// Fails with `FileNotFound` if the path does not exist and with
/// `InvalidRouteDefinition` if the content is not a route table.
pub fn load_route_file(path: &Path) -> Result<RouteDefinition, SprinkleError> {
    if !path.is_file() {
        return Err(SprinkleError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let contents = std::fs::read_to_string(path)?;
    let invalid = |reason: String| SprinkleError::InvalidRouteDefinition {
        path: path.to_path_buf(),
        reason,
    };

    let file: RouteFile = toml::from_str(&contents).map_err(|e| invalid(e.to_string()))?;

    let prefix = match file.prefix {
        Some(prefix) if !prefix.starts_with('/') => {
            return Err(invalid(format!("prefix must start with '/': {}", prefix)));
        }
        Some(prefix) => prefix.trim_end_matches('/').to_string(),
        None => String::new(),
    };

    let mut routes = Vec::with_capacity(file.routes.len());
    for route in file.routes {
        if !route.path.starts_with('/') {
            return Err(invalid(format!("route path must start with '/': {}", route.path)));
        }
        if route.handler.trim().is_empty() {
            return Err(invalid(format!("route {} has an empty handler", route.path)));
        }
        routes.push(Route {
            path: format!("{}{}", prefix, route.path),
            ..route
        });
    }

    debug!("Loaded {} routes from {:?}", routes.len(), path);

    Ok(RouteDefinition::new(path.display().to_string(), move |router| {
        for route in &routes {
            router.add_route(route.clone());
        }
    }))
}
