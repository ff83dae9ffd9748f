//! Logging initialization
//!
//! - Respects the RUST_LOG environment variable
//! - Falls back to the configured filter, then to "info"
//! - Respects NO_COLOR
//!
//! # Usage
//! ```rust,no_run
//! use sprinkle_manager::utils::init_logging;
//!
//! init_logging(None); // Uses RUST_LOG or defaults to "info"
//! ```

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;
use crate::utils::env_opt;

/// Default filter when neither RUST_LOG nor a configured filter is present
pub const DEFAULT_FILTER: &str = "info";

/// Pick the filter directive: RUST_LOG, then `configured`, then the default
fn select_filter(rust_log: Option<String>, configured: Option<&str>) -> String {
    rust_log
        .or_else(|| configured.map(str::to_string))
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

/// Initialize human-readable logging
///
/// # Arguments
/// * `filter` - Optional log filter from config (e.g. "debug",
///   "sprinkle_manager::sprinkle=trace"). RUST_LOG takes precedence.
pub fn init_logging(filter: Option<&str>) {
    let env_filter = EnvFilter::new(select_filter(env_opt("RUST_LOG"), filter));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_ansi(env_opt("NO_COLOR").is_none()),
        )
        .with(env_filter)
        .init();
}

/// Initialize logging with JSON output (for log aggregation)
#[cfg(feature = "json-logging")]
pub fn init_json_logging(filter: Option<&str>) {
    let env_filter = EnvFilter::new(select_filter(env_opt("RUST_LOG"), filter));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .json()
                .with_target(true)
                .with_current_span(true)
                .with_span_list(true),
        )
        .with(env_filter)
        .init();
}

/// Initialize logging from the manager's `LoggingConfig`
pub fn init_logging_from_config(config: Option<&LoggingConfig>) {
    let filter = config.and_then(|c| c.filter.as_deref());

    if config.map(|c| c.json_format).unwrap_or(false) {
        #[cfg(feature = "json-logging")]
        {
            init_json_logging(filter);
        }
        #[cfg(not(feature = "json-logging"))]
        {
            // Fall back to regular logging if json-logging feature not enabled
            init_logging(filter);
        }
    } else {
        init_logging(filter);
    }
}
