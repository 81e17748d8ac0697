//! Logging initialization.

use crate::ObservabilityConfig;
use tesoro_core::{TesoroError, TesoroResult};
use tracing_subscriber::EnvFilter;

/// Initializes the global tracing subscriber from configuration.
///
/// `RUST_LOG` takes precedence over the configured log level. Fails if a
/// global subscriber is already installed.
pub fn init_logging(config: &ObservabilityConfig) -> TesoroResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| TesoroError::configuration(format!("Invalid log filter: {}", e)))?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = if config.log_format == "json" {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| TesoroError::configuration(format!("Failed to initialize logging: {}", e)))
}
