//! # Service Settings
//!
//! Environment-driven configuration for the service binary.
//!
//! Values come from defaults overridden by `ROUTER_*` environment
//! variables (`ROUTER_BIND_ADDR`, `ROUTER_FETCH_TIMEOUT_MS`). A `.env`
//! file is honored when present.

use serde::Deserialize;

/// Runtime configuration of the router service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Socket address the REST API binds to.
    pub bind_addr: String,
    /// Per-request timeout for venue ticker calls, in milliseconds.
    pub fetch_timeout_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            fetch_timeout_ms: 5000,
        }
    }
}

impl Settings {
    /// Loads settings from the environment.
    ///
    /// # Errors
    ///
    /// Returns a [`config::ConfigError`] if an override does not parse
    /// into the expected type.
    pub fn load() -> Result<Self, config::ConfigError> {
        let defaults = Self::default();

        config::Config::builder()
            .set_default("bind_addr", defaults.bind_addr)?
            .set_default("fetch_timeout_ms", defaults.fetch_timeout_ms as i64)?
            .add_source(config::Environment::with_prefix("ROUTER"))
            .build()?
            .try_deserialize()
    }
}
