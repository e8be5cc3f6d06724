//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `pipeline`: reply pipeline tuning
//!
//! Provider settings (`maps`, `transit`, `sms`) are the config types of the
//! respective integration crates; `retry` is [`crate::retry::RetryConfig`].

mod pipeline;
mod server;

use integration_maps::GoogleMapsConfig;
use integration_sms::Fast2SmsConfig;
use integration_transit::TransitApiConfig;
use serde::{Deserialize, Serialize};

use crate::retry::RetryConfig;

pub use pipeline::{MAX_SEARCH_RADIUS_METERS, PipelineConfig};
pub use server::ServerConfig;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Reply pipeline tuning
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Geocoding and walking directions provider
    #[serde(default)]
    pub maps: GoogleMapsConfig,

    /// Transit departures provider
    #[serde(default)]
    pub transit: TransitApiConfig,

    /// SMS gateway
    #[serde(default)]
    pub sms: Fast2SmsConfig,

    /// Retry behavior for provider lookups
    #[serde(default)]
    pub retry: RetryConfig,
}

impl AppConfig {
    /// Load configuration from environment and optional file
    ///
    /// Layers `config.toml` (if present) under `BUSLINE_`-prefixed
    /// environment variables with `__` as the nesting separator, e.g.
    /// `BUSLINE_SERVER__PORT=9090` or `BUSLINE_SMS__API_KEY=...`.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("BUSLINE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Create a configuration suitable for tests
    ///
    /// Provider credentials are placeholders; point the base URLs at a
    /// local mock server before constructing clients.
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            server: ServerConfig::default(),
            pipeline: PipelineConfig::default(),
            maps: GoogleMapsConfig::for_testing(),
            transit: TransitApiConfig::for_testing(),
            sms: Fast2SmsConfig::for_testing(),
            retry: RetryConfig::default(),
        }
    }

    /// Check every section for invalid values
    ///
    /// Collects all problems rather than stopping at the first so a
    /// misconfigured deployment surfaces everything at once.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut problems = Vec::new();

        if let Err(e) = self.server.validate() {
            problems.push(format!("server: {e}"));
        }
        if let Err(e) = self.pipeline.validate() {
            problems.push(format!("pipeline: {e}"));
        }
        if let Err(e) = self.maps.validate() {
            problems.push(format!("maps: {e}"));
        }
        if let Err(e) = self.transit.validate() {
            problems.push(format!("transit: {e}"));
        }
        if let Err(e) = self.sms.validate() {
            problems.push(format!("sms: {e}"));
        }
        if let Err(e) = self.retry.validate() {
            problems.push(format!("retry: {e}"));
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems)
        }
    }
}
