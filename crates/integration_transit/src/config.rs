//! Transit API configuration

use serde::{Deserialize, Serialize};

/// Configuration for the transit data provider (transport.rest / HAFAS)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitApiConfig {
    /// Base URL for the transport.rest API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Connection timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum number of nearby stops to request
    #[serde(default = "default_max_results")]
    pub max_results: u8,
}

fn default_base_url() -> String {
    "https://v6.db.transport.rest".to_string()
}

const fn default_timeout_secs() -> u64 {
    5
}

const fn default_max_results() -> u8 {
    10
}

impl Default for TransitApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            max_results: default_max_results(),
        }
    }
}

impl TransitApiConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 5,
            max_results: 5,
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if self.max_results == 0 {
            return Err("max_results must be greater than 0".to_string());
        }

        Ok(())
    }
}
