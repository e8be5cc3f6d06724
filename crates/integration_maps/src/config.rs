//! Maps client configuration

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Configuration for the Google Maps Geocoding and Directions APIs
#[derive(Clone, Serialize, Deserialize)]
pub struct GoogleMapsConfig {
    /// API key (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Base URL for the Maps APIs
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Connection timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Response language code
    #[serde(default = "default_language")]
    pub language: String,

    /// Geocode cache TTL in minutes (0 to disable caching)
    #[serde(default = "default_cache_ttl_minutes")]
    pub cache_ttl_minutes: u32,

    /// Optional region bias as a ccTLD code (e.g. "in")
    #[serde(default)]
    pub region: Option<String>,
}

impl std::fmt::Debug for GoogleMapsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleMapsConfig")
            .field(
                "api_key",
                &if self.api_key.is_some() {
                    Some("[REDACTED]")
                } else {
                    None
                },
            )
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("language", &self.language)
            .field("cache_ttl_minutes", &self.cache_ttl_minutes)
            .field("region", &self.region)
            .finish()
    }
}

fn default_base_url() -> String {
    "https://maps.googleapis.com/maps/api".to_string()
}

const fn default_timeout_secs() -> u64 {
    5
}

fn default_language() -> String {
    "en".to_string()
}

const fn default_cache_ttl_minutes() -> u32 {
    1440
}

impl Default for GoogleMapsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            language: default_language(),
            cache_ttl_minutes: default_cache_ttl_minutes(),
            region: None,
        }
    }
}

impl GoogleMapsConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            api_key: Some(SecretString::from("test-key")),
            cache_ttl_minutes: 0,
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns a message naming the offending field.
    pub fn validate(&self) -> Result<(), String> {
        if self
            .api_key
            .as_ref()
            .is_none_or(|key| key.expose_secret().is_empty())
        {
            return Err("maps.api_key must be set".to_string());
        }
        if self.base_url.is_empty() {
            return Err("maps.base_url must not be empty".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("maps.timeout_secs must be at least 1".to_string());
        }
        Ok(())
    }

    /// Check if geocode caching is enabled
    #[must_use]
    pub const fn caching_enabled(&self) -> bool {
        self.cache_ttl_minutes > 0
    }
}
