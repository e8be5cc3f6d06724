//! Reply pipeline tuning.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Widest stop search radius the transit provider accepts
pub const MAX_SEARCH_RADIUS_METERS: u32 = 50_000;

/// Tuning for the inbound-SMS reply pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Radius around the geocoded location to search for stops, in meters
    #[serde(default = "default_search_radius")]
    pub search_radius_meters: u32,

    /// Walking speed used when directions are unavailable, in meters/second
    #[serde(default = "default_walking_speed")]
    pub walking_speed_mps: f64,

    /// Overall deadline for handling one inbound message, in seconds
    #[serde(default = "default_request_deadline")]
    pub request_deadline_secs: u64,

    /// How far ahead to ask the transit provider for departures, in minutes
    #[serde(default = "default_departure_window")]
    pub departure_window_minutes: u32,
}

const fn default_search_radius() -> u32 {
    1_000
}

const fn default_walking_speed() -> f64 {
    1.4
}

const fn default_request_deadline() -> u64 {
    10
}

const fn default_departure_window() -> u32 {
    60
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            search_radius_meters: default_search_radius(),
            walking_speed_mps: default_walking_speed(),
            request_deadline_secs: default_request_deadline(),
            departure_window_minutes: default_departure_window(),
        }
    }
}

impl PipelineConfig {
    /// Overall per-message deadline as a `Duration`
    #[must_use]
    pub const fn request_deadline(&self) -> Duration {
        Duration::from_secs(self.request_deadline_secs)
    }

    /// Check the configuration for invalid values
    pub fn validate(&self) -> Result<(), String> {
        if self.search_radius_meters == 0 {
            return Err("pipeline search_radius_meters must be at least 1".to_string());
        }
        if self.search_radius_meters > MAX_SEARCH_RADIUS_METERS {
            return Err(format!(
                "pipeline search_radius_meters ({}) exceeds the provider maximum ({MAX_SEARCH_RADIUS_METERS})",
                self.search_radius_meters
            ));
        }
        if !self.walking_speed_mps.is_finite() || self.walking_speed_mps <= 0.0 {
            return Err(format!(
                "pipeline walking_speed_mps must be a positive number, got {}",
                self.walking_speed_mps
            ));
        }
        if self.request_deadline_secs == 0 {
            return Err("pipeline request_deadline_secs must be at least 1".to_string());
        }
        if self.departure_window_minutes == 0 {
            return Err("pipeline departure_window_minutes must be at least 1".to_string());
        }
        Ok(())
    }
}
