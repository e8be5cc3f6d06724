//! Typed models for Maps API responses

use serde::{Deserialize, Serialize};

/// One geocoding candidate, in the provider's own ranking order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceMatch {
    /// Candidate latitude in degrees
    pub latitude: f64,
    /// Candidate longitude in degrees
    pub longitude: f64,
    /// Human-readable address the provider matched
    pub formatted_address: String,
}

/// Distance and duration of a walking route's single leg
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkingLeg {
    /// Length of the walking path in meters
    pub distance_meters: u32,
    /// Expected walking time in seconds
    pub duration_seconds: u32,
}
