//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Latitude or longitude outside the valid range
    #[error("Invalid coordinates: latitude {latitude} must be -90 to 90, longitude {longitude} must be -180 to 180")]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    /// Token is not a recognizable route identifier
    #[error("Invalid route identifier: {0}")]
    InvalidRouteId(String),

    /// Estimate carries values that violate its invariants
    #[error("Invalid estimate: {0}")]
    InvalidEstimate(String),
}
