//! Walking and bus-arrival estimate value objects

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Walking leg from the rider's position to a bus stop
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WalkEstimate {
    /// Walking distance in meters
    distance_meters: f64,
    /// Walking duration in seconds
    duration_seconds: u32,
    /// True when derived from straight-line distance instead of a walking route
    approximate: bool,
}

impl WalkEstimate {
    /// Create an estimate from a provider-computed walking route
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidEstimate` when the distance is negative
    /// or not finite.
    pub fn from_route(distance_meters: f64, duration_seconds: u32) -> Result<Self, DomainError> {
        Self::new(distance_meters, duration_seconds, false)
    }

    /// Create a straight-line fallback estimate, flagged approximate
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidEstimate` when the distance is negative
    /// or not finite.
    pub fn approximate(distance_meters: f64, duration_seconds: u32) -> Result<Self, DomainError> {
        Self::new(distance_meters, duration_seconds, true)
    }

    fn new(
        distance_meters: f64,
        duration_seconds: u32,
        approximate: bool,
    ) -> Result<Self, DomainError> {
        if !distance_meters.is_finite() || distance_meters < 0.0 {
            return Err(DomainError::InvalidEstimate(format!(
                "walking distance must be a non-negative number, got {distance_meters}"
            )));
        }
        Ok(Self {
            distance_meters,
            duration_seconds,
            approximate,
        })
    }

    /// Walking distance in meters
    #[must_use]
    pub const fn distance_meters(&self) -> f64 {
        self.distance_meters
    }

    /// Walking duration in seconds
    #[must_use]
    pub const fn duration_seconds(&self) -> u32 {
        self.duration_seconds
    }

    /// Whether the numbers come from the straight-line fallback
    #[must_use]
    pub const fn is_approximate(&self) -> bool {
        self.approximate
    }

    /// Duration rounded to whole minutes for display (at least 1 when non-zero)
    #[must_use]
    pub const fn duration_minutes(&self) -> u32 {
        round_minutes(self.duration_seconds)
    }
}

/// Estimated time until the next bus arrives at a stop
///
/// The confidence tier is the variant itself: `Unknown` carries no number,
/// so "no data" can never be mistaken for a zero-second arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "confidence", rename_all = "snake_case")]
pub enum BusEtaEstimate {
    /// Derived from realtime vehicle data
    Live { eta_seconds: u32 },
    /// Derived from the static schedule
    Scheduled { eta_seconds: u32 },
    /// No live or scheduled signal available
    Unknown,
}

impl BusEtaEstimate {
    /// Seconds until arrival, when known
    #[must_use]
    pub const fn eta_seconds(&self) -> Option<u32> {
        match self {
            Self::Live { eta_seconds } | Self::Scheduled { eta_seconds } => Some(*eta_seconds),
            Self::Unknown => None,
        }
    }

    /// Minutes until arrival, rounded for display, when known
    #[must_use]
    pub const fn eta_minutes(&self) -> Option<u32> {
        match self.eta_seconds() {
            Some(secs) => Some(round_minutes(secs)),
            None => None,
        }
    }

    /// Whether any arrival signal is available
    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// Confidence tier label for logs and metrics
    #[must_use]
    pub const fn confidence(&self) -> &'static str {
        match self {
            Self::Live { .. } => "live",
            Self::Scheduled { .. } => "scheduled",
            Self::Unknown => "unknown",
        }
    }
}

/// Round seconds to whole minutes, never reporting 0 for a non-zero duration
const fn round_minutes(seconds: u32) -> u32 {
    if seconds == 0 {
        return 0;
    }
    let rounded = (seconds + 30) / 60;
    if rounded == 0 { 1 } else { rounded }
}
