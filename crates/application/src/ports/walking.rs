//! Port for computing walking routes between two points.

use async_trait::async_trait;
use domain::Coordinate;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// A provider-computed walking leg between two coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WalkingRoute {
    /// Length of the walking path in meters.
    pub distance_meters: f64,
    /// Expected walking time in seconds.
    pub duration_seconds: u32,
}

/// Computes walking-mode routes between two coordinates.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WalkingDirectionsPort: Send + Sync {
    /// Walking route from `origin` to `destination`.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::RouteUnavailable`] when the provider reports
    /// that no walking path exists, and
    /// [`PipelineError::ProviderUnavailable`] when the call cannot be
    /// completed. The walk estimator treats either as the cue to fall back
    /// to straight-line distance.
    async fn walking_route(
        &self,
        origin: &Coordinate,
        destination: &Coordinate,
    ) -> Result<WalkingRoute, PipelineError>;
}
