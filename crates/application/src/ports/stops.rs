//! Port for querying bus stops around a point.

use async_trait::async_trait;
use domain::{BusStop, Coordinate};
#[cfg(test)]
use mockall::automock;

use crate::error::PipelineError;

/// Looks up bus stops near a coordinate.
///
/// Implementations return stops ordered nearest-first, each carrying the
/// full set of routes it services. That ordering is load-bearing: the stop
/// locator takes the first stop servicing the requested route.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait NearbyStopsPort: Send + Sync {
    /// Stops within `radius_meters` of `center`, nearest first.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::ProviderUnavailable`] when the stop data
    /// provider cannot be reached or answers with an unusable payload.
    async fn nearby_stops(
        &self,
        center: &Coordinate,
        radius_meters: u32,
    ) -> Result<Vec<BusStop>, PipelineError>;
}
