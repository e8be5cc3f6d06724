//! Nearest serviceable stop selection.

use std::sync::Arc;

use domain::{BusStop, Coordinate, RouteId};
use tracing::{debug, instrument};

use crate::error::PipelineError;
use crate::ports::NearbyStopsPort;

/// Finds the nearest stop that services a given route.
pub struct StopLocator {
    port: Arc<dyn NearbyStopsPort>,
    search_radius_meters: u32,
}

impl StopLocator {
    /// Create a locator that searches within `search_radius_meters` of the
    /// rider's position.
    #[must_use]
    pub fn new(port: Arc<dyn NearbyStopsPort>, search_radius_meters: u32) -> Self {
        Self {
            port,
            search_radius_meters,
        }
    }

    /// The nearest stop around `origin` whose route set contains `route`.
    ///
    /// Candidates arrive nearest-first from the port and that order is
    /// preserved, so the first stop servicing the route wins and ties keep
    /// provider order. A stop that does not service `route` is never
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::NoStopForRoute`] when no stop within the
    /// radius services the route, and passes provider failures through.
    #[instrument(skip(self))]
    pub async fn find_nearest_stop(
        &self,
        origin: &Coordinate,
        route: &RouteId,
    ) -> Result<BusStop, PipelineError> {
        let stops = self
            .port
            .nearby_stops(origin, self.search_radius_meters)
            .await?;
        let candidates = stops.len();

        let Some(stop) = stops.into_iter().find(|stop| stop.services_route(route)) else {
            debug!(candidates, "no nearby stop services the route");
            return Err(PipelineError::NoStopForRoute(route.as_str().to_string()));
        };

        debug!(
            stop_id = %stop.id,
            stop_name = %stop.name,
            candidates,
            "selected nearest serviceable stop"
        );
        Ok(stop)
    }
}
