//! Walking time estimation.

use std::sync::Arc;

use domain::{Coordinate, WalkEstimate};
use tracing::{debug, instrument, warn};

use crate::ports::WalkingDirectionsPort;

/// Estimates the walk from the rider's position to the chosen stop.
///
/// Never fails the pipeline: when the directions provider cannot produce a
/// walking route, the estimate falls back to straight-line distance at a
/// configured walking speed and is flagged approximate so the reply can mark
/// it.
pub struct WalkEstimator {
    port: Arc<dyn WalkingDirectionsPort>,
    walking_speed_mps: f64,
}

impl WalkEstimator {
    /// Create an estimator with the fallback walking speed in meters per
    /// second.
    #[must_use]
    pub fn new(port: Arc<dyn WalkingDirectionsPort>, walking_speed_mps: f64) -> Self {
        Self {
            port,
            walking_speed_mps,
        }
    }

    /// Walking estimate from `origin` to `destination`.
    ///
    /// `None` only when even the straight-line fallback cannot produce a
    /// finite number (non-positive walking speed); the reply then renders
    /// the walk as unavailable.
    #[instrument(skip_all)]
    pub async fn estimate_walk(
        &self,
        origin: &Coordinate,
        destination: &Coordinate,
    ) -> Option<WalkEstimate> {
        match self.port.walking_route(origin, destination).await {
            Ok(route) => {
                match WalkEstimate::from_route(route.distance_meters, route.duration_seconds) {
                    Ok(walk) => {
                        debug!(
                            distance_meters = walk.distance_meters(),
                            duration_seconds = walk.duration_seconds(),
                            "walking route computed"
                        );
                        Some(walk)
                    },
                    Err(err) => {
                        warn!(error = %err, "provider walking route was invalid, using fallback");
                        self.straight_line(origin, destination)
                    },
                }
            },
            Err(err) => {
                warn!(error = %err, "walking directions unavailable, using straight-line fallback");
                self.straight_line(origin, destination)
            },
        }
    }

    fn straight_line(&self, origin: &Coordinate, destination: &Coordinate) -> Option<WalkEstimate> {
        if self.walking_speed_mps <= 0.0 || !self.walking_speed_mps.is_finite() {
            warn!(
                speed_mps = self.walking_speed_mps,
                "walking speed unusable, no walk estimate"
            );
            return None;
        }

        let distance_meters = origin.distance_meters(destination);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let duration_seconds = (distance_meters / self.walking_speed_mps).round() as u32;

        match WalkEstimate::approximate(distance_meters, duration_seconds) {
            Ok(walk) => {
                debug!(
                    distance_meters,
                    duration_seconds, "straight-line walk fallback"
                );
                Some(walk)
            },
            Err(err) => {
                warn!(error = %err, "straight-line fallback invalid, no walk estimate");
                None
            },
        }
    }
}
