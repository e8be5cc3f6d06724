//! Bus arrival estimation.

use std::sync::Arc;

use domain::{BusEtaEstimate, BusStop, RouteId};
use tracing::{debug, instrument, warn};

use crate::ports::TransitEtaPort;

/// Estimates time until the next bus of a route reaches a stop.
///
/// Best-effort: a realtime-sourced departure yields a live estimate, a
/// schedule-sourced one a scheduled estimate, and no data or any provider
/// failure yields `Unknown`. No number is ever fabricated.
pub struct BusEtaEstimator {
    port: Arc<dyn TransitEtaPort>,
}

impl BusEtaEstimator {
    /// Create an estimator over the given departure-board port.
    #[must_use]
    pub fn new(port: Arc<dyn TransitEtaPort>) -> Self {
        Self { port }
    }

    /// Arrival estimate for `route` at `stop`.
    #[instrument(skip_all, fields(stop_id = %stop.id, route = %route))]
    pub async fn estimate(&self, stop: &BusStop, route: &RouteId) -> BusEtaEstimate {
        match self.port.next_departure(&stop.id, route).await {
            Ok(Some(departure)) => {
                let estimate = if departure.realtime {
                    BusEtaEstimate::Live {
                        eta_seconds: departure.eta_seconds,
                    }
                } else {
                    BusEtaEstimate::Scheduled {
                        eta_seconds: departure.eta_seconds,
                    }
                };
                debug!(
                    confidence = estimate.confidence(),
                    eta_seconds = departure.eta_seconds,
                    "next departure found"
                );
                estimate
            },
            Ok(None) => {
                debug!("no upcoming departure for the route");
                BusEtaEstimate::Unknown
            },
            Err(err) => {
                warn!(error = %err, "departure lookup failed, reporting unknown ETA");
                BusEtaEstimate::Unknown
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use domain::Coordinate;

    use super::*;
    use crate::error::PipelineError;
    use crate::ports::{MockTransitEtaPort, NextDeparture};

    fn stop() -> BusStop {
        BusStop::new(
            "stop-1",
            "Indiranagar KFC Signal",
            Coordinate::new_unchecked(12.9719, 77.6412),
            HashSet::new(),
        )
    }

    fn route() -> RouteId {
        RouteId::parse("12A").expect("valid route")
    }

    #[tokio::test]
    async fn realtime_departure_is_live() {
        let mut port = MockTransitEtaPort::new();
        port.expect_next_departure().returning(|_, _| {
            Ok(Some(NextDeparture {
                eta_seconds: 600,
                realtime: true,
            }))
        });

        let estimator = BusEtaEstimator::new(Arc::new(port));
        let estimate = estimator.estimate(&stop(), &route()).await;

        assert_eq!(estimate, BusEtaEstimate::Live { eta_seconds: 600 });
    }

    #[tokio::test]
    async fn schedule_only_departure_is_scheduled() {
        let mut port = MockTransitEtaPort::new();
        port.expect_next_departure().returning(|_, _| {
            Ok(Some(NextDeparture {
                eta_seconds: 540,
                realtime: false,
            }))
        });

        let estimator = BusEtaEstimator::new(Arc::new(port));
        let estimate = estimator.estimate(&stop(), &route()).await;

        assert_eq!(estimate, BusEtaEstimate::Scheduled { eta_seconds: 540 });
    }

    #[tokio::test]
    async fn no_departure_is_unknown() {
        let mut port = MockTransitEtaPort::new();
        port.expect_next_departure().returning(|_, _| Ok(None));

        let estimator = BusEtaEstimator::new(Arc::new(port));
        let estimate = estimator.estimate(&stop(), &route()).await;

        assert!(estimate.is_unknown());
    }

    #[tokio::test]
    async fn provider_failure_is_unknown_not_error() {
        let mut port = MockTransitEtaPort::new();
        port.expect_next_departure()
            .returning(|_, _| Err(PipelineError::ProviderUnavailable("down".to_string())));

        let estimator = BusEtaEstimator::new(Arc::new(port));
        let estimate = estimator.estimate(&stop(), &route()).await;

        assert!(estimate.is_unknown());
    }

    #[tokio::test]
    async fn stop_id_and_route_reach_the_port() {
        let mut port = MockTransitEtaPort::new();
        port.expect_next_departure()
            .withf(|stop_id, route| stop_id == "stop-1" && route.as_str() == "12A")
            .returning(|_, _| Ok(None));

        let estimator = BusEtaEstimator::new(Arc::new(port));
        let _ = estimator.estimate(&stop(), &route()).await;
    }
}
