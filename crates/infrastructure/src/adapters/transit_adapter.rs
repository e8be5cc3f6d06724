//! Transit adapter - implements the nearby-stops and departure-board ports
//! using integration_transit

use application::error::PipelineError;
use application::ports::{NearbyStopsPort, NextDeparture, TransitEtaPort};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{BusStop, Coordinate, RouteId};
use integration_transit::{Departure, TransitClient, TransitError, TransitStop};
use std::sync::Arc;
use tracing::{instrument, warn};

use crate::retry::{RetryConfig, with_retry};

/// Adapter for stop discovery and departure boards over the transit API
pub struct TransitApiAdapter {
    client: Arc<dyn TransitClient>,
    retry: RetryConfig,
    departure_window_minutes: u32,
}

impl std::fmt::Debug for TransitApiAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitApiAdapter")
            .field("client", &"TransitClient")
            .field("retry", &self.retry)
            .field("departure_window_minutes", &self.departure_window_minutes)
            .finish()
    }
}

impl TransitApiAdapter {
    /// Create a new transit adapter
    pub fn new(
        client: Arc<dyn TransitClient>,
        retry: RetryConfig,
        departure_window_minutes: u32,
    ) -> Self {
        Self {
            client,
            retry,
            departure_window_minutes,
        }
    }

    /// Convert a provider stop into a domain stop
    ///
    /// Stops without usable coordinates are dropped. Line names that are
    /// not valid route identifiers are skipped; they could never match a
    /// parsed rider query anyway.
    fn convert_stop(stop: TransitStop) -> Option<BusStop> {
        let location = match (stop.latitude, stop.longitude) {
            (Some(latitude), Some(longitude)) => match Coordinate::new(latitude, longitude) {
                Ok(location) => location,
                Err(err) => {
                    warn!(stop_id = %stop.id, error = %err, "skipping stop with invalid coordinates");
                    return None;
                },
            },
            _ => {
                warn!(stop_id = %stop.id, "skipping stop without coordinates");
                return None;
            },
        };

        let routes = stop
            .lines
            .iter()
            .filter_map(|line| RouteId::parse(&line.name).ok())
            .collect();

        Some(BusStop::new(stop.id, stop.name, location, routes))
    }

    /// Earliest upcoming departure of `route`, relative to `now`
    fn next_for_route(
        departures: &[Departure],
        route: &RouteId,
        now: DateTime<Utc>,
    ) -> Option<NextDeparture> {
        departures
            .iter()
            .filter(|dep| RouteId::parse(&dep.line_name).is_ok_and(|line| &line == route))
            .filter_map(|dep| {
                let when = dep.departure_time()?;
                // Negative seconds-until means the bus already left
                let eta_seconds = u32::try_from((when - now).num_seconds()).ok()?;
                Some(NextDeparture {
                    eta_seconds,
                    realtime: dep.is_realtime(),
                })
            })
            .min_by_key(|dep| dep.eta_seconds)
    }

    fn map_error(err: TransitError) -> PipelineError {
        PipelineError::ProviderUnavailable(err.to_string())
    }
}

#[async_trait]
impl NearbyStopsPort for TransitApiAdapter {
    #[instrument(skip(self))]
    async fn nearby_stops(
        &self,
        center: &Coordinate,
        radius_meters: u32,
    ) -> Result<Vec<BusStop>, PipelineError> {
        let stops = with_retry(&self.retry, "transit.nearby_stops", || async {
            self.client.nearby_stops(center, radius_meters).await
        })
        .await
        .into_result()
        .map_err(Self::map_error)?;

        // Provider order is nearest-first; conversion must not disturb it
        Ok(stops.into_iter().filter_map(Self::convert_stop).collect())
    }
}

#[async_trait]
impl TransitEtaPort for TransitApiAdapter {
    #[instrument(skip(self))]
    async fn next_departure(
        &self,
        stop_id: &str,
        route: &RouteId,
    ) -> Result<Option<NextDeparture>, PipelineError> {
        let result = with_retry(&self.retry, "transit.departures", || async {
            self.client
                .departures(stop_id, self.departure_window_minutes)
                .await
        })
        .await
        .into_result();

        let departures = match result {
            Ok(departures) => departures,
            Err(TransitError::StopNotFound(id)) => {
                warn!(stop_id = %id, "provider has no departure board for this stop");
                return Ok(None);
            },
            Err(err) => return Err(Self::map_error(err)),
        };

        Ok(Self::next_for_route(&departures, route, Utc::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use integration_transit::TransitLine;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct StubTransit {
        calls: AtomicU32,
        failures_before_success: u32,
        stops: Vec<TransitStop>,
        departures: Vec<Departure>,
        last_window: AtomicU32,
    }

    impl StubTransit {
        fn returning_stops(stops: Vec<TransitStop>) -> Self {
            Self {
                calls: AtomicU32::new(0),
                failures_before_success: 0,
                stops,
                departures: Vec::new(),
                last_window: AtomicU32::new(0),
            }
        }

        fn returning_departures(departures: Vec<Departure>) -> Self {
            Self {
                calls: AtomicU32::new(0),
                failures_before_success: 0,
                stops: Vec::new(),
                departures,
                last_window: AtomicU32::new(0),
            }
        }

        fn flaky(failures_before_success: u32, stops: Vec<TransitStop>) -> Self {
            Self {
                calls: AtomicU32::new(0),
                failures_before_success,
                stops,
                departures: Vec::new(),
                last_window: AtomicU32::new(0),
            }
        }

        fn should_fail(&self) -> bool {
            self.calls.fetch_add(1, Ordering::SeqCst) < self.failures_before_success
        }
    }

    #[async_trait]
    impl TransitClient for StubTransit {
        async fn nearby_stops(
            &self,
            _center: &Coordinate,
            _distance_meters: u32,
        ) -> Result<Vec<TransitStop>, TransitError> {
            if self.should_fail() {
                return Err(TransitError::ConnectionFailed("socket closed".to_string()));
            }
            Ok(self.stops.clone())
        }

        async fn departures(
            &self,
            _stop_id: &str,
            window_minutes: u32,
        ) -> Result<Vec<Departure>, TransitError> {
            self.last_window.store(window_minutes, Ordering::SeqCst);
            if self.should_fail() {
                return Err(TransitError::ConnectionFailed("socket closed".to_string()));
            }
            Ok(self.departures.clone())
        }
    }

    struct MissingStopTransit;

    #[async_trait]
    impl TransitClient for MissingStopTransit {
        async fn nearby_stops(
            &self,
            _center: &Coordinate,
            _distance_meters: u32,
        ) -> Result<Vec<TransitStop>, TransitError> {
            Err(TransitError::RequestFailed("HTTP 503".to_string()))
        }

        async fn departures(
            &self,
            stop_id: &str,
            _window_minutes: u32,
        ) -> Result<Vec<Departure>, TransitError> {
            Err(TransitError::StopNotFound(stop_id.to_string()))
        }
    }

    fn provider_stop(id: &str, lines: &[&str]) -> TransitStop {
        TransitStop {
            id: id.to_string(),
            name: format!("Stop {id}"),
            latitude: Some(12.9719),
            longitude: Some(77.6412),
            distance_meters: Some(120),
            lines: lines
                .iter()
                .map(|name| TransitLine {
                    name: (*name).to_string(),
                })
                .collect(),
        }
    }

    fn departure(line: &str, in_seconds: i64, now: DateTime<Utc>, delay: Option<i64>) -> Departure {
        Departure {
            when: Some(now + Duration::seconds(in_seconds)),
            planned_when: Some(now + Duration::seconds(in_seconds)),
            delay_seconds: delay,
            line_name: line.to_string(),
            direction: Some("Majestic".to_string()),
        }
    }

    fn route(token: &str) -> RouteId {
        RouteId::parse(token).expect("valid route")
    }

    fn center() -> Coordinate {
        Coordinate::new_unchecked(12.9719, 77.6412)
    }

    #[tokio::test]
    async fn nearby_stops_converts_in_provider_order() {
        let stub = StubTransit::returning_stops(vec![
            provider_stop("s1", &["12A", "335"]),
            provider_stop("s2", &["201R"]),
        ]);
        let adapter = TransitApiAdapter::new(Arc::new(stub), RetryConfig::default(), 60);

        let stops = adapter.nearby_stops(&center(), 1_000).await.unwrap();

        assert_eq!(stops.len(), 2);
        assert_eq!(stops[0].id, "s1");
        assert_eq!(stops[1].id, "s2");
        assert!(stops[0].services_route(&route("12A")));
        assert!(stops[0].services_route(&route("335")));
    }

    #[tokio::test]
    async fn nearby_stops_drops_stop_without_coordinates() {
        let mut bad = provider_stop("s1", &["12A"]);
        bad.latitude = None;
        let stub = StubTransit::returning_stops(vec![bad, provider_stop("s2", &["12A"])]);
        let adapter = TransitApiAdapter::new(Arc::new(stub), RetryConfig::default(), 60);

        let stops = adapter.nearby_stops(&center(), 1_000).await.unwrap();

        assert_eq!(stops.len(), 1);
        assert_eq!(stops[0].id, "s2");
    }

    #[tokio::test]
    async fn nearby_stops_skips_unparseable_line_names() {
        let stub = StubTransit::returning_stops(vec![provider_stop("s1", &["12A", "Feeder 3"])]);
        let adapter = TransitApiAdapter::new(Arc::new(stub), RetryConfig::default(), 60);

        let stops = adapter.nearby_stops(&center(), 1_000).await.unwrap();

        assert_eq!(stops.len(), 1);
        assert_eq!(stops[0].routes.len(), 1);
        assert!(stops[0].services_route(&route("12A")));
    }

    #[tokio::test]
    async fn nearby_stops_failure_is_provider_unavailable() {
        let adapter =
            TransitApiAdapter::new(Arc::new(MissingStopTransit), RetryConfig::default(), 60);

        let err = adapter.nearby_stops(&center(), 1_000).await.unwrap_err();

        assert!(matches!(err, PipelineError::ProviderUnavailable(_)));
    }

    #[tokio::test]
    async fn nearby_stops_retries_transient_failures_when_configured() {
        let stub = StubTransit::flaky(1, vec![provider_stop("s1", &["12A"])]);
        let adapter = TransitApiAdapter::new(
            Arc::new(stub),
            RetryConfig::new(2, 1, 5).without_jitter(),
            60,
        );

        let stops = adapter.nearby_stops(&center(), 1_000).await.unwrap();

        assert_eq!(stops.len(), 1);
    }

    #[tokio::test]
    async fn next_departure_passes_configured_window() {
        let stub = Arc::new(StubTransit::returning_departures(Vec::new()));
        let adapter = TransitApiAdapter::new(Arc::clone(&stub) as _, RetryConfig::default(), 45);

        let next = adapter.next_departure("s1", &route("12A")).await.unwrap();

        assert!(next.is_none());
        assert_eq!(stub.last_window.load(Ordering::SeqCst), 45);
    }

    #[tokio::test]
    async fn next_departure_missing_stop_is_none() {
        let adapter =
            TransitApiAdapter::new(Arc::new(MissingStopTransit), RetryConfig::default(), 60);

        let next = adapter.next_departure("gone", &route("12A")).await.unwrap();

        assert!(next.is_none());
    }

    #[test]
    fn next_for_route_picks_earliest_upcoming() {
        let now = Utc::now();
        let departures = vec![
            departure("12A", 900, now, None),
            departure("12A", 300, now, Some(60)),
            departure("335", 60, now, Some(0)),
        ];

        let next = TransitApiAdapter::next_for_route(&departures, &route("12A"), now)
            .expect("a departure");

        assert_eq!(next.eta_seconds, 300);
        assert!(next.realtime);
    }

    #[test]
    fn next_for_route_skips_departed_buses() {
        let now = Utc::now();
        let departures = vec![
            departure("12A", -120, now, Some(0)),
            departure("12A", 600, now, None),
        ];

        let next = TransitApiAdapter::next_for_route(&departures, &route("12A"), now)
            .expect("a departure");

        assert_eq!(next.eta_seconds, 600);
        assert!(!next.realtime);
    }

    #[test]
    fn next_for_route_matches_line_names_case_insensitively() {
        let now = Utc::now();
        let departures = vec![departure("12a", 480, now, Some(30))];

        let next = TransitApiAdapter::next_for_route(&departures, &route("12A"), now)
            .expect("a departure");

        assert_eq!(next.eta_seconds, 480);
    }

    #[test]
    fn next_for_route_ignores_other_routes() {
        let now = Utc::now();
        let departures = vec![
            departure("335", 120, now, None),
            departure("201R", 240, now, None),
        ];

        assert!(TransitApiAdapter::next_for_route(&departures, &route("12A"), now).is_none());
    }

    #[test]
    fn next_for_route_handles_empty_board() {
        assert!(TransitApiAdapter::next_for_route(&[], &route("12A"), Utc::now()).is_none());
    }

    #[test]
    fn next_for_route_schedule_only_is_not_realtime() {
        let now = Utc::now();
        let departures = vec![departure("12A", 540, now, None)];

        let next = TransitApiAdapter::next_for_route(&departures, &route("12A"), now)
            .expect("a departure");

        assert!(!next.realtime);
    }
}
