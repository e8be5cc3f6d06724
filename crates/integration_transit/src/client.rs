//! Transit client for nearby stops and departure boards
//!
//! Talks to a transport.rest style HAFAS API such as
//! [v6.db.transport.rest](https://v6.db.transport.rest). Stops are fetched
//! with the lines that call there (`linesOfStops=true`) so callers can tell
//! which stops service a given bus route without extra requests.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::Coordinate;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::config::TransitApiConfig;
use crate::error::TransitError;
use crate::models::{Departure, TransitLine, TransitStop};

/// Trait for transit data clients
#[async_trait]
pub trait TransitClient: Send + Sync {
    /// Find stops near a coordinate, with the bus lines serving each stop
    async fn nearby_stops(
        &self,
        center: &Coordinate,
        distance_meters: u32,
    ) -> Result<Vec<TransitStop>, TransitError>;

    /// Departure board for a stop over the next `window_minutes`
    async fn departures(
        &self,
        stop_id: &str,
        window_minutes: u32,
    ) -> Result<Vec<Departure>, TransitError>;
}

/// HAFAS-based transit client using the transport.rest API
#[derive(Debug)]
pub struct TransitApiClient {
    client: Client,
    config: TransitApiConfig,
}

impl TransitApiClient {
    /// Create a new transit client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &TransitApiConfig) -> Result<Self, TransitError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("Busline/1.0")
            .build()
            .map_err(|e| TransitError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    async fn send(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<reqwest::Response, TransitError> {
        self.client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransitError::Timeout {
                        timeout_secs: self.config.timeout_secs,
                    }
                } else {
                    TransitError::ConnectionFailed(e.to_string())
                }
            })
    }

    /// Parse the nearby-stops response, keeping bus lines only
    fn parse_stops_response(body: &str) -> Result<Vec<TransitStop>, TransitError> {
        let raw: Vec<RawStop> =
            serde_json::from_str(body).map_err(|e| TransitError::ParseError(e.to_string()))?;

        Ok(raw.into_iter().filter_map(Self::convert_stop).collect())
    }

    /// Convert a raw stop, dropping entries without an id or name
    fn convert_stop(raw: RawStop) -> Option<TransitStop> {
        let id = raw.id?;
        let name = raw.name?;
        let (latitude, longitude) = raw.location.map_or((None, None), |loc| {
            (Some(loc.latitude), Some(loc.longitude))
        });

        let lines = raw
            .lines
            .into_iter()
            .filter(RawLine::is_bus)
            .filter_map(|line| line.name.map(|name| TransitLine { name }))
            .collect();

        Some(TransitStop {
            id,
            name,
            latitude,
            longitude,
            distance_meters: raw.distance,
            lines,
        })
    }

    /// Parse the departures response, dropping entries without a line name
    fn parse_departures_response(body: &str) -> Result<Vec<Departure>, TransitError> {
        let raw: RawDeparturesResponse =
            serde_json::from_str(body).map_err(|e| TransitError::ParseError(e.to_string()))?;

        Ok(raw
            .departures
            .into_iter()
            .filter_map(|dep| {
                let line_name = dep.line.and_then(|line| line.name)?;
                Some(Departure {
                    when: dep.when,
                    planned_when: dep.planned_when,
                    delay_seconds: dep.delay,
                    line_name,
                    direction: dep.direction,
                })
            })
            .collect())
    }
}

#[async_trait]
impl TransitClient for TransitApiClient {
    #[instrument(skip(self), fields(center = %center))]
    async fn nearby_stops(
        &self,
        center: &Coordinate,
        distance_meters: u32,
    ) -> Result<Vec<TransitStop>, TransitError> {
        let url = format!("{}/stops/nearby", self.config.base_url);
        let params = [
            ("latitude", center.latitude().to_string()),
            ("longitude", center.longitude().to_string()),
            ("distance", distance_meters.to_string()),
            ("linesOfStops", "true".to_string()),
            ("results", self.config.max_results.to_string()),
        ];

        debug!(%url, distance_meters, "searching nearby stops");
        let response = self.send(&url, &params).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransitError::RequestFailed(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| TransitError::ParseError(e.to_string()))?;
        let stops = Self::parse_stops_response(&body)?;

        if stops.is_empty() {
            warn!("no stops within radius");
        }
        debug!(count = stops.len(), "nearby stops found");
        Ok(stops)
    }

    #[instrument(skip(self))]
    async fn departures(
        &self,
        stop_id: &str,
        window_minutes: u32,
    ) -> Result<Vec<Departure>, TransitError> {
        let url = format!("{}/stops/{stop_id}/departures", self.config.base_url);
        let params = [
            ("duration", window_minutes.to_string()),
            ("linesOfStops", "false".to_string()),
        ];

        debug!(%url, window_minutes, "fetching departure board");
        let response = self.send(&url, &params).await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(TransitError::StopNotFound(stop_id.to_string()));
        }
        if !status.is_success() {
            return Err(TransitError::RequestFailed(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| TransitError::ParseError(e.to_string()))?;
        let departures = Self::parse_departures_response(&body)?;

        debug!(count = departures.len(), "departures fetched");
        Ok(departures)
    }
}

// --- Raw API response types for deserialization ---

#[derive(Debug, Deserialize)]
struct RawStop {
    id: Option<String>,
    name: Option<String>,
    location: Option<RawLocation>,
    distance: Option<u32>,
    #[serde(default)]
    lines: Vec<RawLine>,
}

#[derive(Debug, Deserialize)]
struct RawLocation {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct RawLine {
    name: Option<String>,
    product: Option<String>,
    mode: Option<String>,
}

impl RawLine {
    /// Bus check on `product`, falling back to `mode` when absent
    fn is_bus(&self) -> bool {
        match (&self.product, &self.mode) {
            (Some(product), _) => product.eq_ignore_ascii_case("bus"),
            (None, Some(mode)) => mode.eq_ignore_ascii_case("bus"),
            (None, None) => false,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDeparturesResponse {
    #[serde(default)]
    departures: Vec<RawDeparture>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDeparture {
    when: Option<DateTime<Utc>>,
    planned_when: Option<DateTime<Utc>>,
    delay: Option<i64>,
    line: Option<RawLine>,
    direction: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stops_keeps_bus_lines_only() {
        let json = r#"[
            {
                "type": "stop",
                "id": "900100001",
                "name": "Shivajinagar Bus Station",
                "location": { "latitude": 12.9791, "longitude": 77.6013 },
                "distance": 194,
                "lines": [
                    { "type": "line", "name": "12A", "mode": "bus", "product": "bus" },
                    { "type": "line", "name": "S5", "mode": "train", "product": "suburban" },
                    { "type": "line", "name": "335E", "mode": "bus", "product": "bus" }
                ]
            }
        ]"#;

        let stops = TransitApiClient::parse_stops_response(json).unwrap();
        assert_eq!(stops.len(), 1);
        assert_eq!(stops[0].id, "900100001");
        assert_eq!(stops[0].name, "Shivajinagar Bus Station");
        assert_eq!(stops[0].distance_meters, Some(194));
        assert!(stops[0].has_location());

        let line_names: Vec<_> = stops[0].lines.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(line_names, vec!["12A", "335E"]);
    }

    #[test]
    fn test_parse_stops_skips_entries_without_id_or_name() {
        let json = r#"[
            { "type": "stop", "name": "No Id Stop", "lines": [] },
            { "type": "stop", "id": "900100002", "lines": [] },
            {
                "type": "stop",
                "id": "900100003",
                "name": "Usable Stop",
                "lines": []
            }
        ]"#;

        let stops = TransitApiClient::parse_stops_response(json).unwrap();
        assert_eq!(stops.len(), 1);
        assert_eq!(stops[0].id, "900100003");
        assert!(!stops[0].has_location());
    }

    #[test]
    fn test_parse_stops_falls_back_to_mode_when_product_missing() {
        let json = r#"[
            {
                "id": "900100004",
                "name": "Mode Only Stop",
                "lines": [
                    { "name": "42", "mode": "bus" },
                    { "name": "T1", "mode": "tram" },
                    { "mode": "bus" }
                ]
            }
        ]"#;

        let stops = TransitApiClient::parse_stops_response(json).unwrap();
        assert_eq!(stops[0].lines.len(), 1);
        assert_eq!(stops[0].lines[0].name, "42");
    }

    #[test]
    fn test_parse_stops_empty_array() {
        let stops = TransitApiClient::parse_stops_response("[]").unwrap();
        assert!(stops.is_empty());
    }

    #[test]
    fn test_parse_stops_invalid_json() {
        let result = TransitApiClient::parse_stops_response("not json");
        assert!(matches!(result, Err(TransitError::ParseError(_))));
    }

    #[test]
    fn test_parse_departures_realtime_and_scheduled() {
        let json = r#"{
            "departures": [
                {
                    "tripId": "trip-1",
                    "when": "2026-06-01T12:05:00+00:00",
                    "plannedWhen": "2026-06-01T12:00:00+00:00",
                    "delay": 300,
                    "direction": "Majestic",
                    "line": { "name": "12A", "mode": "bus", "product": "bus" }
                },
                {
                    "tripId": "trip-2",
                    "when": null,
                    "plannedWhen": "2026-06-01T12:20:00+00:00",
                    "delay": null,
                    "direction": "Depot",
                    "line": { "name": "12A", "mode": "bus", "product": "bus" }
                }
            ],
            "realtimeDataUpdatedAt": 1780315200
        }"#;

        let departures = TransitApiClient::parse_departures_response(json).unwrap();
        assert_eq!(departures.len(), 2);

        assert!(departures[0].is_realtime());
        assert_eq!(departures[0].delay_seconds, Some(300));
        assert_eq!(departures[0].line_name, "12A");
        assert_eq!(departures[0].direction.as_deref(), Some("Majestic"));

        assert!(!departures[1].is_realtime());
        assert!(departures[1].when.is_none());
        assert_eq!(departures[1].departure_time(), departures[1].planned_when);
    }

    #[test]
    fn test_parse_departures_offset_timestamps_convert_to_utc() {
        let json = r#"{
            "departures": [{
                "plannedWhen": "2026-06-01T14:00:00+02:00",
                "line": { "name": "42", "product": "bus" }
            }]
        }"#;

        let departures = TransitApiClient::parse_departures_response(json).unwrap();
        let planned = departures[0].planned_when.unwrap();
        assert_eq!(planned.to_rfc3339(), "2026-06-01T12:00:00+00:00");
    }

    #[test]
    fn test_parse_departures_skips_entries_without_line_name() {
        let json = r#"{
            "departures": [
                { "plannedWhen": "2026-06-01T12:00:00+00:00", "line": { "product": "bus" } },
                { "plannedWhen": "2026-06-01T12:10:00+00:00" },
                {
                    "plannedWhen": "2026-06-01T12:15:00+00:00",
                    "line": { "name": "12A", "product": "bus" }
                }
            ]
        }"#;

        let departures = TransitApiClient::parse_departures_response(json).unwrap();
        assert_eq!(departures.len(), 1);
        assert_eq!(departures[0].line_name, "12A");
    }

    #[test]
    fn test_parse_departures_empty_board() {
        let json = r#"{ "departures": [] }"#;
        let departures = TransitApiClient::parse_departures_response(json).unwrap();
        assert!(departures.is_empty());
    }

    #[test]
    fn test_parse_departures_invalid_json() {
        let result = TransitApiClient::parse_departures_response("not json");
        assert!(matches!(result, Err(TransitError::ParseError(_))));
    }

    #[test]
    fn test_raw_line_is_bus_prefers_product() {
        let line = RawLine {
            name: Some("X1".to_string()),
            product: Some("suburban".to_string()),
            mode: Some("bus".to_string()),
        };
        assert!(!line.is_bus());

        let line = RawLine {
            name: Some("12A".to_string()),
            product: Some("Bus".to_string()),
            mode: None,
        };
        assert!(line.is_bus());
    }
}
