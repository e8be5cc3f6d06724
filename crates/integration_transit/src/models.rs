//! Transit data models
//!
//! Typed representations of stops, lines, and departures as returned by the
//! transport.rest HAFAS API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A transit line serving a stop (already filtered to bus products).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransitLine {
    /// Public line name as printed on the vehicle (e.g. "12A")
    pub name: String,
}

/// A public transit stop with the bus lines that call there.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransitStop {
    /// Provider-assigned stop identifier
    pub id: String,
    /// Human-readable stop name
    pub name: String,
    /// Stop latitude, if the provider reported one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    /// Stop longitude, if the provider reported one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// Distance from the search center in meters, if reported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_meters: Option<u32>,
    /// Bus lines serving this stop
    pub lines: Vec<TransitLine>,
}

impl TransitStop {
    /// Both coordinates present and usable.
    #[must_use]
    pub const fn has_location(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }
}

/// A single entry on a stop's departure board.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Departure {
    /// Realtime departure time when the vehicle is tracked, scheduled otherwise
    pub when: Option<DateTime<Utc>>,
    /// Scheduled departure time
    pub planned_when: Option<DateTime<Utc>>,
    /// Delay in seconds relative to schedule; present (possibly zero) exactly
    /// when the provider has realtime data for this departure
    pub delay_seconds: Option<i64>,
    /// Public line name
    pub line_name: String,
    /// Headsign / direction text, if reported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
}

impl Departure {
    /// Whether this departure carries realtime tracking data.
    #[must_use]
    pub const fn is_realtime(&self) -> bool {
        self.delay_seconds.is_some()
    }

    /// Best known departure time: realtime when available, scheduled otherwise.
    #[must_use]
    pub fn departure_time(&self) -> Option<DateTime<Utc>> {
        self.when.or(self.planned_when)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn sample_departure(delay_seconds: Option<i64>) -> Departure {
        Departure {
            when: Some(Utc.with_ymd_and_hms(2026, 6, 1, 12, 5, 0).unwrap()),
            planned_when: Some(Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap()),
            delay_seconds,
            line_name: "12A".to_string(),
            direction: Some("Majestic".to_string()),
        }
    }

    #[test]
    fn test_departure_with_delay_is_realtime() {
        assert!(sample_departure(Some(300)).is_realtime());
    }

    #[test]
    fn test_zero_delay_still_counts_as_realtime() {
        assert!(sample_departure(Some(0)).is_realtime());
    }

    #[test]
    fn test_missing_delay_is_scheduled_only() {
        let departure = Departure {
            when: None,
            ..sample_departure(None)
        };
        assert!(!departure.is_realtime());
        assert_eq!(departure.departure_time(), departure.planned_when);
    }

    #[test]
    fn test_departure_time_prefers_realtime() {
        let departure = sample_departure(Some(300));
        assert_eq!(departure.departure_time(), departure.when);
    }

    #[test]
    fn test_departure_time_none_when_both_missing() {
        let departure = Departure {
            when: None,
            planned_when: None,
            ..sample_departure(None)
        };
        assert!(departure.departure_time().is_none());
    }

    #[test]
    fn test_stop_location_requires_both_coordinates() {
        let mut stop = TransitStop {
            id: "900100001".to_string(),
            name: "Shivajinagar Bus Station".to_string(),
            latitude: Some(12.9791),
            longitude: None,
            distance_meters: Some(120),
            lines: vec![TransitLine {
                name: "12A".to_string(),
            }],
        };
        assert!(!stop.has_location());
        stop.longitude = Some(77.6013);
        assert!(stop.has_location());
    }
}
