//! Reply formatting.
//!
//! Pure string assembly: no I/O and no failure path. Degraded inputs render
//! an explicit "unavailable" phrase, never a fabricated number and never a
//! silently dropped line.

use domain::{BusEtaEstimate, BusStop, ReplyMessage, RouteId, WalkEstimate};

use crate::error::PipelineError;

/// Compose the success reply for a located stop and its estimates.
///
/// Approximate walk estimates carry a `~` marker; schedule-sourced bus ETAs
/// are labelled `(scheduled)`.
#[must_use]
pub fn compose_reply(
    route: &RouteId,
    stop: &BusStop,
    walk: Option<&WalkEstimate>,
    bus: &BusEtaEstimate,
) -> ReplyMessage {
    let stop_line = walk.map_or_else(
        || format!("Nearest stop: {}", stop.name),
        |walk| {
            format!(
                "Nearest stop: {} ({:.0}m)",
                stop.name,
                walk.distance_meters()
            )
        },
    );

    let walk_line = walk.map_or_else(
        || "Walk: unavailable".to_string(),
        |walk| {
            let marker = if walk.is_approximate() { "~" } else { "" };
            format!("Walk: {marker}{} min", walk.duration_minutes())
        },
    );

    let bus_line = match (bus, bus.eta_minutes()) {
        (BusEtaEstimate::Live { .. }, Some(minutes)) => format!("Next bus: in {minutes} min"),
        (BusEtaEstimate::Scheduled { .. }, Some(minutes)) => {
            format!("Next bus: ~{minutes} min (scheduled)")
        },
        _ => "Next bus: unavailable".to_string(),
    };

    ReplyMessage::new(format!(
        "Bus {route} info:\n{stop_line}\n{walk_line}\n{bus_line}"
    ))
}

/// Compose the fixed rider-facing reply for a failed request.
///
/// Provider error text never reaches the rider; only the requested route id
/// is ever echoed back.
#[must_use]
pub fn compose_failure(error: &PipelineError) -> ReplyMessage {
    let text = match error {
        PipelineError::MalformedMessage(_) => "Sorry, we couldn't understand that. Please send: \
             LOCATION ROUTE_NUMBER (e.g. Indiranagar 12A)"
            .to_string(),
        PipelineError::LocationNotFound(_) => {
            "We couldn't find that location. Please try a nearby landmark or area name."
                .to_string()
        },
        PipelineError::NoStopForRoute(route) => {
            format!(
                "No stop for route {route} was found near you. Please try another route or \
                 location."
            )
        },
        PipelineError::RouteUnavailable(_) => {
            "We couldn't compute a walking route to your stop. Please try again later.".to_string()
        },
        PipelineError::ProviderUnavailable(_)
        | PipelineError::Timeout
        | PipelineError::DeliveryFailed(_)
        | PipelineError::Domain(_) => {
            "The service is temporarily unavailable. Please try again in a few minutes."
                .to_string()
        },
    };
    ReplyMessage::new(text)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use domain::Coordinate;

    use super::*;

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

    #[test]
    fn full_reply_layout() {
        let walk = WalkEstimate::from_route(400.0, 300).expect("valid");
        let bus = BusEtaEstimate::Live { eta_seconds: 600 };

        let reply = compose_reply(&route(), &stop(), Some(&walk), &bus);

        assert_eq!(
            reply.text(),
            "Bus 12A info:\n\
             Nearest stop: Indiranagar KFC Signal (400m)\n\
             Walk: 5 min\n\
             Next bus: in 10 min"
        );
    }

    #[test]
    fn scheduled_eta_is_labelled() {
        let walk = WalkEstimate::from_route(400.0, 300).expect("valid");
        let bus = BusEtaEstimate::Scheduled { eta_seconds: 720 };

        let reply = compose_reply(&route(), &stop(), Some(&walk), &bus);

        assert!(reply.text().contains("Next bus: ~12 min (scheduled)"));
    }

    #[test]
    fn unknown_eta_renders_unavailable_not_a_number() {
        let walk = WalkEstimate::from_route(400.0, 300).expect("valid");

        let reply = compose_reply(&route(), &stop(), Some(&walk), &BusEtaEstimate::Unknown);

        assert!(reply.text().contains("Next bus: unavailable"));
        assert!(!reply.text().contains("Next bus: in"));
        assert!(!reply.text().contains("0 min"));
    }

    #[test]
    fn approximate_walk_is_marked() {
        let walk = WalkEstimate::approximate(400.0, 286).expect("valid");
        let bus = BusEtaEstimate::Live { eta_seconds: 600 };

        let reply = compose_reply(&route(), &stop(), Some(&walk), &bus);

        assert!(reply.text().contains("Walk: ~5 min"));
    }

    #[test]
    fn missing_walk_renders_unavailable() {
        let reply = compose_reply(&route(), &stop(), None, &BusEtaEstimate::Unknown);

        assert!(reply.text().contains("Nearest stop: Indiranagar KFC Signal\n"));
        assert!(reply.text().contains("Walk: unavailable"));
    }

    #[test]
    fn typical_reply_fits_one_segment() {
        let walk = WalkEstimate::from_route(400.0, 300).expect("valid");
        let bus = BusEtaEstimate::Live { eta_seconds: 600 };

        let reply = compose_reply(&route(), &stop(), Some(&walk), &bus);

        assert!(reply.char_count() <= ReplyMessage::MAX_CHARS);
    }

    #[test]
    fn overlong_stop_name_is_truncated_to_one_segment() {
        let long_stop = BusStop::new(
            "stop-2",
            "X".repeat(200),
            Coordinate::new_unchecked(12.9719, 77.6412),
            HashSet::new(),
        );
        let walk = WalkEstimate::from_route(400.0, 300).expect("valid");

        let reply = compose_reply(&route(), &long_stop, Some(&walk), &BusEtaEstimate::Unknown);

        assert!(reply.char_count() <= ReplyMessage::MAX_CHARS);
    }

    #[test]
    fn malformed_failure_names_the_expected_format() {
        let reply =
            compose_failure(&PipelineError::MalformedMessage("whatever".to_string()));
        assert_eq!(
            reply.text(),
            "Sorry, we couldn't understand that. Please send: LOCATION ROUTE_NUMBER (e.g. \
             Indiranagar 12A)"
        );
    }

    #[test]
    fn location_not_found_failure_text() {
        let reply = compose_failure(&PipelineError::LocationNotFound("Nowhere123".to_string()));
        assert_eq!(
            reply.text(),
            "We couldn't find that location. Please try a nearby landmark or area name."
        );
    }

    #[test]
    fn no_stop_failure_echoes_the_route() {
        let reply = compose_failure(&PipelineError::NoStopForRoute("99Z".to_string()));
        assert_eq!(
            reply.text(),
            "No stop for route 99Z was found near you. Please try another route or location."
        );
    }

    #[test]
    fn walking_route_failure_text() {
        let reply = compose_failure(&PipelineError::RouteUnavailable("no path".to_string()));
        assert_eq!(
            reply.text(),
            "We couldn't compute a walking route to your stop. Please try again later."
        );
    }

    #[test]
    fn outage_timeout_and_internal_failures_share_one_text() {
        let expected = "The service is temporarily unavailable. Please try again in a few minutes.";
        for error in [
            PipelineError::ProviderUnavailable("x".to_string()),
            PipelineError::Timeout,
            PipelineError::DeliveryFailed("x".to_string()),
        ] {
            assert_eq!(compose_failure(&error).text(), expected);
        }
    }

    #[test]
    fn provider_error_text_never_leaks_to_the_rider() {
        let reply = compose_failure(&PipelineError::ProviderUnavailable(
            "connection refused: 10.0.0.3:443".to_string(),
        ));
        assert!(!reply.text().contains("10.0.0.3"));
        assert!(!reply.text().contains("connection refused"));
    }

    #[test]
    fn every_failure_reply_fits_one_segment() {
        for error in [
            PipelineError::MalformedMessage(String::new()),
            PipelineError::LocationNotFound(String::new()),
            PipelineError::NoStopForRoute("500D".to_string()),
            PipelineError::RouteUnavailable(String::new()),
            PipelineError::ProviderUnavailable(String::new()),
            PipelineError::Timeout,
            PipelineError::DeliveryFailed(String::new()),
        ] {
            assert!(compose_failure(&error).char_count() <= ReplyMessage::MAX_CHARS);
        }
    }
}
