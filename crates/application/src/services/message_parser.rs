//! Inbound message parsing.
//!
//! The wire shape is `<location text> <route>`: the final
//! whitespace-separated token is the route identifier, everything before it
//! is the location.

use domain::RouteId;
use tracing::debug;

use crate::error::PipelineError;
use crate::request::ParsedQuery;

/// Parse a raw SMS body into a location query and a route identifier.
///
/// The message must contain at least two whitespace-separated tokens and the
/// final token must be interpretable as a route identifier (leading ASCII
/// digit, ASCII alphanumerics only). Preceding tokens joined with single
/// spaces form the location text; the route is uppercased.
///
/// # Errors
///
/// Returns [`PipelineError::MalformedMessage`] when the message is empty,
/// has no location text, or its final token is not a route identifier.
pub fn parse_message(raw: &str) -> Result<ParsedQuery, PipelineError> {
    let tokens: Vec<&str> = raw.split_whitespace().collect();

    let Some((route_token, location_tokens)) = tokens.split_last() else {
        return Err(PipelineError::MalformedMessage(
            "empty message".to_string(),
        ));
    };
    if location_tokens.is_empty() {
        return Err(PipelineError::MalformedMessage(
            "missing location before the route number".to_string(),
        ));
    }

    let route_id = RouteId::parse(route_token).map_err(|_| {
        PipelineError::MalformedMessage(format!(
            "final token {route_token:?} is not a route number"
        ))
    })?;

    let location_text = location_tokens.join(" ");
    debug!(location = %location_text, route = %route_id, "parsed inbound message");

    Ok(ParsedQuery {
        location_text,
        route_id,
    })
}
