//! Per-request input types.

use domain::RouteId;
use serde::{Deserialize, Serialize};

/// One inbound SMS as handed to the pipeline by the webhook layer.
///
/// Lives for exactly one pipeline invocation; nothing about it is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundRequest {
    /// Gateway-assigned rider identifier, also the reply recipient.
    pub sender_id: String,
    /// Raw SMS body as received.
    pub raw_message: String,
}

impl InboundRequest {
    /// Create a request for one inbound message.
    pub fn new(sender_id: impl Into<String>, raw_message: impl Into<String>) -> Self {
        Self {
            sender_id: sender_id.into(),
            raw_message: raw_message.into(),
        }
    }
}

/// The parsed form of an inbound message: where the rider is and which bus
/// they are asking about.
///
/// Only produced whole; a message that cannot fill both fields fails
/// parsing instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuery {
    /// Free-text location, never empty.
    pub location_text: String,
    /// Case-normalized route identifier.
    pub route_id: RouteId,
}
