//! Typed models for SMS gateway responses

use serde::{Deserialize, Serialize};

/// Outcome of a send request the gateway accepted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendSmsReport {
    /// Provider-assigned request identifier, when reported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    /// Provider status messages accompanying the acceptance
    pub messages: Vec<String>,
}
