//! Transit error types

use thiserror::Error;

/// Errors that can occur when talking to the transit data provider
#[derive(Debug, Error)]
pub enum TransitError {
    /// Connection to the transit service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// HTTP request to the transit service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse a response from the transit service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The requested stop does not exist on the provider side
    #[error("Stop not found: {0}")]
    StopNotFound(String),

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },
}

impl TransitError {
    /// Returns true if this error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_) | Self::RequestFailed(_) | Self::Timeout { .. }
        )
    }
}
