//! Maps error types

use thiserror::Error;

/// Errors that can occur talking to the Maps APIs
#[derive(Debug, Error)]
pub enum MapsError {
    /// Client is not usable as configured
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Connection to the Maps service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timed out
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },

    /// HTTP request failed or the API reported an unexpected status
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// API query quota exhausted
    #[error("Query quota exceeded")]
    QuotaExceeded,

    /// API key rejected
    #[error("Request denied: {0}")]
    AuthFailed(String),

    /// Failed to parse the API response
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl MapsError {
    /// Returns true if this error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_)
                | Self::Timeout { .. }
                | Self::RequestFailed(_)
                | Self::QuotaExceeded
        )
    }
}
