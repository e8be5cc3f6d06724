//! SMS error types

use thiserror::Error;

/// Errors that can occur sending SMS through the gateway
#[derive(Debug, Error)]
pub enum SmsError {
    /// Client is not usable as configured
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Recipient number cannot be normalized into a deliverable form
    #[error("Invalid recipient: {0}")]
    InvalidRecipient(String),

    /// Connection to the SMS gateway failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timed out
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },

    /// HTTP request failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Gateway accepted the request but refused to queue the message
    #[error("Send rejected by gateway: {0}")]
    Rejected(String),

    /// Failed to parse the gateway response
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl SmsError {
    /// Returns true if this error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_) | Self::Timeout { .. } | Self::RequestFailed(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_errors() {
        assert!(SmsError::ConnectionFailed("test".to_string()).is_retryable());
        assert!(SmsError::Timeout { timeout_secs: 10 }.is_retryable());
        assert!(SmsError::RequestFailed("HTTP 502".to_string()).is_retryable());
    }

    #[test]
    fn non_retryable_errors() {
        assert!(!SmsError::Configuration("test".to_string()).is_retryable());
        assert!(!SmsError::InvalidRecipient("abc".to_string()).is_retryable());
        assert!(!SmsError::Rejected("bad sender id".to_string()).is_retryable());
        assert!(!SmsError::ParseError("bad json".to_string()).is_retryable());
    }

    #[test]
    fn rejected_display_carries_gateway_message() {
        let err = SmsError::Rejected("Invalid Authentication".to_string());
        assert!(err.to_string().contains("Invalid Authentication"));
    }
}
