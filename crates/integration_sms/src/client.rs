//! Fast2SMS client for sending rider replies
//!
//! Uses the bulk send endpoint (`/bulkV2`) with the transactional "q" route.
//! The gateway answers with a `return` flag rather than HTTP status alone, so
//! acceptance is decided on the body.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::config::Fast2SmsConfig;
use crate::error::SmsError;
use crate::models::SendSmsReport;

/// Trait for SMS gateway clients
#[async_trait]
pub trait SmsClient: Send + Sync {
    /// Send a text to a recipient, returning the gateway's acceptance report
    async fn send_sms(&self, recipient: &str, text: &str) -> Result<SendSmsReport, SmsError>;
}

/// HTTP client for the Fast2SMS bulk SMS API
#[derive(Debug)]
pub struct Fast2SmsClient {
    client: Client,
    config: Fast2SmsConfig,
}

impl Fast2SmsClient {
    /// Create a new SMS client
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the HTTP client cannot
    /// be initialized.
    pub fn new(config: &Fast2SmsConfig) -> Result<Self, SmsError> {
        if config
            .api_key
            .as_ref()
            .is_none_or(|key| key.expose_secret().is_empty())
        {
            return Err(SmsError::Configuration("api_key is required".to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("Busline/1.0")
            .build()
            .map_err(|e| SmsError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    fn key(&self) -> &str {
        self.config
            .api_key
            .as_ref()
            .map_or("", |key| key.expose_secret())
    }

    /// Normalize a recipient into the digit-only form the gateway expects
    ///
    /// Strips whitespace and a single leading `+`; a bare 10-digit national
    /// number gets the "91" country prefix.
    fn normalize_recipient(recipient: &str) -> Result<String, SmsError> {
        let compact: String = recipient.chars().filter(|c| !c.is_whitespace()).collect();
        let digits = compact.strip_prefix('+').unwrap_or(&compact);

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(SmsError::InvalidRecipient(recipient.to_string()));
        }

        if digits.len() == 10 {
            Ok(format!("91{digits}"))
        } else {
            Ok(digits.to_string())
        }
    }

    /// Parse the send response body into a report or a rejection
    fn parse_send_response(body: &str) -> Result<SendSmsReport, SmsError> {
        let raw: RawSendResponse =
            serde_json::from_str(body).map_err(|e| SmsError::ParseError(e.to_string()))?;

        let messages = raw.message.into_vec();
        if raw.accepted {
            Ok(SendSmsReport {
                request_id: raw.request_id,
                messages,
            })
        } else {
            let reason = if messages.is_empty() {
                "no reason given".to_string()
            } else {
                messages.join("; ")
            };
            Err(SmsError::Rejected(reason))
        }
    }
}

#[async_trait]
impl SmsClient for Fast2SmsClient {
    #[instrument(skip(self, text))]
    async fn send_sms(&self, recipient: &str, text: &str) -> Result<SendSmsReport, SmsError> {
        let numbers = Self::normalize_recipient(recipient)?;

        let request = SendSmsRequest {
            route: "q",
            sender_id: &self.config.sender_id,
            message: text,
            language: "english",
            numbers: &numbers,
            flash: 0,
        };

        let url = format!("{}/bulkV2", self.config.base_url);
        debug!(%url, message_len = text.len(), "sending SMS");

        let response = self
            .client
            .post(&url)
            .header("authorization", self.key())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SmsError::Timeout {
                        timeout_secs: self.config.timeout_secs,
                    }
                } else {
                    SmsError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SmsError::ParseError(e.to_string()))?;

        if !status.is_success() {
            // Client-error bodies usually name the refusal reason
            if status.is_client_error() {
                if let Err(rejected @ SmsError::Rejected(_)) = Self::parse_send_response(&body) {
                    warn!(%status, "gateway refused send");
                    return Err(rejected);
                }
            }
            return Err(SmsError::RequestFailed(format!("HTTP {status}")));
        }

        let report = Self::parse_send_response(&body);
        if let Err(SmsError::Rejected(reason)) = &report {
            warn!(%reason, "gateway rejected send");
        }
        let report = report?;

        debug!(request_id = ?report.request_id, "SMS accepted by gateway");
        Ok(report)
    }
}

// --- Wire types ---

#[derive(Debug, Serialize)]
struct SendSmsRequest<'a> {
    route: &'static str,
    sender_id: &'a str,
    message: &'a str,
    language: &'static str,
    numbers: &'a str,
    flash: u8,
}

#[derive(Debug, Deserialize)]
struct RawSendResponse {
    #[serde(rename = "return")]
    accepted: bool,
    request_id: Option<String>,
    #[serde(default)]
    message: RawMessages,
}

/// The gateway reports `message` as an array on success but a bare string
/// on most refusals
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawMessages {
    One(String),
    Many(Vec<String>),
}

impl Default for RawMessages {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

impl RawMessages {
    fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(message) => vec![message],
            Self::Many(messages) => messages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_requires_api_key() {
        let config = Fast2SmsConfig::default();
        let err = Fast2SmsClient::new(&config).unwrap_err();
        assert!(matches!(err, SmsError::Configuration(_)));
    }

    #[test]
    fn normalize_strips_plus_and_spaces() {
        let normalized = Fast2SmsClient::normalize_recipient("+91 98765 43210").unwrap();
        assert_eq!(normalized, "919876543210");
    }

    #[test]
    fn normalize_prefixes_bare_national_number() {
        let normalized = Fast2SmsClient::normalize_recipient("9876543210").unwrap();
        assert_eq!(normalized, "919876543210");
    }

    #[test]
    fn normalize_leaves_prefixed_number_alone() {
        let normalized = Fast2SmsClient::normalize_recipient("919876543210").unwrap();
        assert_eq!(normalized, "919876543210");
    }

    #[test]
    fn normalize_rejects_non_digits() {
        let err = Fast2SmsClient::normalize_recipient("98765-43210").unwrap_err();
        assert!(matches!(err, SmsError::InvalidRecipient(_)));

        let err = Fast2SmsClient::normalize_recipient("rider@example.com").unwrap_err();
        assert!(matches!(err, SmsError::InvalidRecipient(_)));
    }

    #[test]
    fn normalize_rejects_empty() {
        assert!(Fast2SmsClient::normalize_recipient("").is_err());
        assert!(Fast2SmsClient::normalize_recipient("+").is_err());
        assert!(Fast2SmsClient::normalize_recipient("   ").is_err());
    }

    #[test]
    fn parse_accepted_response() {
        let json = r#"{
            "return": true,
            "request_id": "lwdtp7cjyqxvfe9",
            "message": ["SMS sent successfully."]
        }"#;

        let report = Fast2SmsClient::parse_send_response(json).unwrap();
        assert_eq!(report.request_id.as_deref(), Some("lwdtp7cjyqxvfe9"));
        assert_eq!(report.messages, vec!["SMS sent successfully."]);
    }

    #[test]
    fn parse_accepted_without_request_id() {
        let json = r#"{ "return": true, "message": [] }"#;
        let report = Fast2SmsClient::parse_send_response(json).unwrap();
        assert!(report.request_id.is_none());
        assert!(report.messages.is_empty());
    }

    #[test]
    fn parse_rejected_with_string_message() {
        let json = r#"{
            "return": false,
            "status_code": 412,
            "message": "Invalid Authentication, Check Authorization Key"
        }"#;

        let err = Fast2SmsClient::parse_send_response(json).unwrap_err();
        assert!(matches!(err, SmsError::Rejected(reason) if reason.contains("Authentication")));
    }

    #[test]
    fn parse_rejected_with_message_list() {
        let json = r#"{ "return": false, "message": ["Number blocked", "DND active"] }"#;
        let err = Fast2SmsClient::parse_send_response(json).unwrap_err();
        assert!(
            matches!(err, SmsError::Rejected(reason) if reason == "Number blocked; DND active")
        );
    }

    #[test]
    fn parse_rejected_without_reason() {
        let json = r#"{ "return": false }"#;
        let err = Fast2SmsClient::parse_send_response(json).unwrap_err();
        assert!(matches!(err, SmsError::Rejected(reason) if reason == "no reason given"));
    }

    #[test]
    fn parse_invalid_json() {
        let err = Fast2SmsClient::parse_send_response("not json").unwrap_err();
        assert!(matches!(err, SmsError::ParseError(_)));
    }
}
