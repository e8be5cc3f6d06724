//! SMS gateway configuration

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Configuration for the Fast2SMS bulk SMS API
#[derive(Clone, Serialize, Deserialize)]
pub struct Fast2SmsConfig {
    /// API key (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Base URL for the SMS API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Registered sender id shown to the rider
    #[serde(default = "default_sender_id")]
    pub sender_id: String,

    /// Connection timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Shared secret for inbound webhook signatures (sensitive)
    #[serde(default, skip_serializing)]
    pub webhook_secret: Option<SecretString>,

    /// Reject unsigned inbound webhooks (off by default; not all gateway
    /// plans sign their callbacks)
    #[serde(default)]
    pub signature_required: bool,
}

impl std::fmt::Debug for Fast2SmsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fast2SmsConfig")
            .field(
                "api_key",
                &if self.api_key.is_some() {
                    Some("[REDACTED]")
                } else {
                    None
                },
            )
            .field("base_url", &self.base_url)
            .field("sender_id", &self.sender_id)
            .field("timeout_secs", &self.timeout_secs)
            .field(
                "webhook_secret",
                &if self.webhook_secret.is_some() {
                    Some("[REDACTED]")
                } else {
                    None
                },
            )
            .field("signature_required", &self.signature_required)
            .finish()
    }
}

fn default_base_url() -> String {
    "https://www.fast2sms.com/dev".to_string()
}

fn default_sender_id() -> String {
    "FSTSMS".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

impl Default for Fast2SmsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            sender_id: default_sender_id(),
            timeout_secs: default_timeout_secs(),
            webhook_secret: None,
            signature_required: false,
        }
    }
}

impl Fast2SmsConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            api_key: Some(SecretString::from("test-key")),
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns a message naming the offending field.
    pub fn validate(&self) -> Result<(), String> {
        if self
            .api_key
            .as_ref()
            .is_none_or(|key| key.expose_secret().is_empty())
        {
            return Err("sms.api_key must be set".to_string());
        }
        if self.base_url.is_empty() {
            return Err("sms.base_url must not be empty".to_string());
        }
        if self.sender_id.is_empty() {
            return Err("sms.sender_id must not be empty".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("sms.timeout_secs must be at least 1".to_string());
        }
        if self.signature_required
            && self
                .webhook_secret
                .as_ref()
                .is_none_or(|secret| secret.expose_secret().is_empty())
        {
            return Err("sms.webhook_secret must be set when signature_required".to_string());
        }
        Ok(())
    }
}
