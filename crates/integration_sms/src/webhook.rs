//! Inbound SMS webhook payload and signature verification
//!
//! Gateways forward rider messages as JSON callbacks. Plans that sign their
//! callbacks put an HMAC-SHA256 of the raw body (hex-encoded, optionally
//! `sha256=`-prefixed) in a header; verification is a plain boolean so the
//! HTTP layer decides how strict to be.

use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use tracing::warn;

type HmacSha256 = Hmac<Sha256>;

/// Inbound SMS as forwarded by the gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundSmsPayload {
    /// Phone number the rider sent from
    pub sender_id: String,
    /// Raw SMS text
    pub message: String,
}

/// Verify an inbound webhook signature
///
/// The signature is an HMAC-SHA256 over the raw request body, hex-encoded.
/// A `sha256=` prefix is tolerated since gateways differ on whether they
/// include one. Comparison happens in constant time.
#[must_use]
pub fn verify_signature(payload: &[u8], signature: &str, secret: &str) -> bool {
    let signature_hex = signature.strip_prefix("sha256=").unwrap_or(signature);

    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        warn!("Failed to create HMAC");
        return false;
    };

    mac.update(payload);

    let Ok(expected) = hex::decode(signature_hex) else {
        warn!("Failed to decode signature hex");
        return false;
    };

    mac.verify_slice(&expected).is_ok()
}
