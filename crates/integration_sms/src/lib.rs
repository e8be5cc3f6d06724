//! SMS gateway integration for Busline
//!
//! Sends rider-facing replies through a Fast2SMS-style bulk SMS API and
//! provides the inbound-webhook payload types plus HMAC signature
//! verification for gateways that sign their callbacks.
//!
//! # Architecture
//!
//! The crate follows the client-trait pattern shared by the integration
//! crates. [`SmsClient`] defines the send interface, implemented by
//! [`Fast2SmsClient`]. Recipient numbers are normalized before dispatch
//! (spaces and a leading `+` stripped, bare 10-digit national numbers get
//! the `91` country prefix the provider expects).
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_sms::{Fast2SmsClient, Fast2SmsConfig, SmsClient};
//!
//! let config = Fast2SmsConfig::default();
//! let client = Fast2SmsClient::new(&config)?;
//!
//! let report = client.send_sms("+91 9876543210", "Bus 12A in 4 min").await?;
//! ```

mod client;
mod config;
mod error;
mod models;
pub mod webhook;

pub use client::{Fast2SmsClient, SmsClient};
pub use config::Fast2SmsConfig;
pub use error::SmsError;
pub use models::SendSmsReport;
pub use webhook::{InboundSmsPayload, verify_signature};
