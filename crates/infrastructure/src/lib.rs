//! Infrastructure layer - adapters for external systems
//!
//! Implements the ports defined in the application layer over the
//! integration clients, and owns configuration loading and retry policy.

pub mod adapters;
pub mod config;
pub mod retry;

pub use adapters::{Fast2SmsDeliveryAdapter, GoogleMapsAdapter, TransitApiAdapter};
pub use config::{AppConfig, MAX_SEARCH_RADIUS_METERS, PipelineConfig, ServerConfig};
pub use retry::{RetryConfig, RetryResult, Retryable, with_retry};
