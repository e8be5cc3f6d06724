//! Busline HTTP presentation layer
//!
//! This crate provides the HTTP API for Busline: the inbound SMS webhook,
//! health and metrics endpoints, and the OpenAPI description.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use middleware::{MetricsRecorder, MetricsRecorderLayer};
pub use routes::create_router;
pub use state::AppState;
