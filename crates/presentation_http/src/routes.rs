//! Route definitions

use axum::{
    Router,
    routing::{get, post},
};

use crate::{handlers, openapi, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health endpoint
        .route("/health", get(handlers::health::health_check))
        // Metrics endpoints
        .route("/metrics", get(handlers::metrics::get_metrics))
        .route("/metrics/prometheus", get(handlers::metrics::get_metrics_prometheus))
        // Inbound SMS webhook
        .route("/webhook/sms", post(handlers::sms::receive_sms))
        // API documentation
        .merge(openapi::create_openapi_routes())
        // Attach state
        .with_state(state)
}
