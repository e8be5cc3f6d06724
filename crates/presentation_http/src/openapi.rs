//! OpenAPI documentation module
//!
//! Provides the OpenAPI 3.0 description of the Busline HTTP API as a
//! machine-readable JSON document at `/api-docs/openapi.json`.

// Allow clippy warnings from macro-generated code in utoipa derive
#![allow(clippy::needless_for_each)]

use axum::{Json, Router, routing::get};
use utoipa::OpenApi;

use crate::{handlers, state::AppState};

/// OpenAPI documentation for Busline
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Busline API",
        version = "0.1.0",
        description = "SMS bus-arrival service. Riders text a location and a route \
                       number and receive the nearest stop, the walk to reach it, and \
                       the next departure in a single reply.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "sms", description = "Inbound SMS webhook"),
        (name = "metrics", description = "Application metrics and observability")
    ),
    paths(
        // Health endpoints
        handlers::health::health_check,
        // SMS webhook
        handlers::sms::receive_sms,
        // Metrics endpoints
        handlers::metrics::get_metrics,
        handlers::metrics::get_metrics_prometheus,
    ),
    components(
        schemas(
            // Health schemas
            handlers::health::HealthResponse,
            // SMS schemas
            handlers::sms::InboundSmsBody,
            handlers::sms::SmsWebhookResponse,
            // Metrics schemas
            handlers::metrics::MetricsResponse,
            handlers::metrics::AppMetrics,
            handlers::metrics::RequestMetrics,
            handlers::metrics::PipelineMetrics,
            handlers::metrics::FailureCounts,
            // Error schemas
            crate::error::ErrorResponse,
        )
    )
)]
#[derive(Debug)]
pub struct ApiDoc;

/// Serve the OpenAPI document as JSON
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Create OpenAPI documentation routes
///
/// Adds the following routes:
/// - `/api-docs/openapi.json` - OpenAPI specification
pub fn create_openapi_routes() -> Router<AppState> {
    Router::new().route("/api-docs/openapi.json", get(openapi_json))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_spec_is_valid() {
        let doc = ApiDoc::openapi();
        let json = serde_json::to_string_pretty(&doc).expect("Failed to serialize OpenAPI spec");
        assert!(json.contains("Busline API"));
        assert!(json.contains("/health"));
        assert!(json.contains("/webhook/sms"));
        assert!(json.contains("/metrics"));
    }

    #[test]
    fn openapi_has_all_tags() {
        let doc = ApiDoc::openapi();
        let tags: Vec<&str> = doc
            .tags
            .as_ref()
            .map(|t| t.iter().map(|tag| tag.name.as_str()).collect())
            .unwrap_or_default();

        assert!(tags.contains(&"health"));
        assert!(tags.contains(&"sms"));
        assert!(tags.contains(&"metrics"));
    }

    #[test]
    fn openapi_documents_error_and_failure_schemas() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("Missing components");

        assert!(components.schemas.contains_key("ErrorResponse"));
        assert!(components.schemas.contains_key("FailureCounts"));
        assert!(components.schemas.contains_key("SmsWebhookResponse"));
    }
}
