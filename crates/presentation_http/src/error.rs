//! API error handling
//!
//! Errors answered directly by the HTTP layer. Pipeline failures never show
//! up here: the rider-facing outcome travels over SMS and the webhook still
//! answers 200. These cover requests that never reach the pipeline at all.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Errors surfaced as non-200 HTTP responses
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body could not be accepted
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Signature verification failed
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The server is not in a state to process the request
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
    /// Machine-readable error code
    pub code: String,
}

impl ApiError {
    /// Status code and stable error code for this error
    #[must_use]
    pub const fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            Self::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "unauthorized"),
            Self::ServiceUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "service_unavailable"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let message = match self {
            Self::BadRequest(message)
            | Self::Unauthorized(message)
            | Self::ServiceUnavailable(message) => message,
        };

        (
            status,
            Json(ErrorResponse {
                error: message,
                code: code.to_string(),
            }),
        )
            .into_response()
    }
}
