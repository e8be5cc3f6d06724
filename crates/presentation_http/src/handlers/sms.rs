//! Inbound SMS webhook handler
//!
//! The gateway posts each rider message here as JSON. The handler verifies
//! the optional callback signature, runs the pipeline, and answers with a
//! short summary. Pipeline failures are not HTTP failures: the rider gets
//! the composed failure SMS and the webhook still answers 200.

use application::InboundRequest;
use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::HeaderMap,
};
use integration_sms::{InboundSmsPayload, verify_signature};
use secrecy::ExposeSecret;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};
use utoipa::ToSchema;

use crate::{error::ApiError, state::AppState};

/// Header carrying the HMAC-SHA256 of the raw request body
const SIGNATURE_HEADER: &str = "x-webhook-signature";

/// Inbound webhook payload, as the gateway posts it
#[derive(Debug, ToSchema)]
#[schema(example = json!({
    "sender_id": "+919876543210",
    "message": "Indiranagar 335E"
}))]
pub struct InboundSmsBody {
    /// Phone number the rider sent from
    pub sender_id: String,
    /// Raw SMS text, `LOCATION ROUTE_NUMBER`
    pub message: String,
}

/// Summary returned to the gateway after a pipeline run
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SmsWebhookResponse {
    /// Rider the run was for
    pub sender_id: String,
    /// Terminal pipeline state (`sent` or a failure kind)
    pub outcome: String,
    /// Reply text handed to the gateway
    pub reply: String,
}

/// SMS webhook handler (POST)
///
/// Signature handling depends on configuration: with a secret and
/// `signature_required`, unsigned or badly signed callbacks are rejected;
/// with a secret alone, only signed callbacks are checked; without a
/// secret, callbacks are accepted as-is.
#[utoipa::path(
    post,
    path = "/webhook/sms",
    tag = "sms",
    request_body = InboundSmsBody,
    responses(
        (status = 200, description = "Pipeline ran; outcome in the body", body = SmsWebhookResponse),
        (status = 400, description = "Malformed payload", body = crate::error::ErrorResponse),
        (status = 401, description = "Signature verification failed", body = crate::error::ErrorResponse),
        (status = 503, description = "Signature required but no secret configured", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state, headers, body))]
pub async fn receive_sms(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<SmsWebhookResponse>, ApiError> {
    check_signature(&state, &headers, &body)?;

    let payload: InboundSmsPayload = serde_json::from_slice(&body)
        .map_err(|e| ApiError::BadRequest(format!("invalid payload: {e}")))?;

    if payload.sender_id.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "sender_id must not be empty".to_string(),
        ));
    }
    if payload.message.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "message must not be empty".to_string(),
        ));
    }

    debug!(
        sender = %payload.sender_id,
        text_len = payload.message.len(),
        "processing inbound SMS"
    );

    let request = InboundRequest::new(&payload.sender_id, &payload.message);
    let report = state.orchestrator.handle(&request).await;
    state.metrics.record_pipeline(&report);

    info!(
        sender = %payload.sender_id,
        outcome = report.state.as_str(),
        delivered = report.delivered,
        "inbound SMS handled"
    );

    Ok(Json(SmsWebhookResponse {
        sender_id: payload.sender_id,
        outcome: report.state.as_str().to_string(),
        reply: report.reply.text().to_string(),
    }))
}

fn check_signature(state: &AppState, headers: &HeaderMap, body: &[u8]) -> Result<(), ApiError> {
    let Some(secret) = &state.webhook_secret else {
        if state.signature_required {
            warn!("webhook callback received but no webhook_secret configured");
            return Err(ApiError::ServiceUnavailable(
                "webhook secret not configured".to_string(),
            ));
        }
        return Ok(());
    };

    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok());

    match signature {
        Some(signature) => {
            if verify_signature(body, signature, secret.expose_secret()) {
                Ok(())
            } else {
                warn!("webhook signature verification failed");
                Err(ApiError::Unauthorized("invalid signature".to_string()))
            }
        },
        None if state.signature_required => {
            warn!("webhook callback missing required signature");
            Err(ApiError::Unauthorized("missing signature".to_string()))
        },
        None => {
            debug!("unsigned callback accepted; signature not required");
            Ok(())
        },
    }
}
