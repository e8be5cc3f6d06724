//! Pipeline orchestration.
//!
//! One inbound SMS in, one delivered (or delivery-failed) reply out. Stages
//! run in a fixed order, walk and bus estimation concurrently; any stage
//! failure short-circuits into a rider-facing failure reply, which is still
//! delivered. Nothing here panics and nothing outlives the request.

use std::sync::Arc;
use std::time::Duration;

use domain::ReplyMessage;
use tracing::{debug, error, info, instrument, warn};

use crate::error::{FailureKind, PipelineError};
use crate::ports::SmsDeliveryPort;
use crate::request::InboundRequest;
use crate::services::bus_eta_estimator::BusEtaEstimator;
use crate::services::geocoder::Geocoder;
use crate::services::message_parser::parse_message;
use crate::services::response_composer::{compose_failure, compose_reply};
use crate::services::stop_locator::StopLocator;
use crate::services::walk_estimator::WalkEstimator;

/// Terminal state of one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// The reply was composed and the gateway accepted it.
    Sent,
    /// A stage failed; the kind names the failure category.
    Failed(FailureKind),
}

impl PipelineState {
    /// Stable label for logs, metrics, and the webhook summary.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sent => "sent",
            Self::Failed(kind) => kind.as_str(),
        }
    }
}

/// What the webhook layer gets back once a run terminates.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    /// Terminal state of the run.
    pub state: PipelineState,
    /// The reply that was (or was meant to be) delivered.
    pub reply: ReplyMessage,
    /// Whether the gateway accepted the reply.
    pub delivered: bool,
}

/// Sequences the pipeline stages for each inbound message.
///
/// Shared behind `Arc` across requests; holds no mutable state.
pub struct PipelineOrchestrator {
    geocoder: Geocoder,
    stop_locator: StopLocator,
    walk_estimator: WalkEstimator,
    bus_eta_estimator: BusEtaEstimator,
    delivery: Arc<dyn SmsDeliveryPort>,
    request_deadline: Duration,
}

impl PipelineOrchestrator {
    /// Wire the orchestrator from its stage services and the delivery port.
    #[must_use]
    pub fn new(
        geocoder: Geocoder,
        stop_locator: StopLocator,
        walk_estimator: WalkEstimator,
        bus_eta_estimator: BusEtaEstimator,
        delivery: Arc<dyn SmsDeliveryPort>,
        request_deadline: Duration,
    ) -> Self {
        Self {
            geocoder,
            stop_locator,
            walk_estimator,
            bus_eta_estimator,
            delivery,
            request_deadline,
        }
    }

    /// Run the pipeline for one inbound message and deliver the reply.
    ///
    /// Never returns an error: every stage failure becomes a rider-facing
    /// failure reply, and a failed delivery is recorded in the report
    /// instead of propagating. The whole run is bounded by the configured
    /// request deadline; on expiry the rider gets the temporary-outage text.
    #[instrument(skip(self, request), fields(sender = %request.sender_id))]
    pub async fn handle(&self, request: &InboundRequest) -> PipelineReport {
        let staged = tokio::time::timeout(
            self.request_deadline,
            self.run_stages(&request.raw_message),
        )
        .await
        .unwrap_or(Err(PipelineError::Timeout));

        let (state, reply) = match staged {
            Ok(reply) => (PipelineState::Sent, reply),
            Err(err) => {
                warn!(kind = %err.kind(), error = %err, "pipeline stage failed");
                (PipelineState::Failed(err.kind()), compose_failure(&err))
            },
        };

        let delivered = match self.delivery.send_reply(&request.sender_id, &reply).await {
            Ok(()) => true,
            Err(err) => {
                error!(error = %err, "reply delivery failed");
                false
            },
        };

        // A composed reply that never left the building is a delivery
        // failure, not a success; an earlier stage failure keeps its kind.
        let state = match state {
            PipelineState::Sent if !delivered => PipelineState::Failed(FailureKind::DeliveryFailed),
            other => other,
        };

        info!(
            state = state.as_str(),
            delivered,
            reply_chars = reply.char_count(),
            "pipeline finished"
        );
        PipelineReport {
            state,
            reply,
            delivered,
        }
    }

    async fn run_stages(&self, raw_message: &str) -> Result<ReplyMessage, PipelineError> {
        let query = parse_message(raw_message)?;
        debug!(route = %query.route_id, "parsed");

        let origin = self.geocoder.resolve(&query.location_text).await?;
        debug!(%origin, "geocoded");

        let stop = self
            .stop_locator
            .find_nearest_stop(&origin, &query.route_id)
            .await?;
        debug!(stop_id = %stop.id, "stop located");

        let (walk, bus) = tokio::join!(
            self.walk_estimator.estimate_walk(&origin, &stop.location),
            self.bus_eta_estimator.estimate(&stop, &query.route_id),
        );
        debug!(
            walk_available = walk.is_some(),
            bus_confidence = bus.confidence(),
            "estimated"
        );

        let reply = compose_reply(&query.route_id, &stop, walk.as_ref(), &bus);
        debug!(reply_chars = reply.char_count(), "composed");
        Ok(reply)
    }
}
