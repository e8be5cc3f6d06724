//! Application state shared across handlers

use std::sync::Arc;

use application::PipelineOrchestrator;
use secrecy::SecretString;

use crate::handlers::metrics::MetricsCollector;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Pipeline entry point; one call per inbound message
    pub orchestrator: Arc<PipelineOrchestrator>,
    /// Process-wide request and pipeline counters
    pub metrics: Arc<MetricsCollector>,
    /// Secret for webhook signature verification, when the gateway signs
    pub webhook_secret: Option<SecretString>,
    /// Reject callbacks whose signature is missing or wrong
    pub signature_required: bool,
}
