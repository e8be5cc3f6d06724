//! Metrics and observability handlers
//!
//! Counts HTTP requests by status class and pipeline runs by terminal
//! state, exposed as JSON and as Prometheus text exposition.

use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::Instant,
};

use application::{FailureKind, PipelineReport, PipelineState};
use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::state::AppState;

/// Metrics response containing all application metrics
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MetricsResponse {
    /// Application metadata
    pub app: AppMetrics,
    /// Request statistics
    pub requests: RequestMetrics,
    /// Pipeline statistics
    pub pipeline: PipelineMetrics,
}

/// Application metadata
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AppMetrics {
    /// Application version
    pub version: String,
    /// Application name
    pub name: String,
    /// Uptime in seconds
    pub uptime_seconds: u64,
}

/// Request statistics
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RequestMetrics {
    /// Total requests received
    pub total_requests: u64,
    /// Successful requests (2xx)
    pub success_count: u64,
    /// Client errors (4xx)
    pub client_error_count: u64,
    /// Server errors (5xx)
    pub server_error_count: u64,
    /// Average response time in milliseconds
    pub avg_response_time_ms: f64,
    /// Current active requests
    pub active_requests: u64,
}

/// Pipeline statistics
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PipelineMetrics {
    /// Pipeline runs started
    pub messages_total: u64,
    /// Runs whose reply the gateway accepted
    pub replies_sent: u64,
    /// Failed runs by failure kind
    pub failures: FailureCounts,
    /// Replies the gateway did not accept, regardless of how the run ended
    pub delivery_failures: u64,
}

/// Failed pipeline runs, one counter per failure kind
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FailureCounts {
    /// Inbound text did not match `LOCATION ROUTE_NUMBER`
    pub malformed_message: u64,
    /// Geocoder had no candidates for the location text
    pub location_not_found: u64,
    /// No nearby stop services the requested route
    pub no_stop_for_route: u64,
    /// No walking path to the stop
    pub route_unavailable: u64,
    /// An upstream provider failed
    pub provider_unavailable: u64,
    /// The request deadline elapsed
    pub timeout: u64,
    /// The gateway refused an otherwise good reply
    pub delivery_failed: u64,
    /// A domain invariant was violated
    pub internal: u64,
}

impl FailureCounts {
    /// (label, count) pairs in a stable order, for text exposition.
    fn labeled(&self) -> [(&'static str, u64); 8] {
        [
            (FailureKind::MalformedMessage.as_str(), self.malformed_message),
            (FailureKind::LocationNotFound.as_str(), self.location_not_found),
            (FailureKind::NoStopForRoute.as_str(), self.no_stop_for_route),
            (FailureKind::RouteUnavailable.as_str(), self.route_unavailable),
            (
                FailureKind::ProviderUnavailable.as_str(),
                self.provider_unavailable,
            ),
            (FailureKind::Timeout.as_str(), self.timeout),
            (FailureKind::DeliveryFailed.as_str(), self.delivery_failed),
            (FailureKind::Internal.as_str(), self.internal),
        ]
    }
}

/// Atomic counters for request and pipeline metrics
#[derive(Debug)]
pub struct MetricsCollector {
    /// Server start time
    start_time: Instant,
    /// Total requests
    total_requests: AtomicU64,
    /// Successful requests
    success_count: AtomicU64,
    /// Client errors
    client_error_count: AtomicU64,
    /// Server errors
    server_error_count: AtomicU64,
    /// Active requests
    active_requests: AtomicU64,
    /// Total response time in microseconds
    total_response_time_us: AtomicU64,
    /// Pipeline runs started
    messages_total: AtomicU64,
    /// Runs whose reply the gateway accepted
    replies_sent: AtomicU64,
    /// Replies the gateway did not accept
    delivery_failures: AtomicU64,
    /// Failed runs, one counter per kind
    failed_malformed_message: AtomicU64,
    failed_location_not_found: AtomicU64,
    failed_no_stop_for_route: AtomicU64,
    failed_route_unavailable: AtomicU64,
    failed_provider_unavailable: AtomicU64,
    failed_timeout: AtomicU64,
    failed_delivery: AtomicU64,
    failed_internal: AtomicU64,
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsCollector {
    /// Create a new metrics collector
    #[must_use]
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            total_requests: AtomicU64::new(0),
            success_count: AtomicU64::new(0),
            client_error_count: AtomicU64::new(0),
            server_error_count: AtomicU64::new(0),
            active_requests: AtomicU64::new(0),
            total_response_time_us: AtomicU64::new(0),
            messages_total: AtomicU64::new(0),
            replies_sent: AtomicU64::new(0),
            delivery_failures: AtomicU64::new(0),
            failed_malformed_message: AtomicU64::new(0),
            failed_location_not_found: AtomicU64::new(0),
            failed_no_stop_for_route: AtomicU64::new(0),
            failed_route_unavailable: AtomicU64::new(0),
            failed_provider_unavailable: AtomicU64::new(0),
            failed_timeout: AtomicU64::new(0),
            failed_delivery: AtomicU64::new(0),
            failed_internal: AtomicU64::new(0),
        }
    }

    /// Record start of a request
    pub fn request_start(&self) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        self.active_requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Record end of a request
    pub fn request_end(&self, response_time_us: u64, status_code: u16) {
        self.active_requests.fetch_sub(1, Ordering::Relaxed);
        self.total_response_time_us
            .fetch_add(response_time_us, Ordering::Relaxed);

        match status_code {
            200..=299 => {
                self.success_count.fetch_add(1, Ordering::Relaxed);
            },
            400..=499 => {
                self.client_error_count.fetch_add(1, Ordering::Relaxed);
            },
            500..=599 => {
                self.server_error_count.fetch_add(1, Ordering::Relaxed);
            },
            _ => {},
        }
    }

    /// Record a finished pipeline run
    pub fn record_pipeline(&self, report: &PipelineReport) {
        self.messages_total.fetch_add(1, Ordering::Relaxed);

        match report.state {
            PipelineState::Sent => {
                self.replies_sent.fetch_add(1, Ordering::Relaxed);
            },
            PipelineState::Failed(kind) => {
                self.failure_counter(kind).fetch_add(1, Ordering::Relaxed);
            },
        }

        if !report.delivered {
            self.delivery_failures.fetch_add(1, Ordering::Relaxed);
        }
    }

    const fn failure_counter(&self, kind: FailureKind) -> &AtomicU64 {
        match kind {
            FailureKind::MalformedMessage => &self.failed_malformed_message,
            FailureKind::LocationNotFound => &self.failed_location_not_found,
            FailureKind::NoStopForRoute => &self.failed_no_stop_for_route,
            FailureKind::RouteUnavailable => &self.failed_route_unavailable,
            FailureKind::ProviderUnavailable => &self.failed_provider_unavailable,
            FailureKind::Timeout => &self.failed_timeout,
            FailureKind::DeliveryFailed => &self.failed_delivery,
            FailureKind::Internal => &self.failed_internal,
        }
    }

    /// Get uptime in seconds
    #[must_use]
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Get request metrics
    #[must_use]
    pub fn request_metrics(&self) -> RequestMetrics {
        let total = self.total_requests.load(Ordering::Relaxed);
        let total_time = self.total_response_time_us.load(Ordering::Relaxed);

        RequestMetrics {
            total_requests: total,
            success_count: self.success_count.load(Ordering::Relaxed),
            client_error_count: self.client_error_count.load(Ordering::Relaxed),
            server_error_count: self.server_error_count.load(Ordering::Relaxed),
            #[allow(clippy::cast_precision_loss)]
            avg_response_time_ms: if total > 0 {
                (total_time as f64) / (total as f64) / 1000.0
            } else {
                0.0
            },
            active_requests: self.active_requests.load(Ordering::Relaxed),
        }
    }

    /// Get pipeline metrics
    #[must_use]
    pub fn pipeline_metrics(&self) -> PipelineMetrics {
        PipelineMetrics {
            messages_total: self.messages_total.load(Ordering::Relaxed),
            replies_sent: self.replies_sent.load(Ordering::Relaxed),
            failures: FailureCounts {
                malformed_message: self.failed_malformed_message.load(Ordering::Relaxed),
                location_not_found: self.failed_location_not_found.load(Ordering::Relaxed),
                no_stop_for_route: self.failed_no_stop_for_route.load(Ordering::Relaxed),
                route_unavailable: self.failed_route_unavailable.load(Ordering::Relaxed),
                provider_unavailable: self.failed_provider_unavailable.load(Ordering::Relaxed),
                timeout: self.failed_timeout.load(Ordering::Relaxed),
                delivery_failed: self.failed_delivery.load(Ordering::Relaxed),
                internal: self.failed_internal.load(Ordering::Relaxed),
            },
            delivery_failures: self.delivery_failures.load(Ordering::Relaxed),
        }
    }
}

/// Get metrics endpoint
#[utoipa::path(
    get,
    path = "/metrics",
    tag = "metrics",
    responses(
        (status = 200, description = "Application metrics", body = MetricsResponse)
    )
)]
pub async fn get_metrics(State(state): State<AppState>) -> Json<MetricsResponse> {
    let metrics = state.metrics.as_ref();

    Json(MetricsResponse {
        app: AppMetrics {
            version: env!("CARGO_PKG_VERSION").to_string(),
            name: env!("CARGO_PKG_NAME").to_string(),
            uptime_seconds: metrics.uptime_seconds(),
        },
        requests: metrics.request_metrics(),
        pipeline: metrics.pipeline_metrics(),
    })
}

/// Prometheus-style metrics endpoint
#[utoipa::path(
    get,
    path = "/metrics/prometheus",
    tag = "metrics",
    responses(
        (status = 200, description = "Prometheus metrics", content_type = "text/plain")
    )
)]
pub async fn get_metrics_prometheus(State(state): State<AppState>) -> String {
    let metrics = state.metrics.as_ref();
    let request_metrics = metrics.request_metrics();
    let pipeline_metrics = metrics.pipeline_metrics();

    let mut output = String::new();

    // Application metrics
    output.push_str(&format!(
        "# HELP app_uptime_seconds Application uptime in seconds\n\
         # TYPE app_uptime_seconds counter\n\
         app_uptime_seconds {}\n\n",
        metrics.uptime_seconds()
    ));

    // Request metrics
    output.push_str(&format!(
        "# HELP http_requests_total Total HTTP requests\n\
         # TYPE http_requests_total counter\n\
         http_requests_total {}\n\n",
        request_metrics.total_requests
    ));

    output.push_str(&format!(
        "# HELP http_requests_success_total Successful HTTP requests\n\
         # TYPE http_requests_success_total counter\n\
         http_requests_success_total {}\n\n",
        request_metrics.success_count
    ));

    output.push_str(&format!(
        "# HELP http_requests_client_error_total Client error HTTP requests\n\
         # TYPE http_requests_client_error_total counter\n\
         http_requests_client_error_total {}\n\n",
        request_metrics.client_error_count
    ));

    output.push_str(&format!(
        "# HELP http_requests_server_error_total Server error HTTP requests\n\
         # TYPE http_requests_server_error_total counter\n\
         http_requests_server_error_total {}\n\n",
        request_metrics.server_error_count
    ));

    output.push_str(&format!(
        "# HELP http_requests_active Current active HTTP requests\n\
         # TYPE http_requests_active gauge\n\
         http_requests_active {}\n\n",
        request_metrics.active_requests
    ));

    output.push_str(&format!(
        "# HELP http_response_time_avg_ms Average response time in milliseconds\n\
         # TYPE http_response_time_avg_ms gauge\n\
         http_response_time_avg_ms {:.2}\n\n",
        request_metrics.avg_response_time_ms
    ));

    // Pipeline metrics
    output.push_str(&format!(
        "# HELP sms_messages_total Inbound messages run through the pipeline\n\
         # TYPE sms_messages_total counter\n\
         sms_messages_total {}\n\n",
        pipeline_metrics.messages_total
    ));

    output.push_str(&format!(
        "# HELP sms_replies_sent_total Replies accepted by the gateway\n\
         # TYPE sms_replies_sent_total counter\n\
         sms_replies_sent_total {}\n\n",
        pipeline_metrics.replies_sent
    ));

    output.push_str(
        "# HELP sms_pipeline_failures_total Failed pipeline runs by kind\n\
         # TYPE sms_pipeline_failures_total counter\n",
    );
    for (kind, count) in pipeline_metrics.failures.labeled() {
        output.push_str(&format!(
            "sms_pipeline_failures_total{{kind=\"{kind}\"}} {count}\n"
        ));
    }
    output.push('\n');

    output.push_str(&format!(
        "# HELP sms_delivery_failures_total Replies the gateway did not accept\n\
         # TYPE sms_delivery_failures_total counter\n\
         sms_delivery_failures_total {}\n",
        pipeline_metrics.delivery_failures
    ));

    output
}
