//! Request metrics middleware
//!
//! Samples every request into the shared [`MetricsCollector`]: one
//! increment at entry, one status-classified timing at exit. Pipeline
//! outcomes are recorded separately by the webhook handler; this layer
//! only sees HTTP traffic.

use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
    time::Instant,
};

use axum::{extract::Request, response::Response};
use tower::{Layer, Service};

use crate::handlers::metrics::MetricsCollector;

/// Layer that records request counts and response times
#[derive(Clone, Debug)]
pub struct MetricsRecorderLayer {
    collector: Arc<MetricsCollector>,
}

impl MetricsRecorderLayer {
    /// Create a layer recording into `collector`
    #[must_use]
    pub fn new(collector: Arc<MetricsCollector>) -> Self {
        Self { collector }
    }
}

impl<S> Layer<S> for MetricsRecorderLayer {
    type Service = MetricsRecorder<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MetricsRecorder {
            inner,
            collector: Arc::clone(&self.collector),
        }
    }
}

/// Middleware service that samples each request
#[derive(Clone, Debug)]
pub struct MetricsRecorder<S> {
    inner: S,
    collector: Arc<MetricsCollector>,
}

impl<S> Service<Request> for MetricsRecorder<S>
where
    S: Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let mut inner = self.inner.clone();
        let collector = Arc::clone(&self.collector);

        Box::pin(async move {
            collector.request_start();
            let started = Instant::now();

            let response = inner.call(req).await?;

            let elapsed_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
            collector.request_end(elapsed_us, response.status().as_u16());

            Ok(response)
        })
    }
}

#[cfg(test)]
mod tests {
    use axum::{Router, body::Body, routing::get};
    use tower::ServiceExt;

    use super::*;

    async fn ok_handler() -> &'static str {
        "ok"
    }

    async fn failing_handler() -> (axum::http::StatusCode, &'static str) {
        (axum::http::StatusCode::INTERNAL_SERVER_ERROR, "boom")
    }

    fn collector_and_router() -> (Arc<MetricsCollector>, Router) {
        let collector = Arc::new(MetricsCollector::new());
        let router = Router::new()
            .route("/ok", get(ok_handler))
            .route("/fail", get(failing_handler))
            .layer(MetricsRecorderLayer::new(Arc::clone(&collector)));
        (collector, router)
    }

    #[tokio::test]
    async fn successful_request_is_counted() {
        let (collector, app) = collector_and_router();

        let response = app
            .oneshot(Request::builder().uri("/ok").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), axum::http::StatusCode::OK);

        let metrics = collector.request_metrics();
        assert_eq!(metrics.total_requests, 1);
        assert_eq!(metrics.success_count, 1);
        assert_eq!(metrics.active_requests, 0);
    }

    #[tokio::test]
    async fn server_error_is_classified() {
        let (collector, app) = collector_and_router();

        let _ = app
            .oneshot(Request::builder().uri("/fail").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let metrics = collector.request_metrics();
        assert_eq!(metrics.server_error_count, 1);
        assert_eq!(metrics.success_count, 0);
    }

    #[tokio::test]
    async fn unmatched_route_counts_as_client_error() {
        let (collector, app) = collector_and_router();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/missing")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), axum::http::StatusCode::NOT_FOUND);

        let metrics = collector.request_metrics();
        assert_eq!(metrics.client_error_count, 1);
    }
}
