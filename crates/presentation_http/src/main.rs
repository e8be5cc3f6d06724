//! Busline HTTP Server
//!
//! Main entry point for the HTTP API server.

use std::{sync::Arc, time::Duration};

use application::{
    BusEtaEstimator, Geocoder, PipelineOrchestrator, StopLocator, WalkEstimator,
    ports::{
        GeocodingPort, NearbyStopsPort, SmsDeliveryPort, TransitEtaPort, WalkingDirectionsPort,
    },
};
use infrastructure::{AppConfig, Fast2SmsDeliveryAdapter, GoogleMapsAdapter, TransitApiAdapter};
use integration_maps::GoogleMapsClient;
use integration_sms::Fast2SmsClient;
use integration_transit::TransitApiClient;
use presentation_http::{
    MetricsRecorderLayer, handlers::metrics::MetricsCollector, routes, state::AppState,
};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration before tracing so the chosen log format applies
    // from the first line; the load error is reported once logging is up.
    let (config, load_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    init_tracing(&config.server.log_format);

    if let Some(e) = load_error {
        tracing::warn!("Failed to load config, using defaults: {}", e);
    }

    info!("🚌 Busline v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Err(problems) = config.validate() {
        for problem in &problems {
            tracing::error!("Invalid configuration: {problem}");
        }
        anyhow::bail!("configuration rejected with {} problem(s)", problems.len());
    }

    info!(
        host = %config.server.host,
        port = %config.server.port,
        transit = %config.transit.base_url,
        "Configuration loaded"
    );

    // Initialize provider clients
    let maps_client = Arc::new(
        GoogleMapsClient::new(&config.maps)
            .map_err(|e| anyhow::anyhow!("Failed to initialize maps client: {e}"))?,
    );
    let transit_client = Arc::new(
        TransitApiClient::new(&config.transit)
            .map_err(|e| anyhow::anyhow!("Failed to initialize transit client: {e}"))?,
    );
    let sms_client = Arc::new(
        Fast2SmsClient::new(&config.sms)
            .map_err(|e| anyhow::anyhow!("Failed to initialize SMS client: {e}"))?,
    );

    // Port adapters. The maps adapter backs both geocoding and walking
    // directions, the transit adapter both stop lookup and departures.
    let maps_adapter = Arc::new(GoogleMapsAdapter::new(maps_client, config.retry.clone()));
    let transit_adapter = Arc::new(TransitApiAdapter::new(
        transit_client,
        config.retry.clone(),
        config.pipeline.departure_window_minutes,
    ));

    let geocoding: Arc<dyn GeocodingPort> = maps_adapter.clone();
    let walking: Arc<dyn WalkingDirectionsPort> = maps_adapter;
    let nearby_stops: Arc<dyn NearbyStopsPort> = transit_adapter.clone();
    let transit_eta: Arc<dyn TransitEtaPort> = transit_adapter;
    let delivery: Arc<dyn SmsDeliveryPort> = Arc::new(Fast2SmsDeliveryAdapter::new(sms_client));

    // Assemble the pipeline
    let orchestrator = PipelineOrchestrator::new(
        Geocoder::new(geocoding),
        StopLocator::new(nearby_stops, config.pipeline.search_radius_meters),
        WalkEstimator::new(walking, config.pipeline.walking_speed_mps),
        BusEtaEstimator::new(transit_eta),
        delivery,
        config.pipeline.request_deadline(),
    );

    // Initialize metrics collector
    let metrics = Arc::new(MetricsCollector::new());

    // Create app state
    let state = AppState {
        orchestrator: Arc::new(orchestrator),
        metrics: Arc::clone(&metrics),
        webhook_secret: config.sms.webhook_secret.clone(),
        signature_required: config.sms.signature_required,
    };

    // Build router
    let app = routes::create_router(state);

    // Configure CORS layer
    let cors_layer = if config.server.allowed_origins.is_empty() {
        // Development mode: allow all origins
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        // Production mode: restrict to configured origins
        use axum::http::{HeaderValue, Method};
        let origins: Vec<HeaderValue> = config
            .server
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(Any)
    };

    // Add middleware (order matters: first added = outermost)
    let app = app
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .layer(MetricsRecorderLayer::new(metrics));

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;

    info!("🚀 Server listening on http://{}", addr);
    info!("📚 API docs: http://{}/api-docs/openapi.json", addr);

    // Graceful shutdown configuration
    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_timeout))
        .await?;

    info!("👋 Server shutdown complete");

    Ok(())
}

/// Initialize the tracing subscriber, honoring the configured log format
fn init_tracing(log_format: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "busline_server=debug,tower_http=debug".into());

    if log_format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

/// Wait for shutdown signals (SIGINT, SIGTERM) and handle graceful shutdown
#[allow(clippy::expect_used)]
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        // Log error but continue waiting - this is a best-effort signal handler
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("📥 Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("📥 Received SIGTERM, initiating graceful shutdown...");
        }
    }

    info!("⏳ Waiting up to {:?} for connections to close...", timeout);
    // Note: The actual connection draining is handled by axum's graceful_shutdown
}
