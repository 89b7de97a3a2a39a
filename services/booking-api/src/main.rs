//! AviatorTutor Booking API
//!
//! Booking lifecycle microservice providing REST endpoints.
//!
//! ## REST Endpoints
//!
//! - `POST /api/v1/bookings` - Create a booking
//! - `GET /api/v1/bookings` - List bookings scoped to the caller
//! - `GET /api/v1/bookings/{id}` - Get a booking
//! - `GET /api/v1/bookings/{id}/request` - Get the companion booking request
//! - `POST /api/v1/bookings/{id}/accept` - Tutor accepts (pending → confirmed)
//! - `POST /api/v1/bookings/{id}/decline` - Tutor declines
//! - `POST /api/v1/bookings/{id}/reschedule` - Move the lesson
//! - `POST /api/v1/bookings/{id}/cancel` - Cancel with a reason
//! - `POST /api/v1/bookings/{id}/complete` - Tutor marks delivered; wallet credited
//! - `POST /api/v1/bookings/{id}/messages` - Send a chat message (contact-info filtered)
//! - `GET /api/v1/bookings/{id}/messages` - List chat messages
//! - `GET /api/v1/wallet` - Tutor's earnings ledger
//!
//! ## Health Endpoints
//!
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe
//! - `GET /metrics` - Prometheus metrics

mod config;
mod error;
mod extractors;
mod handlers;
mod state;

use std::net::SocketAddr;

use axum::routing::{get, post};
use axum::Router;
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::handlers::{health, ready};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive("booking_api=debug".parse()?))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting AviatorTutor Booking API");

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!(
        http_port = config.http_port,
        platform_fee_percent = %config.booking.platform_fee_percent,
        "Configuration loaded"
    );

    // Initialize metrics
    let metrics_handle = if config.metrics_enabled {
        Some(setup_metrics()?)
    } else {
        None
    };

    // Create database pool
    let pool = aviator_db::create_pool(&config.database_url).await?;
    tracing::info!("Database pool created");

    // Create application state (repositories + services)
    let state = AppState::new(pool, config.clone());

    // Build HTTP router
    let app = build_router(state, metrics_handle);

    let http_addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    run_http_server(app, http_addr).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

fn build_router(state: AppState, metrics_handle: Option<PrometheusHandle>) -> Router {
    let request_timeout = state.request_timeout();

    // API v1 routes
    let api_v1 = Router::new()
        // Booking lifecycle
        .route("/bookings", post(handlers::create_booking))
        .route("/bookings", get(handlers::list_bookings))
        .route("/bookings/{id}", get(handlers::get_booking))
        .route("/bookings/{id}/request", get(handlers::get_booking_request))
        .route("/bookings/{id}/accept", post(handlers::accept_booking))
        .route("/bookings/{id}/decline", post(handlers::decline_booking))
        .route("/bookings/{id}/reschedule", post(handlers::reschedule_booking))
        .route("/bookings/{id}/cancel", post(handlers::cancel_booking))
        .route("/bookings/{id}/complete", post(handlers::complete_booking))
        // Booking chat
        .route("/bookings/{id}/messages", post(handlers::send_message))
        .route("/bookings/{id}/messages", get(handlers::list_messages))
        // Earnings ledger
        .route("/wallet", get(handlers::get_wallet));

    // Health routes (no timeout - must always respond quickly)
    let health_routes = Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready));

    // Metrics route (no timeout)
    let metrics_route = if let Some(handle) = metrics_handle {
        Router::new().route("/metrics", get(move || async move { handle.render() }))
    } else {
        Router::new()
    };

    // Build middleware stack (order matters - outermost first)
    let middleware = ServiceBuilder::new()
        // Request ID propagation (outermost)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        // Tracing with request details
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // CORS
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        // Request timeout (innermost - closest to handler)
        .layer(TimeoutLayer::new(request_timeout));

    // Combine all routes
    Router::new()
        .nest("/api/v1", api_v1)
        .layer(middleware)
        .merge(health_routes) // Health routes without timeout
        .merge(metrics_route) // Metrics route without timeout
        .with_state(state)
}

async fn run_http_server(app: Router, addr: SocketAddr) -> anyhow::Result<()> {
    tracing::info!("HTTP server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn setup_metrics() -> anyhow::Result<PrometheusHandle> {
    // Latency buckets for booking operations; the conflict check and the
    // completion transaction dominate, both well under 100ms normally
    let booking_latency_buckets = &[0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.2, 0.5, 1.0, 2.5];

    let builder = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            booking_latency_buckets,
        )?
        .set_buckets_for_metric(
            Matcher::Full("booking_operation_duration_seconds".to_string()),
            booking_latency_buckets,
        )?;

    let handle = builder.install_recorder()?;

    // Register metrics with descriptions
    metrics::describe_counter!("bookings_created_total", "Total bookings created");
    metrics::describe_counter!(
        "bookings_completed_total",
        "Total bookings completed and credited"
    );
    metrics::describe_counter!(
        "bookings_cancelled_total",
        "Total bookings cancelled or declined, by kind"
    );
    metrics::describe_counter!("messages_sent_total", "Total chat messages sent");
    metrics::describe_counter!(
        "messages_flagged_total",
        "Total chat messages flagged for contact info"
    );
    metrics::describe_histogram!(
        "http_request_duration_seconds",
        "HTTP request latency in seconds"
    );
    metrics::describe_histogram!(
        "booking_operation_duration_seconds",
        "Booking operation latency in seconds by operation type"
    );

    Ok(handle)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
