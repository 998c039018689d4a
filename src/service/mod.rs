//! Simulated target service.
//!
//! # Responsibilities
//! - Serve the five demo routes with simulated work (delays, CPU loops,
//!   random error injection)
//! - Wire up middleware: request ID, tracing, request timeout
//! - Record per-route request metrics
//!
//! # Design Decisions
//! - Request ID is generated as early as possible (UUID v4) and propagated
//!   to the response so log lines correlate across a request
//! - Handlers only simulate work; all behavior knobs come from
//!   `ServiceConfig` so tests can force the error path or shrink delays
//! - Graceful shutdown on ctrl-c; an unavailable signal handler degrades to
//!   running until killed

pub mod handlers;

use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderValue, Request};
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServiceConfig;

/// State shared by all handlers.
#[derive(Debug)]
pub struct ServiceState {
    pub config: ServiceConfig,
}

/// Generates a UUID v4 request ID for every incoming request.
#[derive(Debug, Clone, Copy, Default)]
struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = uuid::Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Build the service router with all routes and middleware.
pub fn build_router(config: ServiceConfig) -> Router {
    let timeout = Duration::from_secs(config.request_timeout_secs);
    let state = Arc::new(ServiceState { config });

    Router::new()
        .route("/", get(handlers::root))
        .route("/slow", get(handlers::slow))
        .route("/error", get(handlers::error))
        .route("/health", get(handlers::health))
        .route("/cpu-intensive", get(handlers::cpu_intensive))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(timeout))
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
}

/// Serve until ctrl-c.
pub async fn serve(listener: TcpListener, config: ServiceConfig) -> std::io::Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!(address = %addr, "target service listening");

    axum::serve(listener, build_router(config))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutdown signal received"),
        Err(err) => {
            tracing::error!(error = %err, "failed to listen for shutdown signal");
            std::future::pending::<()>().await
        }
    }
}
