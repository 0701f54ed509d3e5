//! HTTP relay server.
//!
//! Accepts client requests on fixed endpoints, derives a response-selection
//! directive from each request body, forwards the request to the
//! contract-mock backend, and relays the backend's response back verbatim.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::RelayConfig;
use crate::error::{Result, SteerError};
use crate::rules::catalog::Rulebook;
use crate::rules::{RuleSet, apply_directive};

use super::forward::{RelayError, forward, relay_response};
use super::headers::translate_headers;

/// Paths served by the relay and re-sent to the backend unchanged.
pub const IMPRESSIONS_PATH: &str = "/impressions";
pub const IMPRESSIONS_COUNT_PATH: &str = "/impressions/count";
pub const SAMPLE_PATH: &str = "/sample";

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Relay configuration
    pub config: RelayConfig,
    /// HTTP client for backend requests
    pub client: reqwest::Client,
    /// Compiled per-endpoint rule tables
    pub rulebook: Rulebook,
}

/// The relay server
pub struct RelayServer {
    config: RelayConfig,
}

impl RelayServer {
    pub fn new(config: RelayConfig) -> Self {
        Self { config }
    }

    /// Bind the listener and serve until shutdown.
    pub async fn serve(&self) -> Result<()> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = self.config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| SteerError::Relay(format!("Failed to create HTTP client: {e}")))?;

        let state = Arc::new(AppState {
            config: self.config.clone(),
            client,
            rulebook: Rulebook::new(),
        });

        let app = create_router(state);

        let addr: SocketAddr = self
            .config
            .listen_addr
            .parse()
            .map_err(|e| SteerError::Config(format!("Invalid listen address: {e}")))?;

        tracing::info!("Relay listening on http://{addr}");
        tracing::info!("Forwarding to backend at {}", self.config.backend_url);

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| SteerError::Relay(format!("Failed to bind to {addr}: {e}")))?;

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| SteerError::Relay(format!("Server error: {e}")))?;

        tracing::info!("Relay shut down gracefully");
        Ok(())
    }
}

/// Create the router with all routes configured
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route(IMPRESSIONS_PATH, post(impressions_handler))
        .route(IMPRESSIONS_COUNT_PATH, post(impressions_count_handler))
        .route(SAMPLE_PATH, post(sample_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint - returns JSON status
async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

async fn impressions_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    relay_request(&state, IMPRESSIONS_PATH, &state.rulebook.impressions, &headers, &body).await
}

async fn impressions_count_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    relay_request(
        &state,
        IMPRESSIONS_COUNT_PATH,
        &state.rulebook.impressions_count,
        &headers,
        &body,
    )
    .await
}

async fn sample_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    relay_request(&state, SAMPLE_PATH, &state.rulebook.sample, &headers, &body).await
}

/// The shared relay pipeline: translate headers, derive a directive from
/// the body, forward, relay the backend's response.
///
/// The handler future is dropped when the caller disconnects, which aborts
/// the in-flight backend call.
async fn relay_request(
    state: &AppState,
    path: &str,
    rules: &RuleSet,
    inbound: &HeaderMap,
    body: &Bytes,
) -> Response {
    // A missing or non-JSON body reads as the empty object, so required
    // fields evaluate as absent rather than erroring.
    let body_json: serde_json::Value = serde_json::from_slice(body)
        .unwrap_or_else(|_| serde_json::Value::Object(serde_json::Map::new()));

    tracing::debug!(%path, body = %body_json, "relaying request");

    let mut outbound = translate_headers(inbound);
    if let Some(directive) = rules.evaluate(&body_json) {
        tracing::debug!(%path, prefer = %directive.header_value(), "directive selected");
        outbound = apply_directive(outbound, &directive);
    }

    match forward_and_relay(state, path, outbound, &body_json).await {
        Ok(response) => response,
        Err(e) => e.into_response(),
    }
}

async fn forward_and_relay(
    state: &AppState,
    path: &str,
    headers: HeaderMap,
    body: &serde_json::Value,
) -> std::result::Result<Response, RelayError> {
    let response = forward(
        &state.client,
        &state.config.backend_url,
        path,
        headers,
        body,
    )
    .await?;
    relay_response(response).await
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
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
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        },
    }
}
