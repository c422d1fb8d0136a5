//! # stash-random HTTP API Module
//!
//! A tiny HTTP surface so a navbar button (or a bookmark) can trigger a
//! random pick: the browser hits `/random`, the server samples from the
//! page it came from and redirects it to the destination on Stash.
//!
//! ## Endpoints
//!
//! - `GET /random?from=<location>` - Redirect (303) to a random pick
//! - `GET /random?from=<location>&format=json` - The pick as JSON
//! - `GET /resolve?from=<location>` - The sampling intent as JSON
//! - `GET /health` - Health check
//!
//! When `from` is missing the `Referer` header is used, then `/`.
//!
//! ## Configuration (Environment Variables)
//!
//! - `STASH_RANDOM_CORS_ORIGINS`: Comma-separated list of allowed origins, or "*" for all (default: local Stash only)

mod handlers;
mod types;

// Re-export handlers and types for integration tests (via `stash_random::api::*`)
pub use handlers::{health_handler, random_handler, resolve_handler};
pub use types::{
    ErrorResponse, HealthResponse, PickResponse, ResolveResponse, TriggerParams, status_for,
};

use crate::client::StashClient;
use crate::config::StashConfig;
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::get,
};
use stash_random_core::{RandomError, Randomizer, ThreadRandom};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use url::Url;

/// Pipeline served over HTTP.
pub type HttpRandomizer = Randomizer<StashClient, ThreadRandom>;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state: the pipeline and where the Stash UI lives.
#[derive(Clone)]
pub struct AppState {
    /// Resolver, sampler and composer over the Stash client.
    pub randomizer: Arc<HttpRandomizer>,
    /// Base URL destinations are resolved against.
    pub stash_url: Url,
}

impl AppState {
    /// Create new app state around a pipeline.
    #[must_use]
    pub fn new(randomizer: HttpRandomizer, stash_url: Url) -> Self {
        Self {
            randomizer: Arc::new(randomizer),
            stash_url,
        }
    }

    /// Build the pipeline from loaded settings.
    pub fn from_config(config: &StashConfig) -> Result<Self, RandomError> {
        let randomizer = Randomizer::new(
            StashClient::from_config(config)?,
            ThreadRandom,
            config.resolver(),
        )
        .with_marker_page_size(config.marker_page_size);
        Ok(Self::new(randomizer, config.base_url()?))
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Origins of a Stash UI served from this machine.
const LOCAL_STASH_ORIGINS: &str = "http://localhost:9999,http://127.0.0.1:9999";

/// CORS layer from `STASH_RANDOM_CORS_ORIGINS`; "*" opens it to every origin.
fn build_cors_layer() -> CorsLayer {
    let configured = std::env::var("STASH_RANDOM_CORS_ORIGINS").ok();
    if configured.as_deref().map(str::trim) == Some("*") {
        tracing::warn!("CORS open to every origin");
        return CorsLayer::permissive();
    }

    let mut origins = configured.as_deref().map(parse_origins).unwrap_or_default();
    if origins.is_empty() {
        if configured.is_some() {
            tracing::warn!("CORS origin list is empty, using the local Stash UI");
        }
        origins = parse_origins(LOCAL_STASH_ORIGINS);
    }
    tracing::debug!("CORS origins: {:?}", origins);

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

/// Comma-separated origins as header values; unusable entries are skipped.
fn parse_origins(list: &str) -> Vec<HeaderValue> {
    let mut origins = Vec::new();
    for entry in list.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        match HeaderValue::from_str(entry) {
            Ok(value) => origins.push(value),
            Err(e) => tracing::warn!("Skipping CORS origin {:?}: {}", entry, e),
        }
    }
    origins
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner):
/// 1. Tracing - logs all requests
/// 2. CORS - handles preflight requests
pub fn create_router(state: AppState) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer());

    Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/random", get(handlers::random_handler))
        .route("/resolve", get(handlers::resolve_handler))
        .layer(middleware)
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Start the HTTP server; stops on Ctrl+C.
pub async fn run_server(addr: &str, config: &StashConfig) -> Result<(), RandomError> {
    let state = AppState::from_config(config)?;
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| RandomError::Io(format!("Bind failed: {}", e)))?;

    tracing::info!("stash-random trigger listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| RandomError::Io(format!("Server error: {}", e)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Cannot listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
