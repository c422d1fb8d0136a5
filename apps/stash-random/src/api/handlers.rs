//! # API Endpoint Handlers
//!
//! This module implements the actual HTTP endpoint handlers.

use super::{
    AppState,
    types::{
        ErrorResponse, HealthResponse, PickResponse, ResolveResponse, TriggerParams, status_for,
    },
};
use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderMap, header},
    response::{IntoResponse, Redirect, Response},
};
use stash_random_core::{Location, RandomError};

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// RANDOM HANDLER
// =============================================================================

/// One button press: sample from the caller's location and redirect there.
pub async fn random_handler(
    State(state): State<AppState>,
    Query(params): Query<TriggerParams>,
    headers: HeaderMap,
) -> Response {
    let from = origin(&params, &headers);
    let outcome = match Location::parse(&from) {
        Ok(location) => state.randomizer.run(&location).await,
        Err(e) => Err(e),
    };

    let target = match outcome {
        Ok(target) => target,
        Err(e) => {
            tracing::warn!("Random pick from {} failed: {}", from, e);
            return error_response(&e);
        }
    };

    let url = match target.absolute(&state.stash_url) {
        Ok(url) => url,
        Err(e) => return error_response(&e),
    };
    tracing::info!("{} -> {}", from, target);

    if params.wants_json() {
        Json(PickResponse {
            destination: target.to_string(),
            url: url.to_string(),
        })
        .into_response()
    } else {
        Redirect::to(url.as_str()).into_response()
    }
}

// =============================================================================
// RESOLVE HANDLER
// =============================================================================

/// Show what a press on `from` would sample, without querying Stash.
pub async fn resolve_handler(
    State(state): State<AppState>,
    Query(params): Query<TriggerParams>,
    headers: HeaderMap,
) -> Response {
    let from = origin(&params, &headers);
    match Location::parse(&from) {
        Ok(location) => Json(ResolveResponse {
            location: location.to_string(),
            intent: state.randomizer.resolver().resolve(&location),
        })
        .into_response(),
        Err(e) => error_response(&e),
    }
}

// =============================================================================
// HELPERS
// =============================================================================

/// The `from` parameter, else the `Referer` header, else the root.
fn origin(params: &TriggerParams, headers: &HeaderMap) -> String {
    params
        .from
        .clone()
        .filter(|f| !f.is_empty())
        .or_else(|| {
            headers
                .get(header::REFERER)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        })
        .unwrap_or_else(|| "/".to_string())
}

fn error_response(error: &RandomError) -> Response {
    (status_for(error), Json(ErrorResponse::from_error(error))).into_response()
}
