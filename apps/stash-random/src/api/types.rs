//! # API Request/Response Types
//!
//! This module defines the JSON structures for the HTTP API.

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use stash_random_core::{Intent, RandomError};

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// TRIGGER PARAMETERS
// =============================================================================

/// Query string of `/random` and `/resolve`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriggerParams {
    /// Location the button was pressed on; falls back to the `Referer`.
    #[serde(default)]
    pub from: Option<String>,
    /// `json` answers with a [`PickResponse`] instead of a redirect.
    #[serde(default)]
    pub format: Option<String>,
}

impl TriggerParams {
    #[must_use]
    pub fn wants_json(&self) -> bool {
        self.format.as_deref() == Some("json")
    }
}

// =============================================================================
// PICK / RESOLVE RESPONSES
// =============================================================================

/// Destination of a successful cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickResponse {
    /// Path and query relative to the Stash UI.
    pub destination: String,
    /// Full URL on the configured Stash server.
    pub url: String,
}

/// Sampling intent of a location.
#[derive(Debug, Clone, Serialize)]
pub struct ResolveResponse {
    pub location: String,
    pub intent: Intent,
}

// =============================================================================
// ERROR RESPONSE
// =============================================================================

/// Failure of a cycle, carrying the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    #[must_use]
    pub fn from_error(error: &RandomError) -> Self {
        Self {
            error: error.to_string(),
        }
    }
}

/// HTTP status a failed cycle is answered with.
#[must_use]
pub fn status_for(error: &RandomError) -> StatusCode {
    match error {
        RandomError::EmptyResult(_) => StatusCode::NOT_FOUND,
        RandomError::NoParent => StatusCode::UNPROCESSABLE_ENTITY,
        RandomError::Query(_) => StatusCode::BAD_GATEWAY,
        RandomError::InvalidLocation(_) => StatusCode::BAD_REQUEST,
        RandomError::Config(_) | RandomError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
