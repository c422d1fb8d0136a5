//! # Core Type Definitions
//!
//! This module contains the shared identifier and error types:
//! - Remote item identifiers (`ItemId`)
//! - Error taxonomy (`RandomError`)
//!
//! ## Failure Policy
//!
//! Every `RandomError` terminates the current random cycle:
//! - No retry, no fallback entity, no partial navigation
//! - Transport failures and endpoint-reported errors share one variant

use crate::entity::EntityKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// ITEM IDENTIFIER
// =============================================================================

/// Identifier of a remote item, exactly as the endpoint reports it.
///
/// The endpoint models ids as opaque strings; they are never parsed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    /// Create a new id from a string.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that end a random cycle.
///
/// The display text is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RandomError {
    /// The endpoint reported `errors`, answered with something unreadable,
    /// or could not be reached. Carries the raw diagnostic payload if any.
    #[error("Error: {}", .0.as_deref().unwrap_or("no response from endpoint"))]
    Query(Option<String>),

    /// The count was zero or the chosen page came back empty.
    #[error("{}", empty_message(.0))]
    EmptyResult(EntityKind),

    /// A sampled marker has no parent scene.
    #[error("Marker has no scene.")]
    NoParent,

    /// The triggering location could not be parsed.
    #[error("Invalid location: {0}")]
    InvalidLocation(String),

    /// Configuration could not be loaded or is out of range.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(String),
}

impl RandomError {
    /// Endpoint error carrying a diagnostic payload.
    #[must_use]
    pub fn query(payload: impl Into<String>) -> Self {
        Self::Query(Some(payload.into()))
    }
}

fn empty_message(kind: &EntityKind) -> &'static str {
    match kind {
        EntityKind::SceneMarker => "No markers found.",
        _ => "No results found.",
    }
}

// =============================================================================
// TESTS
// =============================================================================
