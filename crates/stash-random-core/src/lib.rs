//! # stash-random-core
//!
//! The random-pick engine for stash-random - THE LOGIC.
//!
//! Given where the user is (a path plus query parameters), this crate decides
//! what to sample, draws a uniformly random item from a remotely paginated
//! collection using only `count` and `page` queries, and composes the
//! destination so further random picks stay in the same playlist.
//!
//! ## Pipeline
//!
//! ```text
//! Location ──▶ ContextResolver ──▶ Intent ──▶ Sampler ──▶ SampleResult ──▶ compose ──▶ NavigationTarget
//!                                               │
//!                                               ▼
//!                                        CollectionClient (count, page, markers)
//! ```
//!
//! ## Architectural Constraints
//!
//! - Has NO network dependencies and NO async runtime
//! - Remote access only through [`CollectionClient`]
//! - Randomness only through [`RandomSource`]
//! - No state survives between cycles

// =============================================================================
// MODULES
// =============================================================================

pub mod client;
pub mod context;
pub mod entity;
pub mod filter;
pub mod location;
pub mod navigation;
pub mod primitives;
pub mod query;
pub mod random;
pub mod sampler;
pub mod sort;
pub mod trigger;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types
// =============================================================================

pub use entity::EntityKind;
pub use types::{ItemId, RandomError};

// =============================================================================
// RE-EXPORTS: Pipeline
// =============================================================================

pub use client::CollectionClient;
pub use context::{ContextResolver, ContextRule, Intent, SampleIntent};
pub use filter::{CollectionFilter, FindFilter, ScopeFilter};
pub use location::{Location, QueryParams};
pub use navigation::{NavigationTarget, Playlist, compose, compose_marker};
pub use query::{GraphqlRequest, GraphqlResponse, Marker, MarkerPage, SceneRef};
pub use random::{RandomSource, SeededRandom, ThreadRandom};
pub use sampler::{MarkerPick, SampleResult, Sampler, total_pages};
pub use sort::{SortDirection, SortKey, SortState};
pub use trigger::{Randomizer, TriggerHost};
