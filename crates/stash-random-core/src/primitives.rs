//! # Fixed Primitives
//!
//! Compile-time constants shared by the resolver, the sampler and the composer.
//!
//! ## Primitives
//!
//! 1. **Page sizes**: how many ids a page query asks for.
//! 2. **Seed range**: the span random sort seeds are drawn from.
//! 3. **Query-parameter names**: the playlist keys the host page understands.

/// Default number of items per page for every page query.
///
/// Root list views may override this through their own `per_page`
/// query parameter.
pub const DEFAULT_PER_PAGE: u32 = 40;

/// Page size used by count queries.
///
/// Only the `count` field is read, so a single row keeps the response minimal.
pub const COUNT_PER_PAGE: u32 = 1;

/// Page size used when enumerating the full marker collection.
pub const MARKER_PAGE_SIZE: u32 = 1000;

/// Exclusive upper bound of the random sort seed.
///
/// Seeds are drawn uniformly from `[0, SEED_RANGE)` and rendered as
/// `random_<seed>`.
pub const SEED_RANGE: u64 = 10_000_000;

/// Prefix of every random sort key understood by the server.
pub const SORT_KEY_PREFIX: &str = "random_";

// =============================================================================
// QUERY PARAMETER NAMES
// =============================================================================

/// Sort key of the playlist the destination was reached from.
pub const PARAM_SORT: &str = "qsort";

/// Sort direction of the playlist.
pub const PARAM_SORT_DIRECTION: &str = "qsortd";

/// Page the picked item was found on.
pub const PARAM_FOUND_PAGE: &str = "qfp";

/// Free-text list search.
pub const PARAM_SEARCH: &str = "q";

/// Per-page override of a list view.
pub const PARAM_PER_PAGE: &str = "per_page";

/// Timestamp (whole seconds) to start a scene at.
pub const PARAM_TIMESTAMP: &str = "t";
