//! # Collection Client
//!
//! The remote side of the engine: a count query, a page query, and one page
//! of the marker enumeration. Implementations perform no retries and no
//! caching; a failure carries whatever payload the endpoint produced.

use crate::entity::EntityKind;
use crate::filter::CollectionFilter;
use crate::query::MarkerPage;
use crate::sort::SortState;
use crate::types::{ItemId, RandomError};
use std::future::Future;

/// Read-only access to a remotely paginated collection.
pub trait CollectionClient: Send + Sync {
    /// Number of items of `kind` matching `filter`.
    fn count(
        &self,
        kind: EntityKind,
        filter: &CollectionFilter,
    ) -> impl Future<Output = Result<u64, RandomError>> + Send;

    /// Ids on page `sort.page` of the ordering `sort.key`/`sort.direction`.
    fn page(
        &self,
        kind: EntityKind,
        filter: &CollectionFilter,
        sort: &SortState,
        per_page: u32,
    ) -> impl Future<Output = Result<Vec<ItemId>, RandomError>> + Send;

    /// Page `page` of the unfiltered marker collection.
    fn markers(
        &self,
        page: u32,
        per_page: u32,
    ) -> impl Future<Output = Result<MarkerPage, RandomError>> + Send;
}
