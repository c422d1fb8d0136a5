//! # Random Sampler
//!
//! Draws one item from a collection of unknown size using only a count query
//! and a single page query:
//!
//! 1. Pick a fresh sort seed (`random_<seed>`)
//! 2. Count the matching items; zero ends the cycle
//! 3. Draw a page uniformly from `[1, ceil(total / per_page)]`
//! 4. Fetch that page of the seeded ordering; an empty page ends the cycle
//! 5. Draw an item uniformly from the page
//!
//! Every page is equally likely and every item on the chosen page is equally
//! likely, so items on a short last page are slightly favoured. Nothing is
//! retried: a collection that shrinks between the count and the page query
//! simply yields an empty page.
//!
//! Markers are the exception. The whole marker collection is enumerated and
//! indexed uniformly, so the pick is exact.

use crate::client::CollectionClient;
use crate::entity::EntityKind;
use crate::filter::{CollectionFilter, ScopeFilter};
use crate::query::Marker;
use crate::random::RandomSource;
use crate::sort::{SortKey, SortState};
use crate::types::{ItemId, RandomError};
use serde::Serialize;

/// A picked item and the ordering it was found in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SampleResult {
    pub item_id: ItemId,
    pub sort: SortState,
    pub scope: Option<ScopeFilter>,
}

/// A picked marker with a parent scene.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerPick {
    pub marker_id: ItemId,
    pub scene_id: ItemId,
    pub seconds: f64,
}

/// Number of pages needed for `total` items, `per_page` at a time.
#[must_use]
pub fn total_pages(total: u64, per_page: u32) -> u64 {
    total.div_ceil(u64::from(per_page.max(1)))
}

/// Two-phase sampler over a collection client and a random source.
#[derive(Debug)]
pub struct Sampler<'a, C, R> {
    client: &'a C,
    random: &'a R,
}

impl<'a, C: CollectionClient, R: RandomSource> Sampler<'a, C, R> {
    /// Create a sampler borrowing its collaborators.
    #[must_use]
    pub fn new(client: &'a C, random: &'a R) -> Self {
        Self { client, random }
    }

    /// Draw one item of `kind` matching `filter`.
    pub async fn sample(
        &self,
        kind: EntityKind,
        filter: &CollectionFilter,
        per_page: u32,
    ) -> Result<SampleResult, RandomError> {
        let per_page = per_page.max(1);
        let key = SortKey::from_seed(self.random.sort_seed());

        let total = self.client.count(kind, filter).await?;
        if total == 0 {
            return Err(RandomError::EmptyResult(kind));
        }

        let pages = total_pages(total, per_page);
        let page = u32::try_from(self.random.below(pages) + 1).unwrap_or(u32::MAX);
        let sort = SortState::new(key, page);

        let ids = self.client.page(kind, filter, &sort, per_page).await?;
        let item_id = self
            .pick(ids)
            .ok_or(RandomError::EmptyResult(kind))?;

        Ok(SampleResult {
            item_id,
            sort,
            scope: filter.scope.clone(),
        })
    }

    /// Enumerate every marker and draw one uniformly.
    ///
    /// Pages of `page_size` are fetched until the accumulated list reaches the
    /// total the endpoint reports. An empty page also stops the enumeration,
    /// since the collection shrank underneath it.
    pub async fn random_marker(&self, page_size: u32) -> Result<MarkerPick, RandomError> {
        let page_size = page_size.max(1);
        let mut markers: Vec<Marker> = Vec::new();
        let mut page = 1;

        loop {
            let batch = self.client.markers(page, page_size).await?;
            let fetched = batch.scene_markers.len();
            markers.extend(batch.scene_markers);
            if fetched == 0 || markers.len() as u64 >= batch.count {
                break;
            }
            page += 1;
        }

        let marker = self
            .pick(markers)
            .ok_or(RandomError::EmptyResult(EntityKind::SceneMarker))?;
        let scene = marker.scene.ok_or(RandomError::NoParent)?;

        Ok(MarkerPick {
            marker_id: marker.id,
            scene_id: scene.id,
            seconds: marker.seconds,
        })
    }

    fn pick<T>(&self, items: Vec<T>) -> Option<T> {
        if items.is_empty() {
            return None;
        }
        let index = self.random.below(items.len() as u64) as usize;
        items.into_iter().nth(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(total_pages(7, 40), 1);
        assert_eq!(total_pages(40, 40), 1);
        assert_eq!(total_pages(41, 40), 2);
        assert_eq!(total_pages(1000, 40), 25);
    }

    #[test]
    fn zero_per_page_is_treated_as_one() {
        assert_eq!(total_pages(3, 0), 3);
    }
}
