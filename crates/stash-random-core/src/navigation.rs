//! # Navigation Composer
//!
//! Builds the destination of a successful pick: the detail page of the item
//! plus the playlist parameters the host page reads back (`qsort`, `qsortd`,
//! `qfp`, and the sticky anchor key when the pick was scope-sticky).

use crate::entity::EntityKind;
use crate::filter::ScopeFilter;
use crate::location::QueryParams;
use crate::primitives::{PARAM_FOUND_PAGE, PARAM_SORT, PARAM_SORT_DIRECTION, PARAM_TIMESTAMP};
use crate::sampler::SampleResult;
use crate::types::{ItemId, RandomError};
use serde::Serialize;
use std::fmt;
use url::Url;

/// What a destination carries besides the sort state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Playlist {
    /// Sort state only.
    Plain,
    /// Re-embed the anchor id under `key` so later picks keep the scope.
    Sticky {
        key: &'static str,
        anchor_id: ItemId,
    },
    /// Carry the triggering location's parameters (list search and friends).
    Carry(QueryParams),
}

impl Playlist {
    /// Sticky continuation for `scope`; plain when the anchor kind has no
    /// sticky key.
    #[must_use]
    pub fn sticky(scope: &ScopeFilter) -> Self {
        match scope.anchor.sticky_param() {
            Some(key) => Self::Sticky {
                key,
                anchor_id: scope.anchor_id.clone(),
            },
            None => Self::Plain,
        }
    }
}

/// Where the browser goes after a successful cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationTarget {
    pub path: String,
    pub query: QueryParams,
}

impl NavigationTarget {
    /// Resolve under the server's base URL, keeping any base path.
    pub fn absolute(&self, base: &Url) -> Result<Url, RandomError> {
        let target = self.to_string();
        base.join(target.trim_start_matches('/'))
            .map_err(|e| RandomError::InvalidLocation(format!("{self}: {e}")))
    }
}

impl fmt::Display for NavigationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.query.is_empty() {
            write!(f, "{}", self.path)
        } else {
            write!(f, "{}?{}", self.path, self.query.encode())
        }
    }
}

/// Compose the destination for a sampled item of `kind`.
#[must_use]
pub fn compose(result: &SampleResult, kind: EntityKind, playlist: &Playlist) -> NavigationTarget {
    let mut query = match playlist {
        Playlist::Carry(params) => params.clone(),
        Playlist::Plain | Playlist::Sticky { .. } => QueryParams::new(),
    };

    query.set(PARAM_SORT, result.sort.key.as_str());
    query.set(PARAM_SORT_DIRECTION, result.sort.direction.query_value());
    query.set(PARAM_FOUND_PAGE, result.sort.page.to_string());

    if let Playlist::Sticky { key, anchor_id } = playlist {
        query.set(key, anchor_id.as_str());
    }

    NavigationTarget {
        path: format!("{}{}", kind.path_prefix(), result.item_id),
        query,
    }
}

/// Destination of a picked marker: its scene, started at the marker's
/// whole-second timestamp.
#[must_use]
pub fn compose_marker(scene_id: &ItemId, seconds: f64) -> NavigationTarget {
    let mut query = QueryParams::new();
    query.set(PARAM_TIMESTAMP, (seconds.floor() as u64).to_string());
    NavigationTarget {
        path: format!("{}{}", EntityKind::Scene.path_prefix(), scene_id),
        query,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::{SortKey, SortState};

    fn result(id: &str, seed: u64, page: u32) -> SampleResult {
        SampleResult {
            item_id: ItemId::new(id),
            sort: SortState::new(SortKey::from_seed(seed), page),
            scope: None,
        }
    }

    #[test]
    fn plain_destination() {
        let target = compose(&result("77", 123, 25), EntityKind::Scene, &Playlist::Plain);
        assert_eq!(
            target.to_string(),
            "/scenes/77?qsort=random_123&qsortd=desc&qfp=25"
        );
    }

    #[test]
    fn sticky_destination_appends_anchor() {
        let scope = ScopeFilter::new(EntityKind::Performer, ItemId::new("42"));
        let target = compose(&result("5", 9, 1), EntityKind::Scene, &Playlist::sticky(&scope));
        assert_eq!(
            target.to_string(),
            "/scenes/5?qsort=random_9&qsortd=desc&qfp=1&performer_id=42"
        );
    }

    #[test]
    fn gallery_anchor_is_not_sticky() {
        let scope = ScopeFilter::new(EntityKind::Gallery, ItemId::new("3"));
        assert_eq!(Playlist::sticky(&scope), Playlist::Plain);
    }

    #[test]
    fn carried_params_are_merged() {
        let carried = Playlist::Carry(QueryParams::parse("q=foo&qsort=random_1&per_page=60"));
        let target = compose(&result("8", 2, 3), EntityKind::Tag, &carried);
        assert_eq!(
            target.to_string(),
            "/tags/8?q=foo&qsort=random_2&per_page=60&qsortd=desc&qfp=3"
        );
    }

    #[test]
    fn marker_destination_floors_seconds() {
        let target = compose_marker(&ItemId::new("31"), 127.8);
        assert_eq!(target.to_string(), "/scenes/31?t=127");
    }

    #[test]
    fn absolute_destination() {
        let base = Url::parse("http://localhost:9999").expect("url");
        let target = compose(&result("1", 4, 2), EntityKind::Image, &Playlist::Plain);
        assert_eq!(
            target.absolute(&base).expect("join").as_str(),
            "http://localhost:9999/images/1?qsort=random_4&qsortd=desc&qfp=2"
        );
    }

    #[test]
    fn absolute_destination_keeps_base_path() {
        let base = Url::parse("http://nas:9999/stash/").expect("url");
        let target = compose(&result("5", 1, 1), EntityKind::Scene, &Playlist::Plain);
        assert_eq!(
            target.absolute(&base).expect("join").as_str(),
            "http://nas:9999/stash/scenes/5?qsort=random_1&qsortd=desc&qfp=1"
        );
    }
}
