//! # Filters
//!
//! Wire shapes of the two filter arguments a `find<Plural>` query accepts:
//! the generic paging filter (`FindFilterType`) and the entity-specific
//! scope filter restricting a collection to one anchor object.

use crate::entity::EntityKind;
use crate::sort::SortState;
use crate::types::ItemId;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Modifier every scope filter is sent with.
pub const INCLUDES_ALL: &str = "INCLUDES_ALL";

// =============================================================================
// SCOPE FILTER
// =============================================================================

/// Restricts a queried collection to items related to one anchor object,
/// e.g. all Scenes of Performer 42.
///
/// Serializes as `{ "<anchor id field>": { "value": ["<id>"], "modifier": "INCLUDES_ALL" } }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeFilter {
    /// Kind of the anchor object.
    pub anchor: EntityKind,
    /// Id of the anchor object.
    pub anchor_id: ItemId,
}

impl ScopeFilter {
    /// Create a scope filter anchored on `anchor_id`.
    #[must_use]
    pub fn new(anchor: EntityKind, anchor_id: ItemId) -> Self {
        Self { anchor, anchor_id }
    }

    /// Field of the entity filter this scope sets.
    #[must_use]
    pub fn field(&self) -> &'static str {
        self.anchor.id_field()
    }
}

#[derive(Serialize)]
struct Criterion<'a> {
    value: [&'a ItemId; 1],
    modifier: &'static str,
}

impl Serialize for ScopeFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(
            self.field(),
            &Criterion {
                value: [&self.anchor_id],
                modifier: INCLUDES_ALL,
            },
        )?;
        map.end()
    }
}

// =============================================================================
// FIND FILTER
// =============================================================================

/// The `FindFilterType` argument: paging, sort and free-text search.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FindFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
}

impl FindFilter {
    /// Filter for a count query: one row, optional search.
    #[must_use]
    pub fn count(search: Option<&str>, per_page: u32) -> Self {
        Self {
            per_page: Some(per_page),
            q: search.map(str::to_string),
            ..Self::default()
        }
    }

    /// Filter for one page of a seeded random ordering.
    #[must_use]
    pub fn page(search: Option<&str>, sort: &SortState, per_page: u32) -> Self {
        Self {
            page: Some(sort.page),
            per_page: Some(per_page),
            sort: Some(sort.key.to_string()),
            direction: Some(sort.direction.api_value().to_string()),
            q: search.map(str::to_string),
        }
    }

    /// Plain paging, no sort and no search.
    #[must_use]
    pub fn paging(page: u32, per_page: u32) -> Self {
        Self {
            page: Some(page),
            per_page: Some(per_page),
            ..Self::default()
        }
    }
}

/// Everything that narrows the sampled population: the anchor scope and the
/// active list search.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CollectionFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<ScopeFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl CollectionFilter {
    /// No restriction at all.
    #[must_use]
    pub fn global() -> Self {
        Self::default()
    }

    /// Restricted to one anchor.
    #[must_use]
    pub fn scoped(scope: ScopeFilter) -> Self {
        Self {
            scope: Some(scope),
            search: None,
        }
    }

    /// Restricted by a list search, if one is active.
    #[must_use]
    pub fn searching(search: Option<String>) -> Self {
        Self {
            scope: None,
            search,
        }
    }

    /// Search text, if any.
    #[must_use]
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }
}
