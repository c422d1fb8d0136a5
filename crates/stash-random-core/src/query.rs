//! # Query Module
//!
//! GraphQL documents and response decoding for the three request shapes the
//! engine needs from the single query endpoint:
//!
//! - Count: `find<Plural>(filter[, <kind>_filter]) { count }`
//! - Page: `find<Plural>(filter[, <kind>_filter]) { <idField> { id } }`
//! - Marker enumeration: `findSceneMarkers(filter) { count scene_markers { id scene { id } seconds } }`
//!
//! Documents are generated from the `EntityKind` table only.

use crate::entity::EntityKind;
use crate::filter::{CollectionFilter, FindFilter, ScopeFilter};
use crate::primitives::COUNT_PER_PAGE;
use crate::sort::SortState;
use crate::types::{ItemId, RandomError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// REQUESTS
// =============================================================================

/// Body of a POST to the query endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphqlRequest {
    pub query: String,
    pub variables: Variables,
}

/// Variables shared by every `find` document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Variables {
    pub filter: FindFilter,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_filter: Option<ScopeFilter>,
}

fn find_document(kind: EntityKind, scoped: bool, selection: &str) -> String {
    let plural = kind.plural();
    let (declare, pass) = if scoped {
        (
            format!(", $entity_filter: {}", kind.filter_type()),
            format!(", {}: $entity_filter", kind.filter_argument()),
        )
    } else {
        (String::new(), String::new())
    };
    format!(
        "query Find{plural}($filter: FindFilterType{declare}) {{\n  find{plural}(filter: $filter{pass}) {{ {selection} }}\n}}"
    )
}

/// Count the items of `kind` matching `filter`.
#[must_use]
pub fn count_request(kind: EntityKind, filter: &CollectionFilter) -> GraphqlRequest {
    GraphqlRequest {
        query: find_document(kind, filter.scope.is_some(), "count"),
        variables: Variables {
            filter: FindFilter::count(filter.search(), COUNT_PER_PAGE),
            entity_filter: filter.scope.clone(),
        },
    }
}

/// Fetch the ids on one page of the seeded ordering.
#[must_use]
pub fn page_request(
    kind: EntityKind,
    filter: &CollectionFilter,
    sort: &SortState,
    per_page: u32,
) -> GraphqlRequest {
    GraphqlRequest {
        query: find_document(
            kind,
            filter.scope.is_some(),
            &format!("{} {{ id }}", kind.id_field()),
        ),
        variables: Variables {
            filter: FindFilter::page(filter.search(), sort, per_page),
            entity_filter: filter.scope.clone(),
        },
    }
}

/// Fetch one page of the full marker collection.
#[must_use]
pub fn markers_request(page: u32, per_page: u32) -> GraphqlRequest {
    GraphqlRequest {
        query: find_document(
            EntityKind::SceneMarker,
            false,
            "count scene_markers { id scene { id } seconds }",
        ),
        variables: Variables {
            filter: FindFilter::paging(page, per_page),
            entity_filter: None,
        },
    }
}

// =============================================================================
// RESPONSES
// =============================================================================

/// Envelope returned by the endpoint: `{data}` or `{errors}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GraphqlResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Option<Value>,
}

impl GraphqlResponse {
    /// The `data` member, or the raw `errors` payload as a query error.
    pub fn into_data(self) -> Result<Value, RandomError> {
        match (self.errors, self.data) {
            (Some(errors), _) if !errors.is_null() => Err(RandomError::query(errors.to_string())),
            (_, Some(data)) if !data.is_null() => Ok(data),
            _ => Err(RandomError::query("response carried neither data nor errors")),
        }
    }
}

#[derive(Deserialize)]
struct CountOnly {
    count: u64,
}

#[derive(Deserialize)]
struct IdOnly {
    id: ItemId,
}

/// One marker of the enumeration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Marker {
    pub id: ItemId,
    #[serde(default)]
    pub scene: Option<SceneRef>,
    pub seconds: f64,
}

/// Parent reference of a marker.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SceneRef {
    pub id: ItemId,
}

/// One page of the marker enumeration.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct MarkerPage {
    /// Grand total the endpoint reports.
    pub count: u64,
    #[serde(default)]
    pub scene_markers: Vec<Marker>,
}

fn field<T: DeserializeOwned>(data: &Value, kind: EntityKind) -> Result<T, RandomError> {
    let find = kind.find_field();
    let section = data
        .get(&find)
        .cloned()
        .ok_or_else(|| RandomError::query(format!("response has no {find}")))?;
    serde_json::from_value(section)
        .map_err(|e| RandomError::query(format!("malformed {find} response: {e}")))
}

/// Decode the total of a count response.
pub fn decode_count(kind: EntityKind, data: &Value) -> Result<u64, RandomError> {
    field::<CountOnly>(data, kind).map(|c| c.count)
}

/// Decode the ids of a page response. A missing or null list is empty.
pub fn decode_page(kind: EntityKind, data: &Value) -> Result<Vec<ItemId>, RandomError> {
    let section: Value = field(data, kind)?;
    match section.get(kind.id_field()) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(list) => serde_json::from_value::<Vec<IdOnly>>(list.clone())
            .map(|ids| ids.into_iter().map(|i| i.id).collect())
            .map_err(|e| RandomError::query(format!("malformed {} list: {e}", kind.id_field()))),
    }
}

/// Decode one page of the marker enumeration.
pub fn decode_markers(data: &Value) -> Result<MarkerPage, RandomError> {
    field(data, EntityKind::SceneMarker)
}

// =============================================================================
// TESTS
// =============================================================================
