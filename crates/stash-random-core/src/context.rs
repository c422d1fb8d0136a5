//! # Context Resolver
//!
//! Maps the triggering location to what should be sampled and how the
//! destination continues the playlist.
//!
//! Rules are tried in a fixed precedence order and the first match wins:
//!
//! 1. `/scenes/markers...` → a random marker from the whole marker collection
//! 2. `/scenes/<id>`, `/images/<id>` → another random item of the same kind,
//!    carrying the page's parameters (a sticky anchor key among them)
//! 3. `/performers|studios|groups|tags/<id>[/scenes]` → a random Scene of that
//!    anchor, scope-sticky
//! 4. `/galleries/<id>` → a random Image of that gallery
//! 5. `/groups/<id>/galleries...` → a random Gallery of that group
//! 6. root list views → a random item of that kind, keeping list search,
//!    `per_page` and the other query parameters
//! 7. anything else → a random Scene
//!
//! Resolution is total and holds no state between calls.

use crate::entity::EntityKind;
use crate::filter::{CollectionFilter, ScopeFilter};
use crate::location::{Location, QueryParams};
use crate::navigation::Playlist;
use crate::primitives::{DEFAULT_PER_PAGE, PARAM_PER_PAGE, PARAM_SEARCH};
use crate::types::ItemId;
use serde::Serialize;

/// Detail views a new random pick of the same kind can be made from.
const CONTINUABLE: [EntityKind; 2] = [EntityKind::Scene, EntityKind::Image];

/// Anchors whose detail view samples their Scenes.
const SCENE_ANCHORS: [EntityKind; 4] = [
    EntityKind::Performer,
    EntityKind::Studio,
    EntityKind::Group,
    EntityKind::Tag,
];

/// Root list views, in matching order.
const ROOT_LISTS: [EntityKind; 7] = [
    EntityKind::Performer,
    EntityKind::Studio,
    EntityKind::Tag,
    EntityKind::Group,
    EntityKind::Gallery,
    EntityKind::Image,
    EntityKind::Scene,
];

// =============================================================================
// INTENT
// =============================================================================

/// Which resolution rule produced an intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextRule {
    MarkerWall,
    DetailContinuation,
    AnchoredScenes,
    GalleryImages,
    GroupGalleries,
    RootList,
    Fallback,
}

/// A resolved sampling request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SampleIntent {
    /// Kind to sample and navigate to.
    pub kind: EntityKind,
    /// Scope and list search narrowing the population.
    pub filter: CollectionFilter,
    /// Page size of the page query.
    pub per_page: u32,
    /// What the destination carries besides the sort state.
    pub playlist: Playlist,
    /// Rule that matched.
    pub rule: ContextRule,
}

/// Outcome of context resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum Intent {
    /// Enumerate every marker, pick one, jump to its scene at its timestamp.
    RandomMarker,
    /// Two-phase count/page sampling.
    Sample(SampleIntent),
}

impl Intent {
    /// The rule that produced this intent.
    #[must_use]
    pub fn rule(&self) -> ContextRule {
        match self {
            Self::RandomMarker => ContextRule::MarkerWall,
            Self::Sample(intent) => intent.rule,
        }
    }
}

// =============================================================================
// RESOLVER
// =============================================================================

/// Stateless resolver from location to intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextResolver {
    /// Page size for every rule without a `per_page` override.
    pub per_page: u32,
    /// Let a Scene detail view carrying a sticky anchor parameter
    /// (`performer_id`, ...) re-derive that anchor's scope.
    pub follow_sticky_scope: bool,
}

impl Default for ContextResolver {
    fn default() -> Self {
        Self {
            per_page: DEFAULT_PER_PAGE,
            follow_sticky_scope: false,
        }
    }
}

impl ContextResolver {
    /// Create a resolver with the given defaults.
    #[must_use]
    pub fn new(per_page: u32, follow_sticky_scope: bool) -> Self {
        Self {
            per_page: per_page.max(1),
            follow_sticky_scope,
        }
    }

    /// Resolve `location` to an intent. Total: every location resolves.
    #[must_use]
    pub fn resolve(&self, location: &Location) -> Intent {
        let path = location.path.as_str();

        if path.starts_with("/scenes/markers") {
            return Intent::RandomMarker;
        }

        for kind in CONTINUABLE {
            if let Some((_, "")) = detail(path, kind) {
                if kind == EntityKind::Scene && self.follow_sticky_scope {
                    if let Some(scope) = sticky_scope(&location.query) {
                        return self.anchored(scope);
                    }
                }
                return Intent::Sample(SampleIntent {
                    kind,
                    filter: CollectionFilter::global(),
                    per_page: self.per_page,
                    playlist: Playlist::Carry(location.query.clone()),
                    rule: ContextRule::DetailContinuation,
                });
            }
        }

        for anchor in SCENE_ANCHORS {
            if let Some((id, "" | "/scenes")) = detail(path, anchor) {
                return self.anchored(ScopeFilter::new(anchor, ItemId::new(id)));
            }
        }

        if let Some((id, "")) = detail(path, EntityKind::Gallery) {
            return Intent::Sample(SampleIntent {
                kind: EntityKind::Image,
                filter: CollectionFilter::scoped(ScopeFilter::new(
                    EntityKind::Gallery,
                    ItemId::new(id),
                )),
                per_page: self.per_page,
                playlist: Playlist::Plain,
                rule: ContextRule::GalleryImages,
            });
        }

        if let Some((id, tail)) = detail(path, EntityKind::Group) {
            if tail.starts_with("/galleries") {
                return Intent::Sample(SampleIntent {
                    kind: EntityKind::Gallery,
                    filter: CollectionFilter::scoped(ScopeFilter::new(
                        EntityKind::Group,
                        ItemId::new(id),
                    )),
                    per_page: self.per_page,
                    playlist: Playlist::Plain,
                    rule: ContextRule::GroupGalleries,
                });
            }
        }

        for kind in ROOT_LISTS {
            if is_root_list(path, kind) {
                return Intent::Sample(SampleIntent {
                    kind,
                    filter: CollectionFilter::searching(
                        location.query.get(PARAM_SEARCH).map(str::to_string),
                    ),
                    per_page: self.per_page_override(&location.query),
                    playlist: Playlist::Carry(location.query.clone()),
                    rule: ContextRule::RootList,
                });
            }
        }

        Intent::Sample(SampleIntent {
            kind: EntityKind::Scene,
            filter: CollectionFilter::global(),
            per_page: self.per_page,
            playlist: Playlist::Carry(location.query.clone()),
            rule: ContextRule::Fallback,
        })
    }

    fn anchored(&self, scope: ScopeFilter) -> Intent {
        Intent::Sample(SampleIntent {
            kind: EntityKind::Scene,
            playlist: Playlist::sticky(&scope),
            filter: CollectionFilter::scoped(scope),
            per_page: self.per_page,
            rule: ContextRule::AnchoredScenes,
        })
    }

    /// `per_page` from the list view, falling back to the default when it is
    /// missing, unparsable or zero.
    fn per_page_override(&self, query: &QueryParams) -> u32 {
        query
            .get(PARAM_PER_PAGE)
            .and_then(|v| v.trim().parse::<u32>().ok())
            .filter(|&n| n > 0)
            .unwrap_or(self.per_page)
    }
}

/// Split `/<segment>/<digits><tail>` into `(digits, tail)`.
fn detail(path: &str, kind: EntityKind) -> Option<(&str, &str)> {
    let rest = path
        .strip_prefix('/')?
        .strip_prefix(kind.list_segment())?
        .strip_prefix('/')?;
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    Some(rest.split_at(digits))
}

fn is_root_list(path: &str, kind: EntityKind) -> bool {
    path.strip_prefix('/')
        .and_then(|p| p.strip_prefix(kind.list_segment()))
        .is_some_and(|rest| rest.is_empty() || rest == "/")
}

/// First sticky anchor parameter present with a numeric id.
fn sticky_scope(query: &QueryParams) -> Option<ScopeFilter> {
    SCENE_ANCHORS.into_iter().find_map(|anchor| {
        let id = query.get(anchor.sticky_param()?)?;
        (!id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()))
            .then(|| ScopeFilter::new(anchor, ItemId::new(id)))
    })
}

// =============================================================================
// TESTS
// =============================================================================
