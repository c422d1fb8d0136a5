//! # Entity Kinds
//!
//! The static lookup table every query document and every destination path is
//! generated from. Adding a kind means adding one row per accessor below; the
//! exhaustive matches make a missing mapping a compile error.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A category of object the Stash server exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Scene,
    Image,
    Gallery,
    Performer,
    Studio,
    Tag,
    Group,
    SceneMarker,
}

impl EntityKind {
    /// Every kind, in declaration order.
    pub const ALL: [EntityKind; 8] = [
        EntityKind::Scene,
        EntityKind::Image,
        EntityKind::Gallery,
        EntityKind::Performer,
        EntityKind::Studio,
        EntityKind::Tag,
        EntityKind::Group,
        EntityKind::SceneMarker,
    ];

    /// Singular type name, as used in GraphQL type names (`SceneFilterType`).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Scene => "Scene",
            Self::Image => "Image",
            Self::Gallery => "Gallery",
            Self::Performer => "Performer",
            Self::Studio => "Studio",
            Self::Tag => "Tag",
            Self::Group => "Group",
            Self::SceneMarker => "SceneMarker",
        }
    }

    /// Plural query name: `find<Plural>`.
    #[must_use]
    pub const fn plural(self) -> &'static str {
        match self {
            Self::Scene => "Scenes",
            Self::Image => "Images",
            Self::Gallery => "Galleries",
            Self::Performer => "Performers",
            Self::Studio => "Studios",
            Self::Tag => "Tags",
            Self::Group => "Groups",
            Self::SceneMarker => "SceneMarkers",
        }
    }

    /// Result field holding the item list of a `find<Plural>` query.
    ///
    /// Doubles as the field name of a scope filter anchored on this kind
    /// (`{ performers: { value: [..], modifier: INCLUDES_ALL } }`).
    #[must_use]
    pub const fn id_field(self) -> &'static str {
        match self {
            Self::Scene => "scenes",
            Self::Image => "images",
            Self::Gallery => "galleries",
            Self::Performer => "performers",
            Self::Studio => "studios",
            Self::Tag => "tags",
            Self::Group => "groups",
            Self::SceneMarker => "scene_markers",
        }
    }

    /// Path prefix of the detail page; the item id is appended directly.
    ///
    /// Markers have no page of their own and live under the scene tree.
    #[must_use]
    pub const fn path_prefix(self) -> &'static str {
        match self {
            Self::Scene => "/scenes/",
            Self::Image => "/images/",
            Self::Gallery => "/galleries/",
            Self::Performer => "/performers/",
            Self::Studio => "/studios/",
            Self::Tag => "/tags/",
            Self::Group => "/groups/",
            Self::SceneMarker => "/scenes/markers/",
        }
    }

    /// Name of the entity-specific filter argument (`scene_filter`).
    #[must_use]
    pub const fn filter_argument(self) -> &'static str {
        match self {
            Self::Scene => "scene_filter",
            Self::Image => "image_filter",
            Self::Gallery => "gallery_filter",
            Self::Performer => "performer_filter",
            Self::Studio => "studio_filter",
            Self::Tag => "tag_filter",
            Self::Group => "group_filter",
            Self::SceneMarker => "scene_marker_filter",
        }
    }

    /// GraphQL input type of the entity-specific filter.
    #[must_use]
    pub fn filter_type(self) -> String {
        format!("{}FilterType", self.name())
    }

    /// GraphQL field of the `find` query for this kind.
    #[must_use]
    pub fn find_field(self) -> String {
        format!("find{}", self.plural())
    }

    /// Query-string key re-embedding an anchor of this kind in a scope-sticky
    /// destination. Only kinds that anchor Scene playlists have one.
    #[must_use]
    pub const fn sticky_param(self) -> Option<&'static str> {
        match self {
            Self::Performer => Some("performer_id"),
            Self::Studio => Some("studio_id"),
            Self::Group => Some("group_id"),
            Self::Tag => Some("tag_id"),
            Self::Scene | Self::Image | Self::Gallery | Self::SceneMarker => None,
        }
    }

    /// Top-level path segment of this kind's list view (`performers`).
    ///
    /// Markers are the exception: their list lives at `/scenes/markers`.
    #[must_use]
    pub const fn list_segment(self) -> &'static str {
        match self {
            Self::SceneMarker => "scenes/markers",
            other => other.id_field(),
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
