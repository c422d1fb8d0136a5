//! # Sort State
//!
//! A seeded random ordering of a collection. The server orders a collection
//! deterministically for a given `random_<seed>` key, so page N of that
//! ordering is well-defined for as long as the seed is reused.

use crate::primitives::SORT_KEY_PREFIX;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-side sort specifier embedding a random seed (`random_<seed>`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SortKey(String);

impl SortKey {
    /// Build the key for `seed`.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self(format!("{SORT_KEY_PREFIX}{seed}"))
    }

    /// Get the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Sort direction. Random playlists are always descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    /// Spelling in a `FindFilterType` (`DESC`).
    #[must_use]
    pub const fn api_value(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }

    /// Spelling in a destination query string (`desc`).
    #[must_use]
    pub const fn query_value(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// The ordering and page a picked item was found on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub key: SortKey,
    pub direction: SortDirection,
    /// One-based page index.
    pub page: u32,
}

impl SortState {
    /// Descending state for `key` at `page`.
    #[must_use]
    pub fn new(key: SortKey, page: u32) -> Self {
        Self {
            key,
            direction: SortDirection::Desc,
            page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_embeds_seed() {
        let key = SortKey::from_seed(1234567);
        assert_eq!(key.as_str(), "random_1234567");
    }

    #[test]
    fn direction_spellings() {
        assert_eq!(SortDirection::Desc.api_value(), "DESC");
        assert_eq!(SortDirection::Desc.query_value(), "desc");
    }

    #[test]
    fn new_state_is_descending() {
        let state = SortState::new(SortKey::from_seed(1), 4);
        assert_eq!(state.direction, SortDirection::Desc);
        assert_eq!(state.page, 4);
    }
}
