//! # Location
//!
//! The triggering location (path + query parameters) and the ordered,
//! unique-keyed query parameter map shared by the resolver and the composer.
//!
//! Query strings use `application/x-www-form-urlencoded` encoding, the same
//! encoding the host page reads them back with.

use crate::types::RandomError;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::{Url, form_urlencoded};

// =============================================================================
// QUERY PARAMETERS
// =============================================================================

/// Ordered query parameters with unique keys.
///
/// `set` replaces an existing key in place, so parameters carried over from
/// a triggering location keep their position in the destination.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    /// Create an empty parameter list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a query string (without the leading `?`).
    ///
    /// A repeated key keeps its first value.
    #[must_use]
    pub fn parse(query: &str) -> Self {
        let mut params = Self::new();
        for (key, value) in form_urlencoded::parse(query.trim_start_matches('?').as_bytes()) {
            if params.get(&key).is_none() {
                params.0.push((key.into_owned(), value.into_owned()));
            }
        }
        params
    }

    /// Value of `key`, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Insert or replace `key`.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key.to_string(), value)),
        }
    }

    /// Check whether `key` is present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(key, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Form-encode the parameters (without the leading `?`).
    #[must_use]
    pub fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }
}

// =============================================================================
// LOCATION
// =============================================================================

/// Where the user was when the trigger fired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Absolute path, always starting with `/`.
    pub path: String,
    /// Active query parameters.
    pub query: QueryParams,
}

impl Location {
    /// Create a location from a path and its parameters.
    #[must_use]
    pub fn new(path: impl Into<String>, query: QueryParams) -> Self {
        Self {
            path: path.into(),
            query,
        }
    }

    /// Parse either a path with an optional query string (`/tags?q=foo`) or
    /// an absolute URL (`http://host:9999/tags?q=foo`).
    ///
    /// Fragments are ignored. An empty input is the root path. Anything that
    /// is neither a rooted path nor an absolute URL is rejected.
    pub fn parse(input: &str) -> Result<Self, RandomError> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(Self::new("/", QueryParams::new()));
        }

        if !input.starts_with('/') && !input.starts_with('?') {
            let url = Url::parse(input)
                .map_err(|e| RandomError::InvalidLocation(format!("{input}: {e}")))?;
            return Ok(Self::from_url(&url));
        }

        let without_fragment = input.split('#').next().unwrap_or_default();
        let (path, query) = match without_fragment.split_once('?') {
            Some((path, query)) => (path, QueryParams::parse(query)),
            None => (without_fragment, QueryParams::new()),
        };

        if path.is_empty() {
            return Ok(Self::new("/", query));
        }
        Ok(Self::new(path, query))
    }

    /// Take the path and query of an absolute URL.
    #[must_use]
    pub fn from_url(url: &Url) -> Self {
        Self::new(url.path(), QueryParams::parse(url.query().unwrap_or_default()))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.query.is_empty() {
            write!(f, "{}", self.path)
        } else {
            write!(f, "{}?{}", self.path, self.query.encode())
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
