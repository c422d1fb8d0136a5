//! # Configuration
//!
//! Layered settings, lowest to highest precedence:
//!
//! 1. Built-in defaults
//! 2. A TOML file (`--config <path>`, else `stash-random.toml` if present)
//! 3. Environment variables:
//!    - `STASH_URL`: Stash server URL (default: `http://localhost:9999`)
//!    - `STASH_API_KEY`: optional API key, sent as the `ApiKey` header

use serde::{Deserialize, Serialize};
use stash_random_core::{
    ContextResolver, RandomError,
    primitives::{DEFAULT_PER_PAGE, MARKER_PAGE_SIZE},
};
use std::path::Path;
use url::Url;

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "stash-random.toml";

/// Default Stash server URL.
pub const DEFAULT_STASH_URL: &str = "http://localhost:9999";

/// Settings for one Stash server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StashConfig {
    /// Base URL of the Stash server; `/graphql` is appended.
    pub url: String,
    /// API key for servers with authentication enabled.
    pub api_key: Option<String>,
    /// Page size of page queries.
    pub per_page: u32,
    /// Page size of the marker enumeration.
    pub marker_page_size: u32,
    /// Let scene detail views re-derive a sticky anchor scope.
    pub follow_sticky_scope: bool,
}

impl Default for StashConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_STASH_URL.to_string(),
            api_key: None,
            per_page: DEFAULT_PER_PAGE,
            marker_page_size: MARKER_PAGE_SIZE,
            follow_sticky_scope: false,
        }
    }
}

impl StashConfig {
    /// Load defaults, then the config file, then the environment.
    pub fn load(path: Option<&Path>) -> Result<Self, RandomError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, RandomError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            RandomError::Io(format!("Cannot read config '{}': {}", path.display(), e))
        })?;
        tracing::debug!("Loaded config from {}", path.display());
        Self::from_toml_str(&text)
    }

    /// Parse TOML text; missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, RandomError> {
        toml::from_str(text).map_err(|e| RandomError::Config(e.to_string()))
    }

    /// Override fields from environment-style lookups.
    pub fn apply_env<F: Fn(&str) -> Option<String>>(&mut self, lookup: F) {
        if let Some(url) = lookup("STASH_URL").filter(|v| !v.trim().is_empty()) {
            self.url = url;
        }
        if let Some(key) = lookup("STASH_API_KEY").filter(|v| !v.is_empty()) {
            self.api_key = Some(key);
        }
    }

    /// Check ranges and the URL.
    pub fn validate(&self) -> Result<(), RandomError> {
        if self.per_page == 0 {
            return Err(RandomError::Config("per_page must be at least 1".into()));
        }
        if self.marker_page_size == 0 {
            return Err(RandomError::Config(
                "marker_page_size must be at least 1".into(),
            ));
        }
        self.base_url().map(|_| ())
    }

    /// Base URL with a trailing slash, ready for joining.
    pub fn base_url(&self) -> Result<Url, RandomError> {
        let mut url = Url::parse(self.url.trim())
            .map_err(|e| RandomError::Config(format!("invalid url '{}': {}", self.url, e)))?;
        if url.cannot_be_a_base() {
            return Err(RandomError::Config(format!(
                "url '{}' cannot be a base",
                self.url
            )));
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    /// Context resolver configured from these settings.
    #[must_use]
    pub fn resolver(&self) -> ContextResolver {
        ContextResolver::new(self.per_page, self.follow_sticky_scope)
    }
}
