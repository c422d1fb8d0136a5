//! # Stash GraphQL Client
//!
//! [`CollectionClient`] over HTTP: every round trip is one POST of a
//! GraphQL document to `<stash url>/graphql`.

use crate::config::StashConfig;
use serde_json::Value;
use stash_random_core::{
    CollectionClient, CollectionFilter, EntityKind, GraphqlRequest, GraphqlResponse, ItemId,
    MarkerPage, RandomError, SortState, query,
};
use url::Url;

/// Header Stash reads the API key from.
pub const API_KEY_HEADER: &str = "ApiKey";

/// HTTP client for one Stash server.
#[derive(Debug, Clone)]
pub struct StashClient {
    http: reqwest::Client,
    endpoint: Url,
    api_key: Option<String>,
}

impl StashClient {
    /// Create a client for the server at `base_url`.
    pub fn new(base_url: &Url, api_key: Option<String>) -> Result<Self, RandomError> {
        let endpoint = base_url
            .join("graphql")
            .map_err(|e| RandomError::Config(format!("invalid url '{}': {}", base_url, e)))?;
        Ok(Self {
            http: reqwest::Client::new(),
            endpoint,
            api_key,
        })
    }

    /// Create a client from loaded settings.
    pub fn from_config(config: &StashConfig) -> Result<Self, RandomError> {
        Self::new(&config.base_url()?, config.api_key.clone())
    }

    /// GraphQL endpoint this client posts to.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Build a POST with the optional API key header.
    fn request(&self) -> reqwest::RequestBuilder {
        let mut req = self.http.post(self.endpoint.clone());
        if let Some(ref key) = self.api_key {
            req = req.header(API_KEY_HEADER, key);
        }
        req
    }

    /// Send a request; an unreachable server yields a payload-less query error.
    async fn send(&self, req: reqwest::RequestBuilder) -> Result<reqwest::Response, RandomError> {
        req.send().await.map_err(|e| {
            tracing::warn!("Cannot reach Stash at {}: {}", self.endpoint, e);
            RandomError::Query(None)
        })
    }

    /// Decode the GraphQL envelope, whatever the HTTP status.
    async fn handle_response(&self, resp: reqwest::Response) -> Result<Value, RandomError> {
        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(RandomError::query(format!(
                "\"Unauthorized ({}): invalid or missing API key\"",
                status.as_u16()
            )));
        }
        let body = resp.text().await.map_err(|e| {
            tracing::warn!("Cannot read response from {}: {}", self.endpoint, e);
            RandomError::Query(None)
        })?;
        match serde_json::from_str::<GraphqlResponse>(&body) {
            Ok(envelope) => envelope.into_data(),
            Err(_) => Err(RandomError::query(
                Value::String(format!("HTTP {}: {}", status.as_u16(), body)).to_string(),
            )),
        }
    }

    /// POST one GraphQL request and return its `data` section.
    pub async fn execute(&self, request: &GraphqlRequest) -> Result<Value, RandomError> {
        let resp = self.send(self.request().json(request)).await?;
        self.handle_response(resp).await
    }
}

impl CollectionClient for StashClient {
    async fn count(&self, kind: EntityKind, filter: &CollectionFilter) -> Result<u64, RandomError> {
        let data = self.execute(&query::count_request(kind, filter)).await?;
        let count = query::decode_count(kind, &data)?;
        tracing::debug!("count {} ({:?}) = {}", kind.plural(), filter, count);
        Ok(count)
    }

    async fn page(
        &self,
        kind: EntityKind,
        filter: &CollectionFilter,
        sort: &SortState,
        per_page: u32,
    ) -> Result<Vec<ItemId>, RandomError> {
        let data = self
            .execute(&query::page_request(kind, filter, sort, per_page))
            .await?;
        let ids = query::decode_page(kind, &data)?;
        tracing::debug!(
            "page {} of {} ({}, {} per page): {} ids",
            sort.page,
            kind.plural(),
            sort.key,
            per_page,
            ids.len()
        );
        Ok(ids)
    }

    async fn markers(&self, page: u32, per_page: u32) -> Result<MarkerPage, RandomError> {
        let data = self
            .execute(&query::markers_request(page, per_page))
            .await?;
        let markers = query::decode_markers(&data)?;
        tracing::debug!(
            "marker page {}: {} of {}",
            page,
            markers.scene_markers.len(),
            markers.count
        );
        Ok(markers)
    }
}
