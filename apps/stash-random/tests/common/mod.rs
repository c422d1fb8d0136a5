//! A minimal Stash GraphQL endpoint on an ephemeral port.

#![allow(dead_code, clippy::unwrap_used)]

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use url::Url;

/// One request as the fake server saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub api_key: Option<String>,
    pub body: Value,
}

/// Canned collection contents and failure modes.
#[derive(Debug, Clone, Default)]
pub struct FakeStash {
    /// Ids of every non-marker collection, in seeded order.
    pub items: Vec<String>,
    /// Raw marker objects (`{id, scene, seconds}`).
    pub markers: Vec<Value>,
    /// Answer every request with this `errors` payload.
    pub errors: Option<Value>,
    /// Answer every request with this bare status.
    pub status: Option<u16>,
    pub requests: Arc<Mutex<Vec<Recorded>>>,
}

impl FakeStash {
    pub fn with_items(n: usize) -> Self {
        Self {
            items: (1..=n).map(|i| i.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn with_markers(markers: Vec<Value>) -> Self {
        Self {
            markers,
            ..Self::default()
        }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

/// `find<Plural>` field and list field named in a query document.
fn fields(query: &str) -> (String, &'static str) {
    let find = query
        .lines()
        .nth(1)
        .and_then(|l| l.trim().split('(').next())
        .unwrap_or_default()
        .to_string();
    let list = match find.as_str() {
        "findScenes" => "scenes",
        "findImages" => "images",
        "findGalleries" => "galleries",
        "findPerformers" => "performers",
        "findStudios" => "studios",
        "findTags" => "tags",
        "findGroups" => "groups",
        "findSceneMarkers" => "scene_markers",
        _ => "unknown",
    };
    (find, list)
}

fn chunk<T: Clone>(all: &[T], filter: &Value) -> Vec<T> {
    let page = filter["page"].as_u64().unwrap_or(1).max(1) as usize;
    let per_page = filter["per_page"].as_u64().unwrap_or(25).max(1) as usize;
    all.chunks(per_page)
        .nth(page - 1)
        .map(<[T]>::to_vec)
        .unwrap_or_default()
}

async fn graphql(
    State(stash): State<FakeStash>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    stash
        .requests
        .lock()
        .unwrap_or_else(|e| e.into_inner())
        .push(Recorded {
            api_key: headers
                .get("ApiKey")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
            body: body.clone(),
        });

    if let Some(status) = stash.status {
        return StatusCode::from_u16(status).unwrap().into_response();
    }
    if let Some(errors) = &stash.errors {
        return Json(json!({ "errors": errors, "data": null })).into_response();
    }

    let query = body["query"].as_str().unwrap_or_default();
    let filter = &body["variables"]["filter"];
    let (find, list) = fields(query);

    let section = if list == "scene_markers" {
        json!({ "count": stash.markers.len(), "scene_markers": chunk(&stash.markers, filter) })
    } else if query.contains("{ count }") {
        json!({ "count": stash.items.len() })
    } else {
        let ids: Vec<Value> = chunk(&stash.items, filter)
            .into_iter()
            .map(|id| json!({ "id": id }))
            .collect();
        json!({ list: ids })
    };

    let mut data = serde_json::Map::new();
    data.insert(find, section);
    Json(json!({ "data": data })).into_response()
}

/// Serve `stash` on 127.0.0.1 and return its base URL.
pub async fn spawn(stash: FakeStash) -> Url {
    let router = Router::new()
        .route("/graphql", post(graphql))
        .with_state(stash);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    Url::parse(&format!("http://{addr}/")).unwrap()
}

/// A base URL nothing listens on.
pub async fn closed_port() -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{addr}/")).unwrap()
}
