//! Integration tests for the Stash GraphQL client.
//!
//! Runs the real reqwest client against a fake GraphQL endpoint on an
//! ephemeral port.

#![allow(clippy::unwrap_used, clippy::panic)]

mod common;

use common::{FakeStash, closed_port, spawn};
use serde_json::json;
use stash_random::client::StashClient;
use stash_random_core::{
    CollectionClient, CollectionFilter, ContextResolver, EntityKind, ItemId, Location,
    RandomError, Randomizer, ScopeFilter, SeededRandom, SortKey, SortState,
};

// =============================================================================
// ROUND TRIPS
// =============================================================================

#[tokio::test]
async fn count_sends_scoped_query_with_api_key() {
    let stash = FakeStash::with_items(7);
    let url = spawn(stash.clone()).await;
    let client = StashClient::new(&url, Some("secret".into())).unwrap();
    let filter = CollectionFilter::scoped(ScopeFilter::new(
        EntityKind::Performer,
        ItemId::new("42"),
    ));

    let count = client.count(EntityKind::Scene, &filter).await.unwrap();

    assert_eq!(count, 7);
    let requests = stash.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].api_key.as_deref(), Some("secret"));
    let body = &requests[0].body;
    assert!(
        body["query"]
            .as_str()
            .unwrap()
            .contains("findScenes(filter: $filter, scene_filter: $entity_filter)")
    );
    assert_eq!(body["variables"]["filter"], json!({ "per_page": 1 }));
    assert_eq!(
        body["variables"]["entity_filter"],
        json!({ "performers": { "value": ["42"], "modifier": "INCLUDES_ALL" } })
    );
}

#[tokio::test]
async fn page_returns_ids_of_requested_page() {
    let stash = FakeStash::with_items(5);
    let url = spawn(stash.clone()).await;
    let client = StashClient::new(&url, None).unwrap();
    let sort = SortState::new(SortKey::from_seed(3), 2);

    let ids = client
        .page(EntityKind::Tag, &CollectionFilter::global(), &sort, 2)
        .await
        .unwrap();

    assert_eq!(ids, vec![ItemId::new("3"), ItemId::new("4")]);
    let body = &stash.requests()[0].body;
    assert_eq!(stash.requests()[0].api_key, None);
    assert_eq!(
        body["variables"]["filter"],
        json!({ "page": 2, "per_page": 2, "sort": "random_3", "direction": "DESC" })
    );
    assert!(body["variables"].get("entity_filter").is_none());
}

#[tokio::test]
async fn markers_page_is_decoded() {
    let stash = FakeStash::with_markers(vec![
        json!({ "id": "1", "scene": { "id": "31" }, "seconds": 12.9 }),
        json!({ "id": "2", "scene": null, "seconds": 3.0 }),
    ]);
    let url = spawn(stash).await;
    let client = StashClient::new(&url, None).unwrap();

    let page = client.markers(1, 1000).await.unwrap();

    assert_eq!(page.count, 2);
    assert_eq!(page.scene_markers.len(), 2);
    assert!(page.scene_markers[1].scene.is_none());
}

// =============================================================================
// FAILURES
// =============================================================================

#[tokio::test]
async fn graphql_errors_surface_as_payload() {
    let stash = FakeStash {
        errors: Some(json!([{ "message": "boom" }])),
        ..FakeStash::with_items(3)
    };
    let url = spawn(stash).await;
    let client = StashClient::new(&url, None).unwrap();

    let err = client
        .count(EntityKind::Scene, &CollectionFilter::global())
        .await
        .unwrap_err();

    assert!(matches!(err, RandomError::Query(Some(ref p)) if p.contains("boom")));
    assert!(err.to_string().starts_with("Error: "));
}

#[tokio::test]
async fn unauthorized_is_a_query_error() {
    let stash = FakeStash {
        status: Some(401),
        ..FakeStash::default()
    };
    let url = spawn(stash).await;
    let client = StashClient::new(&url, Some("wrong".into())).unwrap();

    let err = client
        .count(EntityKind::Scene, &CollectionFilter::global())
        .await
        .unwrap_err();

    assert!(matches!(err, RandomError::Query(Some(ref p)) if p.contains("Unauthorized")));
}

#[tokio::test]
async fn unreachable_server_has_no_payload() {
    let client = StashClient::new(&closed_port().await, None).unwrap();

    let err = client
        .count(EntityKind::Scene, &CollectionFilter::global())
        .await
        .unwrap_err();

    assert_eq!(err, RandomError::Query(None));
}

// =============================================================================
// FULL CYCLES
// =============================================================================

#[tokio::test]
async fn performer_cycle_over_http() {
    let stash = FakeStash::with_items(90);
    let url = spawn(stash.clone()).await;
    let randomizer = Randomizer::new(
        StashClient::new(&url, None).unwrap(),
        SeededRandom::new(1),
        ContextResolver::default(),
    );

    let target = randomizer
        .run(&Location::parse("/performers/42").unwrap())
        .await
        .unwrap();

    assert!(target.path.starts_with("/scenes/"));
    assert_eq!(target.query.get("performer_id"), Some("42"));
    let page: u64 = target.query.get("qfp").unwrap().parse().unwrap();
    assert!((1..=3).contains(&page));

    let requests = stash.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(
        requests[1].body["variables"]["filter"]["page"],
        json!(page)
    );
    assert_eq!(
        requests[1].body["variables"]["filter"]["sort"].as_str(),
        target.query.get("qsort")
    );
}

#[tokio::test]
async fn marker_cycle_over_http() {
    let stash = FakeStash::with_markers(vec![json!({
        "id": "1",
        "scene": { "id": "31" },
        "seconds": 127.8
    })]);
    let url = spawn(stash).await;
    let randomizer = Randomizer::new(
        StashClient::new(&url, None).unwrap(),
        SeededRandom::new(1),
        ContextResolver::default(),
    );

    let target = randomizer
        .run(&Location::parse("/scenes/markers").unwrap())
        .await
        .unwrap();

    assert_eq!(target.to_string(), "/scenes/31?t=127");
}
