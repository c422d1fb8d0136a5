//! In-memory collection shared by the integration tests.

#![allow(dead_code)]

use stash_random_core::{
    CollectionClient, CollectionFilter, EntityKind, ItemId, Location, Marker, MarkerPage,
    NavigationTarget, RandomError, SceneRef, SortState, TriggerHost,
};
use std::sync::Mutex;

/// One remote round-trip, as the fake saw it.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Count(EntityKind, CollectionFilter),
    Page(EntityKind, CollectionFilter, SortState, u32),
    Markers(u32, u32),
}

/// A static collection served page by page in a fixed order.
#[derive(Debug, Default)]
pub struct FakeCollection {
    pub items: Vec<ItemId>,
    pub count_override: Option<u64>,
    pub count_error: Option<String>,
    pub page_error: Option<String>,
    pub markers: Vec<Marker>,
    pub marker_count_override: Option<u64>,
    pub calls: Mutex<Vec<Call>>,
}

impl FakeCollection {
    pub fn with_items(n: usize) -> Self {
        Self {
            items: (1..=n).map(|i| ItemId::new(i.to_string())).collect(),
            ..Self::default()
        }
    }

    pub fn with_markers(markers: Vec<Marker>) -> Self {
        Self {
            markers,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn page_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Page(..)))
            .count()
    }

    fn record(&self, call: Call) {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call);
    }
}

pub fn marker(id: &str, scene: Option<&str>, seconds: f64) -> Marker {
    Marker {
        id: ItemId::new(id),
        scene: scene.map(|s| SceneRef { id: ItemId::new(s) }),
        seconds,
    }
}

impl CollectionClient for FakeCollection {
    async fn count(
        &self,
        kind: EntityKind,
        filter: &CollectionFilter,
    ) -> Result<u64, RandomError> {
        self.record(Call::Count(kind, filter.clone()));
        if let Some(payload) = &self.count_error {
            return Err(RandomError::query(payload.clone()));
        }
        Ok(self.count_override.unwrap_or(self.items.len() as u64))
    }

    async fn page(
        &self,
        kind: EntityKind,
        filter: &CollectionFilter,
        sort: &SortState,
        per_page: u32,
    ) -> Result<Vec<ItemId>, RandomError> {
        self.record(Call::Page(kind, filter.clone(), sort.clone(), per_page));
        if let Some(payload) = &self.page_error {
            return Err(RandomError::query(payload.clone()));
        }
        Ok(self
            .items
            .chunks(per_page as usize)
            .nth(sort.page as usize - 1)
            .map(<[ItemId]>::to_vec)
            .unwrap_or_default())
    }

    async fn markers(&self, page: u32, per_page: u32) -> Result<MarkerPage, RandomError> {
        self.record(Call::Markers(page, per_page));
        let scene_markers = self
            .markers
            .chunks(per_page as usize)
            .nth(page as usize - 1)
            .map(<[Marker]>::to_vec)
            .unwrap_or_default();
        Ok(MarkerPage {
            count: self
                .marker_count_override
                .unwrap_or(self.markers.len() as u64),
            scene_markers,
        })
    }
}

/// Host that remembers where it was sent and what it was told.
#[derive(Debug)]
pub struct RecordingHost {
    pub location: String,
    pub presence_checks: usize,
    pub navigations: Vec<NavigationTarget>,
    pub reports: Vec<String>,
}

impl RecordingHost {
    pub fn at(location: &str) -> Self {
        Self {
            location: location.to_string(),
            presence_checks: 0,
            navigations: Vec::new(),
            reports: Vec::new(),
        }
    }
}

impl TriggerHost for RecordingHost {
    fn ensure_present(&mut self) {
        self.presence_checks += 1;
    }

    fn location(&self) -> Result<Location, RandomError> {
        Location::parse(&self.location)
    }

    fn navigate(&mut self, target: &NavigationTarget) {
        self.location = target.to_string();
        self.navigations.push(target.clone());
    }

    fn report(&mut self, error: &RandomError) {
        self.reports.push(error.to_string());
    }
}
