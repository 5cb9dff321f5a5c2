//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::core::state::App;
use crate::search::{SearchError, SearchProvider, SearchRequest, SearchResult};

/// A provider that answers every search with the same canned outcome.
pub struct StubProvider {
    outcome: Result<Vec<SearchResult>, SearchError>,
    calls: AtomicUsize,
    last_request: Mutex<Option<SearchRequest>>,
}

impl StubProvider {
    pub fn ok(results: Vec<SearchResult>) -> Self {
        Self::with_outcome(Ok(results))
    }

    pub fn err(error: SearchError) -> Self {
        Self::with_outcome(Err(error))
    }

    fn with_outcome(outcome: Result<Vec<SearchResult>, SearchError>) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<SearchRequest> {
        self.last_request.lock().ok().and_then(|r| r.clone())
    }
}

#[async_trait]
impl SearchProvider for StubProvider {
    fn name(&self) -> &str {
        "stub"
    }

    async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchResult>, SearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(request.clone());
        }
        self.outcome.clone()
    }
}

/// Builds a result with an id and a title.
pub fn result(id: &str, title: &str) -> SearchResult {
    SearchResult::new(id).with_field("title", title)
}

/// Creates a test App backed by an empty StubProvider.
pub fn test_app() -> App {
    App::new(Arc::new(StubProvider::ok(Vec::new())))
}
