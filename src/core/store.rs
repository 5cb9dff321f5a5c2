//! # Result Store
//!
//! Session state for searches: the last result list, the selected result,
//! and the loading/error flags the pages render from.
//!
//! ```text
//! ResultStore
//! ├── results: Vec<SearchResult>        // last successful response, server order
//! ├── selected_result: Option<..>       // copy taken at selection time
//! ├── loading: bool                     // a fetch is outstanding
//! ├── error: Option<String>             // user-facing message
//! ├── latest_ticket: u64                // newest fetch issued
//! ├── last_query: Option<String>
//! └── fetched_at: Option<DateTime<Utc>>
//! ```
//!
//! A fetch is split in two halves so the event loop can own the store while
//! the request runs elsewhere:
//!
//! ```text
//! begin_fetch(query)  →  PendingFetch { ticket, request }  →  provider.search()
//!                                                                  │
//! settle(ticket, outcome)  ←───────────────────────────────────────┘
//! ```
//!
//! Fetches may overlap. Only the settlement carrying the latest ticket is
//! applied; older ones are dropped.

use chrono::{DateTime, Utc};
use log::{debug, info, warn};

use crate::search::{ResultId, SearchError, SearchProvider, SearchRequest, SearchResult};

/// Sequence number of a fetch attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

impl FetchTicket {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// A fetch that has been started but not settled.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingFetch {
    pub ticket: FetchTicket,
    pub request: SearchRequest,
}

#[derive(Debug, Default)]
pub struct ResultStore {
    results: Vec<SearchResult>,
    selected_result: Option<SearchResult>,
    loading: bool,
    error: Option<String>,
    latest_ticket: u64,
    last_query: Option<String>,
    fetched_at: Option<DateTime<Utc>>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn selected_result(&self) -> Option<&SearchResult> {
        self.selected_result.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn last_query(&self) -> Option<&str> {
        self.last_query.as_deref()
    }

    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }

    /// Overwrites the selected result. Never fails.
    pub fn set_selected_result(&mut self, result: SearchResult) {
        debug!("Selected result {}", result.id);
        self.selected_result = Some(result);
    }

    /// Looks up a result for the detail page.
    ///
    /// The selected result wins so that it stays viewable after a later
    /// fetch replaced `results`.
    pub fn find(&self, id: &ResultId) -> Option<&SearchResult> {
        self.selected_result
            .as_ref()
            .filter(|r| &r.id == id)
            .or_else(|| self.results.iter().find(|r| &r.id == id))
    }

    /// Starts a fetch.
    ///
    /// A blank query sets the empty-query error and returns without touching
    /// `loading`. Otherwise `loading` is set, `error` cleared, and a new
    /// ticket issued.
    pub fn begin_fetch(
        &mut self,
        query: &str,
        method: Option<&str>,
    ) -> Result<PendingFetch, SearchError> {
        if query.trim().is_empty() {
            let err = SearchError::EmptyQuery;
            info!("Rejected search: {}", err);
            self.error = Some(err.user_message().to_string());
            return Err(err);
        }

        self.latest_ticket += 1;
        self.loading = true;
        self.error = None;
        self.last_query = Some(query.to_string());

        let ticket = FetchTicket(self.latest_ticket);
        debug!("Fetch {} started: query={:?}", ticket.0, query);

        Ok(PendingFetch {
            ticket,
            request: SearchRequest {
                query: query.to_string(),
                method: method.map(str::to_string),
            },
        })
    }

    /// Applies the outcome of a fetch. Returns `false` if the ticket was
    /// superseded and the outcome dropped.
    ///
    /// Any error clears `results` so the list never contradicts the message.
    pub fn settle(
        &mut self,
        ticket: FetchTicket,
        outcome: Result<Vec<SearchResult>, SearchError>,
    ) -> bool {
        if ticket.0 != self.latest_ticket {
            debug!(
                "Dropping stale fetch {} (latest is {})",
                ticket.0, self.latest_ticket
            );
            return false;
        }

        self.loading = false;
        match outcome {
            Ok(results) => {
                info!("Fetch {} settled with {} results", ticket.0, results.len());
                self.results = results;
                self.error = None;
                self.fetched_at = Some(Utc::now());
            }
            Err(err) => {
                warn!("Fetch {} failed: {}", ticket.0, err);
                self.results.clear();
                self.error = Some(err.user_message().to_string());
            }
        }
        true
    }

    /// Runs a whole fetch against `provider`: begin, await, settle.
    pub async fn fetch_results(
        &mut self,
        provider: &dyn SearchProvider,
        query: &str,
        method: Option<&str>,
    ) {
        let Ok(pending) = self.begin_fetch(query, method) else {
            return;
        };
        let outcome = provider.search(&pending.request).await;
        self.settle(pending.ticket, outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{EMPTY_QUERY_MESSAGE, FETCH_FAILED_MESSAGE, NO_RESULTS_MESSAGE};
    use crate::test_support::{StubProvider, result};

    #[test]
    fn test_new_store_is_idle() {
        let store = ResultStore::new();
        assert!(store.results().is_empty());
        assert!(store.selected_result().is_none());
        assert!(!store.is_loading());
        assert!(store.error().is_none());
    }

    #[test]
    fn test_blank_queries_rejected_without_loading() {
        for query in ["", " ", "\t", "  \n  "] {
            let mut store = ResultStore::new();
            let pending = store.begin_fetch(query, None);
            assert_eq!(pending, Err(SearchError::EmptyQuery));
            assert!(!store.is_loading());
            assert_eq!(store.error(), Some(EMPTY_QUERY_MESSAGE));
        }
    }

    #[tokio::test]
    async fn test_blank_query_performs_no_search() {
        let provider = StubProvider::ok(vec![result("1", "one")]);
        let mut store = ResultStore::new();
        store.fetch_results(&provider, "   ", None).await;
        assert_eq!(provider.calls(), 0);
        assert!(!store.is_loading());
        assert_eq!(store.error(), Some(EMPTY_QUERY_MESSAGE));
    }

    #[test]
    fn test_begin_fetch_sets_loading_and_clears_error() {
        let mut store = ResultStore::new();
        let _ = store.begin_fetch("", None);
        assert!(store.error().is_some());

        let pending = store.begin_fetch("rust", Some("fuzzy")).unwrap();
        assert!(store.is_loading());
        assert!(store.error().is_none());
        assert_eq!(pending.request.query, "rust");
        assert_eq!(pending.request.method.as_deref(), Some("fuzzy"));
        assert_eq!(store.last_query(), Some("rust"));
    }

    #[test]
    fn test_settle_success_replaces_results_in_order() {
        let mut store = ResultStore::new();
        let first = store.begin_fetch("a", None).unwrap();
        store.settle(first.ticket, Ok(vec![result("old", "old")]));

        let second = store.begin_fetch("b", None).unwrap();
        let r1 = result("1", "first");
        let r2 = result("2", "second");
        assert!(store.settle(second.ticket, Ok(vec![r1.clone(), r2.clone()])));

        assert_eq!(store.results(), &[r1, r2]);
        assert!(store.error().is_none());
        assert!(!store.is_loading());
        assert!(store.fetched_at().is_some());
    }

    #[test]
    fn test_settle_no_results_clears_list() {
        let mut store = ResultStore::new();
        let first = store.begin_fetch("a", None).unwrap();
        store.settle(first.ticket, Ok(vec![result("1", "one")]));

        let second = store.begin_fetch("b", None).unwrap();
        store.settle(second.ticket, Err(SearchError::NoResults { status: 404 }));

        assert_eq!(store.error(), Some(NO_RESULTS_MESSAGE));
        assert!(store.results().is_empty());
        assert!(!store.is_loading());
    }

    #[test]
    fn test_settle_failure_sets_generic_message() {
        let mut store = ResultStore::new();
        let pending = store.begin_fetch("a", None).unwrap();
        assert!(store.is_loading());
        store.settle(pending.ticket, Err(SearchError::Network("refused".into())));
        assert_eq!(store.error(), Some(FETCH_FAILED_MESSAGE));
        assert!(!store.is_loading());
    }

    #[test]
    fn test_stale_ticket_is_dropped() {
        let mut store = ResultStore::new();
        let older = store.begin_fetch("slow", None).unwrap();
        let newer = store.begin_fetch("fast", None).unwrap();

        assert!(store.settle(newer.ticket, Ok(vec![result("new", "new")])));
        assert!(!store.settle(older.ticket, Err(SearchError::Network("late".into()))));

        assert_eq!(store.results().len(), 1);
        assert_eq!(store.results()[0].id.as_str(), "new");
        assert!(store.error().is_none());
    }

    #[test]
    fn test_loading_holds_until_latest_settles() {
        let mut store = ResultStore::new();
        let older = store.begin_fetch("one", None).unwrap();
        let newer = store.begin_fetch("two", None).unwrap();

        store.settle(older.ticket, Ok(vec![]));
        assert!(store.is_loading());

        store.settle(newer.ticket, Ok(vec![]));
        assert!(!store.is_loading());
    }

    #[test]
    fn test_selected_result_survives_fetches() {
        let mut store = ResultStore::new();
        let picked = result("7", "seven");
        store.set_selected_result(picked.clone());

        let pending = store.begin_fetch("other", None).unwrap();
        assert_eq!(store.selected_result(), Some(&picked));
        store.settle(pending.ticket, Err(SearchError::NoResults { status: 500 }));

        assert_eq!(store.selected_result(), Some(&picked));
        assert_eq!(store.find(&ResultId::new("7")), Some(&picked));
    }

    #[test]
    fn test_find_falls_back_to_results() {
        let mut store = ResultStore::new();
        let pending = store.begin_fetch("q", None).unwrap();
        store.settle(pending.ticket, Ok(vec![result("1", "one"), result("2", "two")]));

        assert_eq!(store.find(&ResultId::new("2")).map(SearchResult::title), Some("two".into()));
        assert!(store.find(&ResultId::new("9")).is_none());
    }

    #[tokio::test]
    async fn test_fetch_results_end_to_end() {
        let provider = StubProvider::ok(vec![result("1", "one")]);
        let mut store = ResultStore::new();
        store.fetch_results(&provider, "one", Some("exact")).await;

        assert_eq!(provider.calls(), 1);
        assert_eq!(
            provider.last_request().and_then(|r| r.method),
            Some("exact".to_string())
        );
        assert_eq!(store.results().len(), 1);
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_fetch_results_failure() {
        let provider = StubProvider::err(SearchError::Parse("not json".into()));
        let mut store = ResultStore::new();
        store.fetch_results(&provider, "x", None).await;
        assert_eq!(store.error(), Some(FETCH_FAILED_MESSAGE));
        assert!(!store.is_loading());
    }
}
