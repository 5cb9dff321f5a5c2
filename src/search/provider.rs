use std::fmt;

use async_trait::async_trait;

use super::types::{SearchRequest, SearchResult};

pub const EMPTY_QUERY_MESSAGE: &str = "Query cannot be empty.";
pub const NO_RESULTS_MESSAGE: &str = "No results found.";
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch data. Please try again later.";

/// Errors that can occur while running a search.
/// None of them are retried; the user re-submits.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchError {
    /// Blank or whitespace-only query. Detected before any I/O.
    EmptyQuery,
    /// The body carried a `status` other than 200.
    NoResults { status: i64 },
    /// Transport failure (DNS, connection refused, timeout, body read).
    Network(String),
    /// The body was not JSON or did not match the expected envelope.
    Parse(String),
    /// Provider could not be built (bad TLS backend, invalid timeout).
    Config(String),
}

impl SearchError {
    /// The fixed message shown to the user for this error.
    pub fn user_message(&self) -> &'static str {
        match self {
            SearchError::EmptyQuery => EMPTY_QUERY_MESSAGE,
            SearchError::NoResults { .. } => NO_RESULTS_MESSAGE,
            SearchError::Network(_) | SearchError::Parse(_) | SearchError::Config(_) => {
                FETCH_FAILED_MESSAGE
            }
        }
    }
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::EmptyQuery => write!(f, "empty query"),
            SearchError::NoResults { status } => write!(f, "no results (status {status})"),
            SearchError::Network(msg) => write!(f, "network error: {msg}"),
            SearchError::Parse(msg) => write!(f, "parse error: {msg}"),
            SearchError::Config(msg) => write!(f, "config error: {msg}"),
        }
    }
}

impl std::error::Error for SearchError {}

#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Returns the name of the provider.
    fn name(&self) -> &str;

    /// Runs one search and returns the result list in server order.
    async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchResult>, SearchError>;
}
