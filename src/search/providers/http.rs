//! HTTP search provider.
//!
//! Issues `GET {base_uri}/query?query=...&method=...` and validates the
//! JSON envelope before handing results to the store.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};

use crate::search::{SearchEnvelope, SearchError, SearchProvider, SearchRequest, SearchResult};

pub struct HttpSearchProvider {
    base_uri: String,
    client: reqwest::Client,
}

impl HttpSearchProvider {
    /// Builds a provider for `base_uri`. No timeout is applied when `timeout` is `None`.
    pub fn new(base_uri: String, timeout: Option<Duration>) -> Result<Self, SearchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| SearchError::Config(e.to_string()))?;

        Ok(Self {
            base_uri: base_uri.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }
}

#[async_trait]
impl SearchProvider for HttpSearchProvider {
    fn name(&self) -> &str {
        "http"
    }

    async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchResult>, SearchError> {
        let mut params = vec![("query", request.query.as_str())];
        if let Some(method) = request.method.as_deref() {
            params.push(("method", method));
        }

        info!(
            "Search request: base={}, query={:?}, method={:?}",
            self.base_uri, request.query, request.method
        );

        let response = self
            .client
            .get(format!("{}/query", self.base_uri))
            .query(&params)
            .send()
            .await
            .map_err(|e| SearchError::Network(e.to_string()))?;

        let http_status = response.status();
        debug!("Search response HTTP status: {}", http_status);

        let body = response
            .text()
            .await
            .map_err(|e| SearchError::Network(e.to_string()))?;

        // The envelope's own status decides the outcome, not the HTTP status.
        let envelope: SearchEnvelope = serde_json::from_str(&body).map_err(|e| {
            warn!(
                "Unparseable search response (HTTP {}): {} ({} bytes)",
                http_status,
                e,
                body.len()
            );
            SearchError::Parse(e.to_string())
        })?;

        let results = envelope.into_results()?;
        info!("Search returned {} results", results.len());
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_uri_trailing_slash_trimmed() {
        let provider = HttpSearchProvider::new("http://localhost:8080/".to_string(), None).unwrap();
        assert_eq!(provider.base_uri(), "http://localhost:8080");
    }

    #[test]
    fn test_provider_name() {
        let provider = HttpSearchProvider::new("http://localhost".to_string(), None).unwrap();
        assert_eq!(provider.name(), "http");
    }
}
