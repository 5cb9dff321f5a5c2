use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use super::provider::SearchError;

/// Identifier of a search result. Used as the `:id` segment of the detail route.
///
/// Backends send it either as a string or as an integer; both are kept as text.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(from = "RawId", into = "String")]
pub struct ResultId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Integer(i64),
}

impl From<RawId> for ResultId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => ResultId(s),
            RawId::Integer(n) => ResultId(n.to_string()),
        }
    }
}

impl From<ResultId> for String {
    fn from(id: ResultId) -> Self {
        id.0
    }
}

impl ResultId {
    pub fn new(id: impl Into<String>) -> Self {
        ResultId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResultId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single item of a search response.
///
/// Only `id` is required. Every other field is kept as-is, in the order the
/// server sent it, and rendered generically by the detail page.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub id: ResultId,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Field names tried, in order, when a result needs a one-line label.
const TITLE_FIELDS: [&str; 3] = ["title", "name", "label"];

impl SearchResult {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: ResultId::new(id),
            fields: Map::new(),
        }
    }

    /// Adds a field, builder style.
    pub fn with_field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    /// The label shown in result lists. Falls back to the id.
    pub fn title(&self) -> String {
        TITLE_FIELDS
            .iter()
            .find_map(|key| self.fields.get(*key).and_then(Value::as_str))
            .map(str::to_string)
            .unwrap_or_else(|| self.id.to_string())
    }
}

/// Everything needed to issue one search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    /// Search-mode selector forwarded to the backend. Omitted from the URL when `None`.
    pub method: Option<String>,
}

/// Response body of `GET /query`.
///
/// `data` stays untyped until `status` says it should be there, so that an
/// error body with an odd `data` shape still reports as "no results".
/// `status` is any JSON number: `200` and `200.0` both mean success.
#[derive(Deserialize, Debug)]
pub struct SearchEnvelope {
    pub status: Number,
    #[serde(default)]
    pub data: Option<Value>,
}

impl SearchEnvelope {
    /// Validates the envelope and extracts the result list.
    pub fn into_results(self) -> Result<Vec<SearchResult>, SearchError> {
        if self.status.as_f64() != Some(200.0) {
            let status = self
                .status
                .as_i64()
                .unwrap_or_else(|| self.status.as_f64().unwrap_or_default() as i64);
            return Err(SearchError::NoResults { status });
        }
        let data = self
            .data
            .ok_or_else(|| SearchError::Parse("status 200 without a data field".to_string()))?;
        serde_json::from_value(data).map_err(|e| SearchError::Parse(e.to_string()))
    }
}
