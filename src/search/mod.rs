pub mod provider;
pub mod providers;
pub mod types;

pub use provider::{
    EMPTY_QUERY_MESSAGE, FETCH_FAILED_MESSAGE, NO_RESULTS_MESSAGE, SearchError, SearchProvider,
};
pub use providers::HttpSearchProvider;
pub use types::{ResultId, SearchEnvelope, SearchRequest, SearchResult};
