pub mod http;

pub use http::HttpSearchProvider;
