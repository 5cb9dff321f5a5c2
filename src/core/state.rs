//! # Application State
//!
//! Core business state for Scout. This module contains domain logic only,
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── provider: Arc<dyn SearchProvider>  // search backend
//! ├── store: ResultStore                 // results, selection, loading, error
//! ├── navigator: Navigator               // current page + back stack
//! ├── status_message: String             // status bar text
//! ├── default_method: Option<String>     // method sent when a search names none
//! └── page_size: usize                   // rows per result page
//! ```
//!
//! One `App` is built at startup and handed to the views and the reducer.
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use crate::core::config::{DEFAULT_PAGE_SIZE, ResolvedConfig};
use crate::core::route::{Navigator, Route};
use crate::core::store::ResultStore;
use crate::search::SearchProvider;

pub struct App {
    pub provider: Arc<dyn SearchProvider>,
    pub store: ResultStore,
    pub navigator: Navigator,
    pub status_message: String,
    pub default_method: Option<String>,
    pub page_size: usize,
}

impl App {
    pub fn new(provider: Arc<dyn SearchProvider>) -> Self {
        Self {
            provider,
            store: ResultStore::new(),
            navigator: Navigator::new(),
            status_message: String::from("Type a query and press Enter"),
            default_method: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn from_config(provider: Arc<dyn SearchProvider>, config: &ResolvedConfig) -> Self {
        let mut app = Self::new(provider);
        app.default_method = config.method.clone();
        app.page_size = config.page_size;
        app
    }

    pub fn route(&self) -> &Route {
        self.navigator.current()
    }
}

#[cfg(test)]
mod tests {
    use crate::core::config::{CliOverrides, ScoutConfig, resolve};
    use crate::core::route::Route;
    use crate::test_support::{StubProvider, test_app};
    use std::sync::Arc;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.route(), &Route::Search);
        assert!(!app.store.is_loading());
        assert!(app.default_method.is_none());
        assert_eq!(app.provider.name(), "stub");
    }

    #[test]
    fn test_app_from_config() {
        let cli = CliOverrides {
            method: Some("fuzzy".to_string()),
            page_size: Some(4),
            ..Default::default()
        };
        let config = resolve(&ScoutConfig::default(), &cli);
        let app = super::App::from_config(Arc::new(StubProvider::ok(vec![])), &config);
        assert_eq!(app.default_method.as_deref(), Some("fuzzy"));
        assert_eq!(app.page_size, 4);
    }
}
