//! # Actions
//!
//! Everything that can happen in Scout becomes an `Action`.
//! User presses Enter on the search box? That's `Action::Search`.
//! The backend answers? That's `Action::FetchSettled`.
//!
//! The `update()` function applies an action to the state and returns an
//! `Effect` describing the I/O the caller must perform. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::debug;

use crate::core::route::Route;
use crate::core::state::App;
use crate::core::store::{FetchTicket, PendingFetch};
use crate::search::{SearchError, SearchResult};

#[derive(Debug)]
pub enum Action {
    /// Run a search. `method` falls back to the configured default.
    Search {
        query: String,
        method: Option<String>,
    },
    /// A spawned search finished.
    FetchSettled {
        ticket: FetchTicket,
        outcome: Result<Vec<SearchResult>, SearchError>,
    },
    /// Pick a result and open its detail page.
    Select(SearchResult),
    Navigate(String),
    Back,
    Quit,
}

#[derive(Debug, PartialEq)]
pub enum Effect {
    None,
    /// Run this fetch in the background and report back with `FetchSettled`.
    SpawnFetch(PendingFetch),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action);
    match action {
        Action::Search { query, method } => {
            let method = method.or_else(|| app.default_method.clone());
            match app.store.begin_fetch(&query, method.as_deref()) {
                Ok(pending) => {
                    app.status_message = format!("Searching for \"{}\"...", query.trim());
                    app.navigator.go(Route::Results);
                    Effect::SpawnFetch(pending)
                }
                Err(err) => {
                    app.status_message = err.user_message().to_string();
                    Effect::None
                }
            }
        }
        Action::FetchSettled { ticket, outcome } => {
            if app.store.settle(ticket, outcome) {
                app.status_message = match app.store.error() {
                    Some(error) => error.to_string(),
                    None => match app.store.results().len() {
                        1 => "1 result".to_string(),
                        n => format!("{n} results"),
                    },
                };
            }
            Effect::None
        }
        Action::Select(result) => {
            let id = result.id.clone();
            app.store.set_selected_result(result);
            app.navigator.go(Route::Detail { id });
            Effect::None
        }
        Action::Navigate(path) => {
            match app.navigator.navigate(&path) {
                Ok(route) => debug!("Now on {}", route.name()),
                Err(e) => app.status_message = e.to_string(),
            }
            Effect::None
        }
        Action::Back => {
            app.navigator.back();
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}
