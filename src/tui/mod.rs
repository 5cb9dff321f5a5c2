//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the current
//! page, and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Flow
//!
//! ```text
//! crossterm ─► TuiEvent ─► component ─► Action ─► update(&mut App) ─► Effect
//!                                                                       │
//!         Action::FetchSettled ◄── mpsc ◄── tokio task (search) ◄───────┘
//! ```
//!
//! The event loop is the store's only mutator. Searches run on the tokio
//! runtime and report back through the channel; nothing is cancelled, and
//! the store drops settlements that arrive for a superseded search.
//!
//! ## Redraw Strategy
//!
//! - **Loading**: draws every ~80ms so the spinner animates.
//! - **Idle**: sleeps up to 500ms and only redraws on events.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};

use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::route::Route;
use crate::core::state::App;
use crate::core::store::PendingFetch;
use crate::search::{HttpSearchProvider, SearchError, SearchProvider};
use crate::tui::component::EventHandler;
use crate::tui::components::{
    DetailViewState, ResultListEvent, ResultListState, SearchBox, SearchEvent,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Which component receives keystrokes on the result page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Typing edits the query. Esc moves to the list.
    Search,
    /// Arrows move the selection. Typing moves back to the search box.
    List,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub search_box: SearchBox,
    pub result_list: ResultListState,
    pub detail: DetailViewState,
    pub focus: Focus,
}

impl TuiState {
    pub fn new(app: &App) -> Self {
        Self {
            search_box: SearchBox::new(app.default_method.clone()),
            result_list: ResultListState::new(app.page_size),
            detail: DetailViewState::new(),
            focus: Focus::Search, // User expects to type immediately
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture, EnableBracketedPaste)?;
        info!("Terminal modes enabled (mouse, bracketed paste)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste);
    }
}

/// Build the search provider from a resolved config.
pub fn build_provider(config: &ResolvedConfig) -> Result<Arc<dyn SearchProvider>, SearchError> {
    let provider = HttpSearchProvider::new(config.base_uri.clone(), config.timeout())?;
    info!("Using search endpoint {}", provider.base_uri());
    Ok(Arc::new(provider))
}

/// Routes one terminal event to the component that owns it on the current
/// page, returning the resulting action, if any.
fn dispatch(app: &App, tui: &mut TuiState, event: TuiEvent) -> Option<Action> {
    if matches!(event, TuiEvent::ForceQuit) {
        return Some(Action::Quit);
    }

    match app.route() {
        Route::Search => match event {
            TuiEvent::Escape => Some(Action::Quit),
            _ => search_box_action(tui, &event),
        },
        Route::Results => match tui.focus {
            Focus::Search => match event {
                TuiEvent::Escape => {
                    tui.focus = Focus::List;
                    None
                }
                _ => search_box_action(tui, &event),
            },
            Focus::List => match event {
                TuiEvent::Escape => Some(Action::Back),
                // Typing jumps back into the search box
                TuiEvent::InputChar(_) | TuiEvent::Paste(_) | TuiEvent::Backspace => {
                    tui.focus = Focus::Search;
                    search_box_action(tui, &event)
                }
                _ => {
                    tui.result_list.total = app.store.results().len();
                    match tui.result_list.handle_event(&event)? {
                        ResultListEvent::Open(index) => {
                            app.store.results().get(index).cloned().map(Action::Select)
                        }
                    }
                }
            },
        },
        Route::Detail { .. } => match event {
            TuiEvent::Escape | TuiEvent::Backspace => Some(Action::Back),
            _ => {
                tui.detail.handle_event(&event);
                None
            }
        },
    }
}

fn search_box_action(tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    match tui.search_box.handle_event(event)? {
        SearchEvent::Submit(query) => Some(Action::Search {
            query,
            method: tui.search_box.method.clone(),
        }),
        SearchEvent::ContentChanged => None,
    }
}

pub fn run(config: ResolvedConfig, initial_query: Option<String>) -> std::io::Result<()> {
    let provider = build_provider(&config).map_err(std::io::Error::other)?;
    let mut app = App::from_config(provider, &config);
    let mut tui = TuiState::new(&app);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    if let Some(query) = initial_query {
        tui.search_box.buffer = query.clone();
        let action = Action::Search {
            query,
            method: None,
        };
        apply(&mut app, &mut tui, action, &tx);
    }

    let start_time = std::time::Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        let animating = app.store.is_loading();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when animating (~12fps), long when idle
        let timeout = if animating {
            std::time::Duration::from_millis(80)
        } else {
            std::time::Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if matches!(event, TuiEvent::Resize) {
                continue;
            }
            if let Some(action) = dispatch(&app, &mut tui, event)
                && apply(&mut app, &mut tui, action, &tx) == Effect::Quit
            {
                should_quit = true;
                break;
            }
        }

        if should_quit {
            break;
        }

        // Handle background task actions (search settlements)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            apply(&mut app, &mut tui, action, &tx);
        }
    }

    ratatui::restore();
    info!("Scout shutting down");
    Ok(())
}

/// Runs `update` and carries out the effect. Returns the effect for the
/// caller to check for `Quit`.
fn apply(app: &mut App, tui: &mut TuiState, action: Action, tx: &mpsc::Sender<Action>) -> Effect {
    let is_select = matches!(action, Action::Select(_));
    let effect = update(app, action);

    if is_select {
        tui.detail = DetailViewState::new();
    }

    match effect {
        Effect::SpawnFetch(pending) => {
            tui.result_list.reset();
            tui.focus = Focus::List;
            spawn_fetch(app.provider.clone(), pending, tx.clone());
            Effect::None
        }
        other => other,
    }
}

fn spawn_fetch(provider: Arc<dyn SearchProvider>, pending: PendingFetch, tx: mpsc::Sender<Action>) {
    let PendingFetch { ticket, request } = pending;
    info!(
        "Spawning search {} via {} (query={:?})",
        ticket.value(),
        provider.name(),
        request.query
    );

    tokio::spawn(async move {
        let outcome = provider.search(&request).await;
        if tx.send(Action::FetchSettled { ticket, outcome }).is_err() {
            warn!(
                "Failed to deliver search {}: receiver dropped",
                ticket.value()
            );
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{result, test_app};

    fn settle(app: &mut App, tui: &mut TuiState, results: Vec<crate::search::SearchResult>) {
        let Effect::SpawnFetch(pending) = update(
            app,
            Action::Search {
                query: "q".to_string(),
                method: None,
            },
        ) else {
            panic!("expected SpawnFetch");
        };
        update(
            app,
            Action::FetchSettled {
                ticket: pending.ticket,
                outcome: Ok(results),
            },
        );
        tui.focus = Focus::List;
    }

    #[test]
    fn test_typing_then_enter_searches() {
        let app = test_app();
        let mut tui = TuiState::new(&app);
        for c in "dune".chars() {
            assert!(dispatch(&app, &mut tui, TuiEvent::InputChar(c)).is_none());
        }
        match dispatch(&app, &mut tui, TuiEvent::Submit) {
            Some(Action::Search { query, method }) => {
                assert_eq!(query, "dune");
                assert!(method.is_none());
            }
            other => panic!("expected Search, got {other:?}"),
        }
    }

    #[test]
    fn test_escape_on_search_page_quits() {
        let app = test_app();
        let mut tui = TuiState::new(&app);
        assert!(matches!(
            dispatch(&app, &mut tui, TuiEvent::Escape),
            Some(Action::Quit)
        ));
        assert!(matches!(
            dispatch(&app, &mut tui, TuiEvent::ForceQuit),
            Some(Action::Quit)
        ));
    }

    #[test]
    fn test_enter_on_list_selects_result() {
        let mut app = test_app();
        let mut tui = TuiState::new(&app);
        settle(&mut app, &mut tui, vec![result("1", "one"), result("2", "two")]);

        assert!(dispatch(&app, &mut tui, TuiEvent::CursorDown).is_none());
        match dispatch(&app, &mut tui, TuiEvent::Submit) {
            Some(Action::Select(picked)) => assert_eq!(picked.id.as_str(), "2"),
            other => panic!("expected Select, got {other:?}"),
        }
    }

    #[test]
    fn test_typing_on_list_refocuses_search() {
        let mut app = test_app();
        let mut tui = TuiState::new(&app);
        settle(&mut app, &mut tui, vec![result("1", "one")]);

        dispatch(&app, &mut tui, TuiEvent::InputChar('x'));
        assert_eq!(tui.focus, Focus::Search);
        assert!(tui.search_box.buffer.ends_with('x'));

        dispatch(&app, &mut tui, TuiEvent::Escape);
        assert_eq!(tui.focus, Focus::List);
        assert!(matches!(
            dispatch(&app, &mut tui, TuiEvent::Escape),
            Some(Action::Back)
        ));
    }

    #[test]
    fn test_detail_page_escape_goes_back() {
        let mut app = test_app();
        let mut tui = TuiState::new(&app);
        update(&mut app, Action::Select(result("5", "five")));
        assert!(dispatch(&app, &mut tui, TuiEvent::CursorDown).is_none());
        assert!(matches!(
            dispatch(&app, &mut tui, TuiEvent::Escape),
            Some(Action::Back)
        ));
    }
}
