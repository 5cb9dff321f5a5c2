//! # TUI Components
//!
//! One file per component, each holding its state, events, rendering and
//! tests.
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: top status line (path, status, spinner)
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `SearchBox`: query input
//! - `ResultList`: the paginated result page
//! - `DetailView`: the scrollable detail page
//!
//! Components receive external data as props, never by reaching into `App`
//! themselves:
//!
//! ```rust,ignore
//! // Good: dependencies are explicit
//! ResultList::new(&mut tui.result_list, app.store.results(), focused).render(frame, area);
//!
//! // Bad: hidden dependency on global state
//! result_list.render(frame, area); // reads from App
//! ```

pub mod detail_view;
pub mod result_list;
pub mod search_box;
mod title_bar;

pub use detail_view::{DetailView, DetailViewState};
pub use result_list::{ResultList, ResultListEvent, ResultListState};
pub use search_box::{SearchBox, SearchEvent};
pub use title_bar::TitleBar;
