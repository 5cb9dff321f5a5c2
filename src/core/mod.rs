//! # Core Application Logic
//!
//! This module contains Scout's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • App (state)          │
//!                    │  • ResultStore          │
//!                    │  • Route / Navigator    │
//!                    │  • Action + update()    │
//!                    │                         │
//!                    │  No I/O. No UI.         │
//!                    └───────────┬─────────────┘
//!                                │
//!                    ┌───────────┴───────────┐
//!                    ▼                       ▼
//!             ┌────────────┐          ┌────────────┐
//!             │    TUI     │          │   search   │
//!             │  Adapter   │          │ (reqwest)  │
//!             │ (ratatui)  │          │            │
//!             └────────────┘          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`store`]: `ResultStore`, the search results and their flags
//! - [`route`]: The path table and the `Navigator`
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`config`]: Config file, env and CLI resolution

pub mod action;
pub mod config;
pub mod route;
pub mod state;
pub mod store;
