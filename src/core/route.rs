//! # Routing
//!
//! Static path table for the three pages:
//!
//! ```text
//! /              → search page
//! /result        → paginated result page
//! /detail/:id    → detail page (receives `id`)
//! ```
//!
//! `Navigator` tracks the current route and a back stack. There are no
//! guards or redirects; an unmatched path is reported and ignored.

use std::fmt;

use log::debug;

use crate::search::ResultId;

/// A resolved page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Search,
    Results,
    Detail { id: ResultId },
}

impl Route {
    /// Canonical path for this route. The detail id is percent-encoded, so
    /// `resolve(&route.path())` gives the route back for any id.
    pub fn path(&self) -> String {
        match self {
            Route::Search => "/".to_string(),
            Route::Results => "/result".to_string(),
            Route::Detail { id } => format!("/detail/{}", urlencoding::encode(id.as_str())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Route::Search => "SearchPage",
            Route::Results => "PaginatedResultPage",
            Route::Detail { .. } => "DetailPage",
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Page {
    Search,
    Results,
    Detail,
}

struct RouteDef {
    pattern: &'static str,
    page: Page,
}

const ROUTE_TABLE: &[RouteDef] = &[
    RouteDef {
        pattern: "/",
        page: Page::Search,
    },
    RouteDef {
        pattern: "/result",
        page: Page::Results,
    },
    RouteDef {
        pattern: "/detail/:id",
        page: Page::Detail,
    },
];

/// Splits a path into its segments. The leading `/` is dropped, empty
/// segments are kept so that an empty `:param` is still a segment.
fn segments(path: &str) -> Vec<&str> {
    path.strip_prefix('/').unwrap_or(path).split('/').collect()
}

/// Matches `path` against a pattern, returning captured `:param` values,
/// still percent-encoded.
///
/// One trailing empty segment (a trailing `/`) is ignored when the pattern
/// does not expect it.
fn match_pattern<'a>(
    pattern: &'static str,
    path: &[&'a str],
) -> Option<Vec<(&'static str, &'a str)>> {
    let pattern = segments(pattern);
    let path = match path.split_last() {
        Some((&"", rest)) if rest.len() == pattern.len() => rest,
        _ => path,
    };
    if pattern.len() != path.len() {
        return None;
    }

    let mut params = Vec::new();
    for (&expected, &actual) in pattern.iter().zip(path) {
        match expected.strip_prefix(':') {
            Some(name) => params.push((name, actual)),
            None if expected == actual => {}
            None => return None,
        }
    }
    Some(params)
}

/// Resolves a path to a route. Query strings and fragments are ignored.
/// Parameters are percent-decoded; a parameter that is not valid UTF-8
/// once decoded does not match.
pub fn resolve(path: &str) -> Option<Route> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    if !path.starts_with('/') {
        return None;
    }
    let path_segments = segments(path);

    ROUTE_TABLE.iter().find_map(|def| {
        let params = match_pattern(def.pattern, &path_segments)?;
        match def.page {
            Page::Search => Some(Route::Search),
            Page::Results => Some(Route::Results),
            Page::Detail => {
                let (_, raw) = params.iter().find(|(name, _)| *name == "id")?;
                let id = urlencoding::decode(raw).ok()?;
                Some(Route::Detail {
                    id: ResultId::new(id),
                })
            }
        }
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    NotFound(String),
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteError::NotFound(path) => write!(f, "no page at {path}"),
        }
    }
}

impl std::error::Error for RouteError {}

/// Current route plus back stack.
#[derive(Debug)]
pub struct Navigator {
    current: Route,
    history: Vec<Route>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            current: Route::Search,
            history: Vec::new(),
        }
    }

    pub fn current(&self) -> &Route {
        &self.current
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    /// Resolves `path` and moves there. On no match the current route is kept.
    pub fn navigate(&mut self, path: &str) -> Result<&Route, RouteError> {
        let route = resolve(path).ok_or_else(|| RouteError::NotFound(path.to_string()))?;
        self.go(route);
        Ok(&self.current)
    }

    /// Moves to an already-resolved route. Re-entering the current route
    /// does not grow the back stack.
    pub fn go(&mut self, route: Route) {
        if route == self.current {
            return;
        }
        debug!("Navigate {} -> {}", self.current.path(), route.path());
        let previous = std::mem::replace(&mut self.current, route);
        self.history.push(previous);
    }

    /// Pops the back stack. Returns `false` when already at the first page.
    pub fn back(&mut self) -> bool {
        match self.history.pop() {
            Some(previous) => {
                debug!("Back {} -> {}", self.current.path(), previous.path());
                self.current = previous;
                true
            }
            None => false,
        }
    }
}
