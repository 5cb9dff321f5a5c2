//! # ResultList Component
//!
//! The paginated result page. Shows one page of `ResultStore::results` at a
//! time with a movable selection.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `ResultListState` lives in `TuiState`
//! - `ResultList` is created each frame with borrowed state and results
//!
//! The selection is an absolute index into the result list. The visible page
//! is derived from it, so moving past the last row of a page flips the page.

use std::ops::Range;

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::search::SearchResult;
use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;

/// Number of pages needed for `total` rows. Always at least 1.
pub fn page_count(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1)).max(1)
}

/// Index range of the rows on `page`, clamped to `total`.
pub fn page_range(page: usize, page_size: usize, total: usize) -> Range<usize> {
    let page_size = page_size.max(1);
    let start = (page * page_size).min(total);
    let end = (start + page_size).min(total);
    start..end
}

pub struct ResultListState {
    pub selected: usize,
    pub list_state: ListState,
    /// Number of results currently in the store (Prop)
    pub total: usize,
    /// Rows per page (Prop)
    pub page_size: usize,
}

impl ResultListState {
    pub fn new(page_size: usize) -> Self {
        Self {
            selected: 0,
            list_state: ListState::default(),
            total: 0,
            page_size: page_size.max(1),
        }
    }

    pub fn page(&self) -> usize {
        self.selected / self.page_size.max(1)
    }

    /// Back to the first row, e.g. after a new search.
    pub fn reset(&mut self) {
        self.selected = 0;
    }

    /// Keeps the selection inside the current result list.
    fn clamp(&mut self) {
        self.selected = self.selected.min(self.total.saturating_sub(1));
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResultListEvent {
    /// Open the result at this index.
    Open(usize),
}

impl EventHandler for ResultListState {
    type Event = ResultListEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        if self.total == 0 {
            return None;
        }
        self.clamp();

        match event {
            TuiEvent::CursorUp | TuiEvent::ScrollUp => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            TuiEvent::CursorDown | TuiEvent::ScrollDown => {
                self.selected = (self.selected + 1).min(self.total - 1);
                None
            }
            TuiEvent::PagePrev => {
                let page = self.page().saturating_sub(1);
                self.selected = page * self.page_size;
                None
            }
            TuiEvent::PageNext => {
                let last_page = page_count(self.total, self.page_size) - 1;
                let page = (self.page() + 1).min(last_page);
                self.selected = (page * self.page_size).min(self.total - 1);
                None
            }
            TuiEvent::Submit => Some(ResultListEvent::Open(self.selected)),
            _ => None,
        }
    }
}

/// Transient render wrapper for the result page.
pub struct ResultList<'a> {
    state: &'a mut ResultListState,
    results: &'a [SearchResult],
    focused: bool,
}

impl<'a> ResultList<'a> {
    pub fn new(state: &'a mut ResultListState, results: &'a [SearchResult], focused: bool) -> Self {
        Self {
            state,
            results,
            focused,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.total = self.results.len();
        self.state.clamp();

        let page = self.state.page();
        let pages = page_count(self.results.len(), self.state.page_size);
        let range = page_range(page, self.state.page_size, self.results.len());

        let help_text = format!(
            " Page {}/{}  ↑↓ Select  ←→ Page  Enter Open  Esc Back ",
            page + 1,
            pages
        );

        let border_color = if self.focused { Color::Gray } else { Color::DarkGray };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(format!(" Results ({}) ", self.results.len()))
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(help_text).centered())
            .padding(Padding::horizontal(1));

        let inner_width = area.width.saturating_sub(4) as usize; // borders + padding
        let offset = range.start;

        let items: Vec<ListItem> = self.results[range]
            .iter()
            .enumerate()
            .map(|(i, result)| {
                let is_selected = offset + i == self.state.selected;
                let id = result.id.to_string();
                let title_width = inner_width.saturating_sub(id.width() + 2);
                let title = truncate_str(&result.title(), title_width);

                let style = if is_selected && self.focused {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default().fg(Color::Gray)
                };
                let id_style = if is_selected && self.focused {
                    style
                } else {
                    Style::default().fg(Color::Yellow)
                };

                ListItem::new(Line::from(vec![
                    Span::styled(id, id_style),
                    Span::styled("  ", style),
                    Span::styled(title, style),
                ]))
            })
            .collect();

        self.state
            .list_state
            .select(Some(self.state.selected - offset));

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}

/// Truncate a string to fit within `max_width` columns, adding "..." if needed.
fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }

    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width - 3 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push_str("...");
    out
}
