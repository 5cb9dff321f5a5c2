//! # DetailView Component
//!
//! The `/detail/:id` page. Receives the route's `id` as a prop and renders
//! every field of the matching result, wrapped to the viewport and
//! scrollable.
//!
//! The result is looked up by the caller (`ResultStore::find`), so the page
//! keeps working for a selected result that is no longer in the list.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Padding, Paragraph};
use serde_json::Value;
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::search::{ResultId, SearchResult};
use crate::tui::event::TuiEvent;

#[derive(Default)]
pub struct DetailViewState {
    pub scroll_state: ScrollViewState,
}

impl DetailViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scroll events only; the page emits nothing upward.
    pub fn handle_event(&mut self, event: &TuiEvent) {
        match event {
            TuiEvent::CursorUp | TuiEvent::ScrollUp => self.scroll_state.scroll_up(),
            TuiEvent::CursorDown | TuiEvent::ScrollDown => self.scroll_state.scroll_down(),
            TuiEvent::PagePrev => self.scroll_state.scroll_page_up(),
            TuiEvent::PageNext => self.scroll_state.scroll_page_down(),
            _ => {}
        }
    }
}

/// Renders a field value as display text. Strings lose their quotes,
/// composite values are pretty-printed.
fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "-".to_string(),
        Value::Array(_) | Value::Object(_) => {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
        other => other.to_string(),
    }
}

/// Builds the wrapped lines for a result: a bold key line, then the
/// indented value.
fn detail_lines(result: &SearchResult, width: u16) -> Vec<Line<'static>> {
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let value_width = (width as usize).saturating_sub(2).max(1);

    let mut lines = vec![
        Line::from(Span::styled("id", key_style)),
        Line::from(format!("  {}", result.id)),
    ];

    for (key, value) in &result.fields {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(key.clone(), key_style)));
        for raw_line in format_value(value).lines() {
            for wrapped in textwrap::wrap(raw_line, value_width) {
                lines.push(Line::from(format!("  {wrapped}")));
            }
        }
    }
    lines
}

/// Height of the scroll canvas, saturating at the largest a `Rect` allows.
fn scroll_height(line_count: usize) -> u16 {
    u16::try_from(line_count).unwrap_or(u16::MAX)
}

/// Transient render wrapper for the detail page.
pub struct DetailView<'a> {
    state: &'a mut DetailViewState,
    id: &'a ResultId,
    result: Option<&'a SearchResult>,
}

impl<'a> DetailView<'a> {
    pub fn new(
        state: &'a mut DetailViewState,
        id: &'a ResultId,
        result: Option<&'a SearchResult>,
    ) -> Self {
        Self { state, id, result }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title = match self.result {
            Some(result) => format!(" {} ", result.title()),
            None => format!(" {} ", self.id),
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(title)
            .title_bottom(Line::from(" ↑↓ Scroll  Esc Back ").centered())
            .padding(Padding::horizontal(1));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(result) = self.result else {
            let missing = Paragraph::new(format!("No result with id {}.", self.id))
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            frame.render_widget(missing, inner);
            return;
        };

        // One column is reserved for the scrollbar
        let content_width = inner.width.saturating_sub(1);
        let lines = detail_lines(result, content_width);
        let content_height = scroll_height(lines.len());

        let mut scroll_view = ScrollView::new(Size::new(content_width, content_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        scroll_view.render_widget(
            Paragraph::new(lines),
            Rect::new(0, 0, content_width, content_height),
        );

        frame.render_stateful_widget(scroll_view, inner, &mut self.state.scroll_state);
    }
}
