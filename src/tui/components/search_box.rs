//! # SearchBox Component
//!
//! Single-line query input shown at the bottom of every list page.
//!
//! The buffer is internal state. `method` and `focused` are props.
//! Submitting does not clear the buffer, so the query stays visible next to
//! its results. Blank submissions are passed through: rejecting them is the
//! store's job, and the user should see its message.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
    Submit(String),
    ContentChanged,
}

pub struct SearchBox {
    pub buffer: String,
    /// Method the next search will use (Prop)
    pub method: Option<String>,
    /// Whether keystrokes go here (Prop)
    pub focused: bool,
}

impl SearchBox {
    pub fn new(method: Option<String>) -> Self {
        Self {
            buffer: String::new(),
            method,
            focused: true,
        }
    }

    fn title(&self) -> String {
        match self.method.as_deref() {
            Some(method) => format!("Search (method: {method})"),
            None => "Search".to_string(),
        }
    }
}

impl Component for SearchBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let style = if self.focused {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::Green).add_modifier(Modifier::DIM)
        };

        // Keep the tail of long queries visible
        let inner = area.width.saturating_sub(2) as usize;
        let mut visible = self.buffer.as_str();
        while visible.width() >= inner && !visible.is_empty() {
            let mut chars = visible.chars();
            chars.next();
            visible = chars.as_str();
        }

        let input = Paragraph::new(visible).style(style).block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .title(self.title()),
        );
        frame.render_widget(input, area);

        if self.focused {
            let x = area.x + 1 + visible.width() as u16;
            frame.set_cursor_position((x, area.y + 1));
        }
    }
}

impl EventHandler for SearchBox {
    type Event = SearchEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.push(*c);
                Some(SearchEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                // Single line: pasted newlines become spaces
                self.buffer.push_str(&text.replace(['\r', '\n'], " "));
                Some(SearchEvent::ContentChanged)
            }
            TuiEvent::Backspace => self.buffer.pop().map(|_| SearchEvent::ContentChanged),
            TuiEvent::Submit => Some(SearchEvent::Submit(self.buffer.clone())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_typing_and_backspace() {
        let mut search = SearchBox::new(None);
        assert_eq!(
            search.handle_event(&TuiEvent::InputChar('h')),
            Some(SearchEvent::ContentChanged)
        );
        search.handle_event(&TuiEvent::InputChar('é'));
        assert_eq!(search.buffer, "hé");

        search.handle_event(&TuiEvent::Backspace);
        assert_eq!(search.buffer, "h");
        search.handle_event(&TuiEvent::Backspace);
        assert_eq!(search.handle_event(&TuiEvent::Backspace), None);
    }

    #[test]
    fn test_submit_keeps_buffer() {
        let mut search = SearchBox::new(None);
        search.buffer = "dune".to_string();
        assert_eq!(
            search.handle_event(&TuiEvent::Submit),
            Some(SearchEvent::Submit("dune".to_string()))
        );
        assert_eq!(search.buffer, "dune");
    }

    #[test]
    fn test_blank_submit_passes_through() {
        let mut search = SearchBox::new(None);
        search.buffer = "   ".to_string();
        assert_eq!(
            search.handle_event(&TuiEvent::Submit),
            Some(SearchEvent::Submit("   ".to_string()))
        );
    }

    #[test]
    fn test_paste_flattens_newlines() {
        let mut search = SearchBox::new(None);
        search.handle_event(&TuiEvent::Paste("a\nb".to_string()));
        assert_eq!(search.buffer, "a b");
    }

    #[test]
    fn test_render_shows_method() {
        let backend = TestBackend::new(40, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut search = SearchBox::new(Some("fuzzy".to_string()));
        search.buffer = "query".to_string();

        terminal
            .draw(|f| {
                let area = f.area();
                search.render(f, area);
            })
            .unwrap();

        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(text.contains("Search (method: fuzzy)"));
        assert!(text.contains("query"));
    }
}
