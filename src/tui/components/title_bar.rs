//! # TitleBar Component
//!
//! Top status bar: current path, status message, loading spinner and the
//! time of the last successful fetch.
//!
//! Stateless. Every field is a prop copied from `App` each frame.
//!
//! The title text changes based on state:
//!
//! 1. **Loading**: `"Scout /result | ⠙ Searching for "dune"..."`
//! 2. **Status message**: `"Scout /result | 12 results | fetched 14:02:11"`
//! 3. **Default**: `"Scout /"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

const SPINNER: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

pub struct TitleBar {
    /// Path of the current route (e.g. "/detail/7")
    pub route_path: String,
    pub status_message: String,
    pub loading: bool,
    pub spinner_frame: usize,
    /// Preformatted local time of the last successful fetch
    pub fetched_at: Option<String>,
}

impl TitleBar {
    pub fn title_text(&self) -> String {
        let mut text = format!("Scout {}", self.route_path);
        if self.loading {
            let spinner = SPINNER[self.spinner_frame % SPINNER.len()];
            text.push_str(&format!(" | {spinner} {}", self.status_message));
            return text;
        }
        if !self.status_message.is_empty() {
            text.push_str(&format!(" | {}", self.status_message));
        }
        if let Some(ref at) = self.fetched_at {
            text.push_str(&format!(" | fetched {at}"));
        }
        text
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Span::raw(self.title_text()), area);
    }
}
