use chrono::Local;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};

use crate::core::route::Route;
use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::{DetailView, ResultList, TitleBar};
use crate::tui::{Focus, TuiState};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};

    let route = app.route();
    let search_height = if matches!(route, Route::Detail { .. }) { 0 } else { 3 };
    let layout = Layout::vertical([Length(1), Min(0), Length(search_height)]);
    let [title_area, main_area, search_area] = layout.areas(frame.area());

    let mut title_bar = TitleBar {
        route_path: route.path(),
        status_message: app.status_message.clone(),
        loading: app.store.is_loading(),
        spinner_frame,
        fetched_at: app
            .store
            .fetched_at()
            .map(|at| at.with_timezone(&Local).format("%H:%M:%S").to_string()),
    };
    title_bar.render(frame, title_area);

    match route {
        Route::Search => draw_search_page(frame, main_area, app),
        Route::Results => draw_results_page(frame, main_area, app, tui),
        Route::Detail { id } => {
            DetailView::new(&mut tui.detail, id, app.store.find(id)).render(frame, main_area);
        }
    }

    if search_height > 0 {
        tui.search_box.focused = tui.focus == Focus::Search;
        tui.search_box.render(frame, search_area);
    }
}

fn draw_search_page(frame: &mut Frame, area: Rect, app: &App) {
    if let Some(error) = app.store.error() {
        draw_error_view(frame, area, error);
        return;
    }

    let mut lines = vec![
        Line::from(Span::styled(
            "Scout",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from("Enter Search  Esc Quit"),
    ];
    if let Some(selected) = app.store.selected_result() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Last opened: {}", selected.title()),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let height = lines.len() as u16;
    let [centered] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        centered,
    );
}

fn draw_results_page(frame: &mut Frame, area: Rect, app: &App, tui: &mut TuiState) {
    if app.store.is_loading() {
        let query = app.store.last_query().unwrap_or_default();
        let loading = Paragraph::new(format!("Searching for \"{query}\"..."))
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" Results "));
        frame.render_widget(loading, area);
        return;
    }

    if let Some(error) = app.store.error() {
        draw_error_view(frame, area, error);
        return;
    }

    if app.store.results().is_empty() {
        let empty = Paragraph::new("No results yet.")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" Results "));
        frame.render_widget(empty, area);
        return;
    }

    let focused = tui.focus == Focus::List;
    ResultList::new(&mut tui.result_list, app.store.results(), focused).render(frame, area);
}

fn draw_error_view(frame: &mut Frame, area: Rect, error_msg: &str) {
    let error_paragraph = Paragraph::new(error_msg)
        .style(Style::default().fg(Color::Red))
        .block(Block::bordered().title("ERROR"))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(error_paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, Effect, update};
    use crate::search::{FETCH_FAILED_MESSAGE, SearchError};
    use crate::test_support::{result, test_app};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(app: &App, tui: &mut TuiState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal.draw(|f| draw_ui(f, app, tui, 0)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    fn settle_search(app: &mut App, outcome: Result<Vec<crate::search::SearchResult>, SearchError>) {
        let Effect::SpawnFetch(pending) = update(
            app,
            Action::Search {
                query: "dune".to_string(),
                method: None,
            },
        ) else {
            panic!("expected SpawnFetch");
        };
        update(
            app,
            Action::FetchSettled {
                ticket: pending.ticket,
                outcome,
            },
        );
    }

    #[test]
    fn test_search_page_renders() {
        let app = test_app();
        let mut tui = TuiState::new(&app);
        let text = render(&app, &mut tui);
        assert!(text.contains("Scout /"));
        assert!(text.contains("Enter Search"));
    }

    #[test]
    fn test_results_page_shows_loading() {
        let mut app = test_app();
        let mut tui = TuiState::new(&app);
        update(
            &mut app,
            Action::Search {
                query: "dune".to_string(),
                method: None,
            },
        );
        let text = render(&app, &mut tui);
        assert!(text.contains("Scout /result"));
        assert!(text.contains("Searching for \"dune\"..."));
    }

    #[test]
    fn test_results_page_lists_results() {
        let mut app = test_app();
        let mut tui = TuiState::new(&app);
        settle_search(&mut app, Ok(vec![result("1", "Dune"), result("2", "Dune Messiah")]));
        let text = render(&app, &mut tui);
        assert!(text.contains("Results (2)"));
        assert!(text.contains("Dune Messiah"));
    }

    #[test]
    fn test_results_page_shows_error() {
        let mut app = test_app();
        let mut tui = TuiState::new(&app);
        settle_search(&mut app, Err(SearchError::Network("refused".into())));
        let text = render(&app, &mut tui);
        assert!(text.contains("ERROR"));
        assert!(text.contains(FETCH_FAILED_MESSAGE));
    }

    #[test]
    fn test_detail_page_hides_search_box() {
        let mut app = test_app();
        let mut tui = TuiState::new(&app);
        update(
            &mut app,
            Action::Select(result("9", "Chapterhouse").with_field("year", 1985)),
        );
        let text = render(&app, &mut tui);
        assert!(text.contains("Scout /detail/9"));
        assert!(text.contains("1985"));
        assert!(!text.contains("Search (method"));
        assert!(!text.contains("╭Search"));
    }
}
