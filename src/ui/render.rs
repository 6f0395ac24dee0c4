//! Render functions for the TUI.
//!
//! Layout, top to bottom: header with the active feed title, the body (feed
//! menu beside the entry list when the menu is visible), and the status bar.

use crate::app::App;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::Paragraph,
    Frame,
};

use super::{entries, menu, status};

/// Minimum terminal dimensions required for normal operation.
pub(super) const MIN_WIDTH: u16 = 40;
pub(super) const MIN_HEIGHT: u16 = 6;

/// Main render dispatch function.
pub(super) fn render(f: &mut Frame, app: &App) {
    let area = f.area();

    if area.width < 1 || area.height < 1 {
        return;
    }

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = if area.height < 3 || area.width < 20 {
            Paragraph::new("Too small")
        } else {
            Paragraph::new(format!(
                "Terminal too small\n\nMinimum: {}x{}\nCurrent: {}x{}",
                MIN_WIDTH, MIN_HEIGHT, area.width, area.height
            ))
            .alignment(Alignment::Center)
        };
        f.render_widget(msg, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(f, app, chunks[0]);
    render_body(f, app, chunks[1]);
    status::render(f, app, chunks[2]);
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let header = Paragraph::new(format!(" ☰  {}", app.title)).style(
        Style::default()
            .fg(Color::White)
            .bg(Color::Blue)
            .add_modifier(Modifier::BOLD),
    );
    f.render_widget(header, area);
}

fn render_body(f: &mut Frame, app: &App, area: Rect) {
    if app.menu.is_hidden() {
        entries::render(f, app, area);
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(area);

    menu::render(f, app, columns[0]);
    entries::render(f, app, columns[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::{Entry, FeedClient, DEFAULT_TIMEOUT};
    use crate::registry::FeedRegistry;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
    use std::sync::Arc;

    fn test_app() -> App {
        App::new(
            FeedRegistry::with_seed(),
            FeedClient::new(DEFAULT_TIMEOUT).unwrap(),
        )
    }

    fn buffer_text(buffer: &Buffer) -> String {
        buffer
            .content
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[tokio::test]
    async fn test_menu_hidden_does_not_list_feeds() {
        let app = test_app();
        let screen = draw(&app);
        assert!(!screen.contains("Udacity Blog"));
        assert!(!screen.contains("CSS Tricks"));
    }

    #[tokio::test]
    async fn test_visible_menu_lists_feeds_in_registry_order() {
        let mut app = test_app();
        app.add_feed("New Feed Name", "http://feeds.feedburner.com/new_feed_name")
            .unwrap();
        app.toggle_menu();

        let screen = draw(&app);

        let positions: Vec<usize> = app
            .menu_entries()
            .iter()
            .map(|name| {
                screen
                    .find(name)
                    .unwrap_or_else(|| panic!("{} not rendered", name))
            })
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
    }

    #[tokio::test]
    async fn test_header_shows_feed_title_and_entries() {
        let mut app = test_app();
        app.title = "CSS Tricks".to_string();
        app.entries = Arc::new(vec![Entry {
            guid: "1".to_string(),
            title: "Flexbox guide".to_string(),
            link: None,
            published: None,
            snippet: Some("Everything about flex".to_string()),
        }]);

        let screen = draw(&app);
        let header = screen.lines().next().unwrap();
        assert!(header.contains("CSS Tricks"));
        assert!(screen.contains("Flexbox guide"));
        assert!(screen.contains("Everything about flex"));
    }

    #[tokio::test]
    async fn test_tiny_terminal() {
        let app = test_app();
        let mut terminal = Terminal::new(TestBackend::new(10, 2)).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();
        assert!(buffer_text(terminal.backend().buffer()).contains("Too small"));
    }
}
