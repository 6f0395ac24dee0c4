use crate::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};
use std::borrow::Cow;

/// Render the status bar
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let text: Cow<'_, str> = if let Some(pending) = &app.pending_load {
        Cow::Owned(format!("Loading {}...", pending.name))
    } else if let Some((msg, _)) = &app.status_message {
        msg.clone()
    } else if app.menu.is_visible() {
        Cow::Borrowed("[j/k]select [Enter]load [m/Esc]close [q]uit")
    } else {
        Cow::Borrowed("[m]enu [j/k]move [o]pen [r]eload [1-9]feed [q]uit")
    };

    let style = Style::default().bg(Color::DarkGray).fg(Color::White);
    f.render_widget(Paragraph::new(text).style(style), area);
}
