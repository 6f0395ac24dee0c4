use crate::app::App;
use crate::util::{strip_control_chars, truncate_to_width};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

/// Render the feed menu panel (one item per registry feed, in order).
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let inner_width = area.width.saturating_sub(4) as usize;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!("Feeds ({})", app.registry.len()));

    if app.registry.is_empty() {
        f.render_widget(List::new([ListItem::new("No feeds")]).block(block), area);
        return;
    }

    let items: Vec<ListItem> = app
        .menu_entries()
        .into_iter()
        .enumerate()
        .map(|(i, name)| {
            let clean = strip_control_chars(name);
            let label = truncate_to_width(&clean, inner_width).into_owned();

            let (marker, style) = if Some(i) == app.active_feed {
                ("• ", Style::default().add_modifier(Modifier::BOLD))
            } else {
                ("  ", Style::default())
            };
            ListItem::new(Line::from(vec![
                Span::styled(marker, Style::default().fg(Color::Cyan)),
                Span::styled(label, style),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray).fg(Color::White));

    let mut state = ListState::default().with_selected(Some(app.selected_menu_item));
    f.render_stateful_widget(list, area, &mut state);
}
