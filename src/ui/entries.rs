use crate::app::App;
use crate::util::{display_width, strip_control_chars, truncate_to_width};
use chrono::{DateTime, Utc};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

/// Format timestamp as relative time
pub fn format_relative_time(timestamp: Option<i64>) -> String {
    let Some(ts) = timestamp else {
        return String::new();
    };

    let diff = Utc::now().timestamp() - ts;

    // Future dates (malformed feeds)
    if diff < 0 {
        return "now".to_string();
    }
    if diff < 3600 {
        return format!("{}m", diff / 60);
    }
    if diff < 86400 {
        return format!("{}h", diff / 3600);
    }
    if diff < 604800 {
        return format!("{}d", diff / 86400);
    }

    DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.format("%b %d").to_string())
        .unwrap_or_default()
}

/// Render the entry list of the active feed.
///
/// Each entry takes two lines: title with age, then the snippet. The list
/// scrolls so the selected entry stays visible.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let inner_width = area.width.saturating_sub(2) as usize;

    let border_style = if app.menu.is_hidden() {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(format!("Entries ({})", app.entries.len()));

    if app.entries.is_empty() {
        let msg = if app.pending_load.is_some() {
            "Loading..."
        } else {
            "No entries loaded"
        };
        f.render_widget(List::new([ListItem::new(msg)]).block(block), area);
        return;
    }

    let items: Vec<ListItem> = app
        .entries
        .iter()
        .map(|entry| {
            let age = format_relative_time(entry.published);
            let title_budget = inner_width.saturating_sub(display_width(&age) + 2);
            let title = strip_control_chars(&entry.title);
            let title = truncate_to_width(&title, title_budget).into_owned();

            let mut heading = vec![Span::styled(
                title,
                Style::default().add_modifier(Modifier::BOLD),
            )];
            if !age.is_empty() {
                heading.push(Span::styled(
                    format!("  {}", age),
                    Style::default().fg(Color::DarkGray),
                ));
            }

            let mut lines = vec![Line::from(heading)];
            if let Some(snippet) = &entry.snippet {
                lines.push(Line::from(Span::styled(
                    truncate_to_width(snippet, inner_width).into_owned(),
                    Style::default().fg(Color::Gray),
                )));
            }
            ListItem::new(lines)
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray).fg(Color::White));

    let mut state = ListState::default().with_selected(Some(app.selected_entry));
    f.render_stateful_widget(list, area, &mut state);
}
