//! Keyboard input handling.
//!
//! Keys are routed to the menu while it is visible and to the entry list
//! otherwise.

use crate::app::{App, AppEvent};
use crate::util::validate_url_for_open;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use tokio::sync::mpsc;

use super::Action;

/// Main input dispatch function.
pub(super) fn handle_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Result<Action> {
    if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
        return Ok(Action::Quit);
    }

    if app.menu.is_visible() {
        return handle_menu_input(app, code, event_tx);
    }

    match code {
        KeyCode::Char('q') => return Ok(Action::Quit),
        KeyCode::Char('m') => {
            app.toggle_menu();
        }
        KeyCode::Char('j') | KeyCode::Down => app.nav_down(),
        KeyCode::Char('k') | KeyCode::Up => app.nav_up(),
        KeyCode::Char('r') => {
            if app.reload_active_feed(event_tx)?.is_none() {
                app.set_status("No feed loaded yet");
            }
        }
        KeyCode::Char('o') | KeyCode::Enter => open_selected_entry(app),
        KeyCode::Char(c @ '1'..='9') => {
            let index = (c as usize) - ('1' as usize);
            app.load_feed(index, event_tx, None)?;
        }
        _ => {}
    }

    Ok(Action::Continue)
}

/// Input while the feed menu is shown.
fn handle_menu_input(
    app: &mut App,
    code: KeyCode,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Result<Action> {
    match code {
        KeyCode::Char('q') => return Ok(Action::Quit),
        KeyCode::Char('m') | KeyCode::Esc => {
            app.toggle_menu();
        }
        KeyCode::Char('j') | KeyCode::Down => app.nav_down(),
        KeyCode::Char('k') | KeyCode::Up => app.nav_up(),
        KeyCode::Enter => {
            app.choose_menu_feed(event_tx)?;
        }
        _ => {}
    }
    Ok(Action::Continue)
}

/// Open the highlighted entry's link in the system browser.
fn open_selected_entry(app: &mut App) {
    let Some(link) = app.selected_entry().and_then(|e| e.link.clone()) else {
        app.set_status("Entry has no link");
        return;
    };

    match validate_url_for_open(&link) {
        Ok(url) => match open::that_detached(url.as_str()) {
            Ok(()) => app.set_status("Opened in browser"),
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Failed to open browser");
                app.set_status(format!("Could not open browser: {}", e));
            }
        },
        Err(e) => {
            tracing::warn!(link = %link, error = %e, "Refusing to open entry link");
            app.set_status(format!("Refusing to open link: {}", e));
        }
    }
}
