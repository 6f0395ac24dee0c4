//! Main event loop for the TUI.
//!
//! Multiplexes terminal input, feed-load completions and periodic ticks.

use crate::app::{App, AppEvent};
use anyhow::Result;
use crossterm::{
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::sync::mpsc;

#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};

use super::input::handle_input;
use super::render::render;

/// Result of handling a key press event.
pub enum Action {
    /// Continue the event loop and process more events.
    Continue,
    /// Exit the application and restore the terminal.
    Quit,
}

/// Runs the TUI application event loop.
///
/// Uses `tokio::select!` over:
/// - **Terminal input**: key presses from crossterm's async event stream
/// - **Feed loads**: `AppEvent`s posted by spawned fetch tasks
/// - **Periodic tick**: 250ms timer for status expiry
/// - **Signals**: SIGINT/SIGTERM end the loop (Unix only)
///
/// Installs a panic hook that restores terminal state before unwinding.
pub async fn run(
    app: &mut App,
    event_tx: mpsc::Sender<AppEvent>,
    mut event_rx: mpsc::Receiver<AppEvent>,
) -> Result<()> {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let mut terminal = setup_terminal()?;
    let mut event_stream = crossterm::event::EventStream::new();
    let mut tick_interval = tokio::time::interval(Duration::from_millis(250));

    #[cfg(unix)]
    let mut sigterm = signal(SignalKind::terminate())?;
    #[cfg(unix)]
    let mut sigint = signal(SignalKind::interrupt())?;

    loop {
        if app.needs_redraw {
            terminal.draw(|f| render(f, app))?;
            app.needs_redraw = false;
        }

        // Apply every finished load before waiting on input again.
        while let Ok(event) = event_rx.try_recv() {
            app.apply_event(event);
        }

        #[cfg(unix)]
        let sigterm_fut = sigterm.recv();
        #[cfg(not(unix))]
        let sigterm_fut = std::future::pending::<Option<()>>();

        #[cfg(unix)]
        let sigint_fut = sigint.recv();
        #[cfg(not(unix))]
        let sigint_fut = std::future::pending::<Option<()>>();

        tokio::select! {
            biased;

            _ = sigterm_fut => {
                tracing::info!(signal = "SIGTERM", "Shutting down");
                break;
            }
            _ = sigint_fut => {
                tracing::info!(signal = "SIGINT", "Shutting down");
                break;
            }

            maybe_event = event_stream.next() => {
                let Some(event) = maybe_event else { break };
                if let Action::Quit = on_terminal_event(app, event, &event_tx) {
                    break;
                }
            }

            Some(event) = event_rx.recv() => {
                app.apply_event(event);
            }

            _ = tick_interval.tick() => {
                app.clear_expired_status();
            }
        }
    }

    restore_terminal(terminal)?;
    Ok(())
}

/// Apply one crossterm event to the app.
fn on_terminal_event(
    app: &mut App,
    event: io::Result<Event>,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Action {
    match event {
        Ok(Event::Key(key)) => {
            app.needs_redraw = true;
            handle_input(app, key.code, key.modifiers, event_tx).unwrap_or_else(|e| {
                app.set_status(format!("Error: {}", e));
                Action::Continue
            })
        }
        Ok(Event::Resize(..)) => {
            app.needs_redraw = true;
            Action::Continue
        }
        Ok(_) => Action::Continue,
        Err(e) => {
            tracing::warn!(error = %e, "Terminal event stream error");
            Action::Continue
        }
    }
}

/// Set up the terminal for TUI rendering.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state.
fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
