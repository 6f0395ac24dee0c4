use crate::feed::{Entry, FeedClient, FetchError};
use crate::menu::MenuVisibility;
use crate::registry::{FeedDescriptor, FeedRegistry, RegistryError};
use futures::FutureExt;
use std::borrow::Cow;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tokio::time::Instant;

/// How long a status message stays in the status bar.
pub const STATUS_TTL: Duration = Duration::from_secs(5);

/// Header text shown before any feed has been rendered.
pub const DEFAULT_TITLE: &str = "feedreader";

// ============================================================================
// Load Types
// ============================================================================

/// Errors raised synchronously by [`App::load_feed`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoadError {
    #[error("No feed at index {index} (registry has {len} feeds)")]
    InvalidIndex { index: usize, len: usize },
}

/// What happened to a load once its result reached the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Entries replaced the entry list and the header shows the feed name.
    Rendered { index: usize, entries: usize },
    /// The fetch failed; the entry list was left as it was.
    Failed { index: usize, error: String },
    /// A later load was issued, or the feed was removed, before this one
    /// finished; its result was dropped.
    Superseded { index: usize },
}

/// Completion signal handed to [`App::load_feed`]. Fires exactly once.
pub type CompletionTx = oneshot::Sender<LoadOutcome>;

/// The load whose result the view is currently waiting for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLoad {
    pub index: usize,
    pub name: String,
    pub generation: u64,
}

/// Events from background tasks
pub enum AppEvent {
    /// A feed fetch finished.
    ///
    /// Fields:
    /// - `index`: registry position the load was issued for
    /// - `name`: feed name resolved when the load was issued
    /// - `generation`: load counter at issue time (stale results are dropped)
    /// - `result`: parsed entries or the fetch failure
    /// - `on_complete`: caller's completion signal, if any
    FeedLoaded {
        index: usize,
        name: String,
        generation: u64,
        result: Result<Vec<Entry>, FetchError>,
        on_complete: Option<CompletionTx>,
    },
}

fn complete(on_complete: Option<CompletionTx>, outcome: LoadOutcome) {
    if let Some(tx) = on_complete {
        // The caller may have stopped waiting; nothing to do then.
        let _ = tx.send(outcome);
    }
}

/// Run a future, converting a panic into an error message.
async fn catch_task_panic<F, T>(future: F) -> Result<T, String>
where
    F: std::future::Future<Output = T>,
{
    AssertUnwindSafe(future)
        .catch_unwind()
        .await
        .map_err(|panic| {
            if let Some(s) = panic.downcast_ref::<&'static str>() {
                s.to_string()
            } else if let Some(s) = panic.downcast_ref::<String>() {
                s.clone()
            } else {
                "unknown panic".to_string()
            }
        })
}

// ============================================================================
// Application State
// ============================================================================

/// Central application state: feed registry, menu, and the rendered feed.
///
/// Only the UI task touches an `App`. Feed fetches run on spawned tasks and
/// report back through an [`AppEvent`] channel; [`App::apply_event`] folds the
/// result into the view.
///
/// Overlapping loads follow a last-issued-wins policy: every call to
/// [`App::load_feed`] bumps `load_generation`, and a result carrying an older
/// generation is discarded (its completion reports [`LoadOutcome::Superseded`]).
pub struct App {
    pub registry: FeedRegistry,
    pub client: FeedClient,

    // View
    pub menu: MenuVisibility,
    /// Entries of the active feed. Replaced wholesale on every applied load.
    pub entries: Arc<Vec<Entry>>,
    /// Header text: the name of the feed whose entries are shown.
    pub title: String,
    /// Registry index of the feed whose entries are shown.
    pub active_feed: Option<usize>,
    pub selected_menu_item: usize,
    pub selected_entry: usize,

    // Loading
    pub load_generation: u64,
    pub pending_load: Option<PendingLoad>,
    /// Cap on entries kept per load (0 = unlimited).
    pub max_entries: usize,

    pub status_message: Option<(Cow<'static, str>, Instant)>,
    /// Skip frame renders when nothing changed
    pub needs_redraw: bool,
}

impl App {
    pub fn new(registry: FeedRegistry, client: FeedClient) -> Self {
        Self {
            registry,
            client,
            menu: MenuVisibility::default(),
            entries: Arc::new(Vec::new()),
            title: DEFAULT_TITLE.to_string(),
            active_feed: None,
            selected_menu_item: 0,
            selected_entry: 0,
            load_generation: 0,
            pending_load: None,
            max_entries: 0,
            status_message: None,
            needs_redraw: true,
        }
    }

    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries;
        self
    }

    // ------------------------------------------------------------------------
    // Feed loading
    // ------------------------------------------------------------------------

    /// Start loading the feed at `index`.
    ///
    /// Fails fast with [`LoadError::InvalidIndex`] when `index` is out of
    /// range; nothing is spawned in that case and `on_complete` is dropped
    /// unfired. Otherwise the fetch runs on a spawned task, which posts
    /// [`AppEvent::FeedLoaded`] to `event_tx`. `on_complete` fires once that
    /// event has been applied.
    ///
    /// Returns the generation assigned to this load.
    pub fn load_feed(
        &mut self,
        index: usize,
        event_tx: &mpsc::Sender<AppEvent>,
        on_complete: Option<CompletionTx>,
    ) -> Result<u64, LoadError> {
        let FeedDescriptor { name, url } = self
            .registry
            .get(index)
            .cloned()
            .ok_or(LoadError::InvalidIndex {
                index,
                len: self.registry.len(),
            })?;

        self.load_generation = self.load_generation.wrapping_add(1);
        let generation = self.load_generation;

        if let Some(previous) = &self.pending_load {
            tracing::debug!(
                previous = previous.index,
                index,
                generation,
                "Load issued while another is in flight, earlier result will be discarded"
            );
        }
        self.pending_load = Some(PendingLoad {
            index,
            name: name.clone(),
            generation,
        });
        self.needs_redraw = true;

        tracing::info!(index, feed = %name, url = %url, generation, "Loading feed");

        let client = self.client.clone();
        let tx = event_tx.clone();
        tokio::spawn(async move {
            let result = match catch_task_panic(client.fetch(&url)).await {
                Ok(result) => result,
                Err(panic_msg) => {
                    tracing::error!(task = "feed_load", index, error = %panic_msg, "Background task panicked");
                    Err(FetchError::TaskFailed(panic_msg))
                }
            };

            let event = AppEvent::FeedLoaded {
                index,
                name,
                generation,
                result,
                on_complete,
            };
            if let Err(mpsc::error::SendError(event)) = tx.send(event).await {
                tracing::warn!(index, generation, "Feed load finished after the view closed");
                let AppEvent::FeedLoaded { on_complete, .. } = event;
                complete(
                    on_complete,
                    LoadOutcome::Failed {
                        index,
                        error: "view closed".to_string(),
                    },
                );
            }
        });

        Ok(generation)
    }

    /// Re-issue a load for the feed currently shown, if any.
    pub fn reload_active_feed(
        &mut self,
        event_tx: &mpsc::Sender<AppEvent>,
    ) -> Result<Option<u64>, LoadError> {
        match self.active_feed {
            Some(index) => self.load_feed(index, event_tx, None).map(Some),
            None => Ok(None),
        }
    }

    /// Fold a background event into the view.
    pub fn apply_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::FeedLoaded {
                index,
                name,
                generation,
                result,
                on_complete,
            } => {
                let outcome = self.apply_feed_loaded(index, name, generation, result);
                complete(on_complete, outcome);
            }
        }
        self.needs_redraw = true;
    }

    fn apply_feed_loaded(
        &mut self,
        index: usize,
        name: String,
        generation: u64,
        result: Result<Vec<Entry>, FetchError>,
    ) -> LoadOutcome {
        if generation != self.load_generation {
            tracing::debug!(
                index,
                generation,
                latest = self.load_generation,
                "Discarding superseded feed load"
            );
            return LoadOutcome::Superseded { index };
        }
        self.pending_load = None;

        match result {
            Ok(mut entries) => {
                if self.max_entries > 0 {
                    entries.truncate(self.max_entries);
                }
                let count = entries.len();
                self.entries = Arc::new(entries);
                self.title = name;
                self.active_feed = Some(index);
                self.selected_entry = 0;

                tracing::info!(index, feed = %self.title, entries = count, "Feed rendered");
                if count == 0 {
                    self.set_status(format!("{} has no entries", self.title));
                }
                LoadOutcome::Rendered {
                    index,
                    entries: count,
                }
            }
            Err(e) => {
                tracing::warn!(index, feed = %name, error = %e, "Feed load failed");
                self.set_status(format!("Failed to load {}: {}", name, e));
                LoadOutcome::Failed {
                    index,
                    error: e.to_string(),
                }
            }
        }
    }

    // ------------------------------------------------------------------------
    // Menu
    // ------------------------------------------------------------------------

    /// Show or hide the feed menu.
    ///
    /// Opening the menu puts the highlight on the feed being shown.
    pub fn toggle_menu(&mut self) -> MenuVisibility {
        let state = self.menu.toggle();
        if state.is_visible() {
            self.selected_menu_item = self.active_feed.unwrap_or(0);
            self.clamp_selections();
        }
        self.needs_redraw = true;
        state
    }

    /// Labels of the menu items, in display order.
    pub fn menu_entries(&self) -> Vec<&str> {
        self.registry.names().collect()
    }

    /// Load the highlighted menu feed and close the menu.
    pub fn choose_menu_feed(&mut self, event_tx: &mpsc::Sender<AppEvent>) -> Result<u64, LoadError> {
        let generation = self.load_feed(self.selected_menu_item, event_tx, None)?;
        self.menu = MenuVisibility::Hidden;
        Ok(generation)
    }

    // ------------------------------------------------------------------------
    // Registry
    // ------------------------------------------------------------------------

    pub fn add_feed(&mut self, name: &str, url: &str) -> Result<(), RegistryError> {
        self.registry.add_feed(name, url)?;
        self.needs_redraw = true;
        Ok(())
    }

    /// Drop the last feed from the registry. No-op on an empty registry.
    pub fn remove_last_feed(&mut self) -> Option<FeedDescriptor> {
        let removed = self.registry.remove_last()?;
        let removed_index = self.registry.len();
        if self.active_feed == Some(removed_index) {
            // The rendered entries stay, but they no longer belong to a menu item.
            self.active_feed = None;
        }
        if self.pending_load.as_ref().map(|p| p.index) == Some(removed_index) {
            // A result for a feed that is gone must not be rendered.
            self.load_generation = self.load_generation.wrapping_add(1);
            self.pending_load = None;
            tracing::debug!(index = removed_index, "Pending load dropped with its feed");
        }
        self.clamp_selections();
        self.needs_redraw = true;
        Some(removed)
    }

    // ------------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------------

    pub fn nav_up(&mut self) {
        if self.menu.is_visible() {
            self.selected_menu_item = self.selected_menu_item.saturating_sub(1);
        } else {
            self.selected_entry = self.selected_entry.saturating_sub(1);
        }
    }

    pub fn nav_down(&mut self) {
        if self.menu.is_visible() {
            if self.selected_menu_item + 1 < self.registry.len() {
                self.selected_menu_item += 1;
            }
        } else if self.selected_entry + 1 < self.entries.len() {
            self.selected_entry += 1;
        }
    }

    pub fn selected_entry(&self) -> Option<&Entry> {
        self.entries.get(self.selected_entry)
    }

    /// Keep selection indices inside their lists.
    pub fn clamp_selections(&mut self) {
        self.selected_menu_item = self
            .selected_menu_item
            .min(self.registry.len().saturating_sub(1));
        self.selected_entry = self
            .selected_entry
            .min(self.entries.len().saturating_sub(1));
    }

    // ------------------------------------------------------------------------
    // Status bar
    // ------------------------------------------------------------------------

    pub fn set_status(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.status_message = Some((msg.into(), Instant::now()));
        self.needs_redraw = true;
    }

    /// Drop the status message once it is older than [`STATUS_TTL`].
    /// Returns true when a message was cleared.
    pub fn clear_expired_status(&mut self) -> bool {
        match &self.status_message {
            Some((_, set_at)) if set_at.elapsed() >= STATUS_TTL => {
                self.status_message = None;
                self.needs_redraw = true;
                true
            }
            _ => false,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
