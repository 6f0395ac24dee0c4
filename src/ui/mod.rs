//! Terminal User Interface module.
//!
//! - `loop_runner` - Main event loop and terminal management
//! - `input` - Keyboard input handling
//! - `render` - Layout and header
//! - `menu` - Feed menu panel
//! - `entries` - Entry list panel
//! - `status` - Status bar widget

mod entries;
mod input;
mod loop_runner;
mod menu;
mod render;
mod status;

pub use loop_runner::{run, Action};
