//! A terminal feed reader.
//!
//! - [`registry`] - ordered list of feed sources
//! - [`feed`] - fetching and parsing of feeds
//! - [`app`] - view state: feed loading, entry list, menu
//! - [`menu`] - menu visibility state machine
//! - [`config`] - TOML configuration
//! - [`ui`] - ratatui front end

pub mod app;
pub mod config;
pub mod feed;
pub mod menu;
pub mod registry;
pub mod ui;
pub mod util;
