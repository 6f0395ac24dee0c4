//! Feed retrieval: HTTP fetching and RSS/Atom parsing.
//!
//! - [`fetcher`] - [`FeedClient`], a single-attempt HTTP fetch with size and
//!   time limits
//! - [`parser`] - conversion of feed XML into display-ready [`Entry`] values
//!   using the `feed-rs` crate
//!
//! # Example
//!
//! ```ignore
//! use feedreader::feed::FeedClient;
//!
//! let client = FeedClient::new(Duration::from_secs(30))?;
//! let entries = client.fetch("https://example.com/feed.xml").await?;
//! ```

mod fetcher;
mod parser;

pub use fetcher::{FeedClient, FetchError, DEFAULT_TIMEOUT, MAX_FEED_SIZE};
pub use parser::{parse_feed, Entry};
