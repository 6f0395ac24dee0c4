use anyhow::Result;
use feed_rs::parser;
use sha2::{Digest, Sha256};

use crate::util::plain_text_snippet;

/// Maximum snippet length in characters.
const SNIPPET_CHARS: usize = 200;

/// One item of a fetched feed, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub guid: String,
    pub title: String,
    pub link: Option<String>,
    pub published: Option<i64>,
    /// Plain-text excerpt of the item's summary or body.
    pub snippet: Option<String>,
}

/// Parse RSS, Atom or JSON Feed bytes into entries, in document order.
pub fn parse_feed(bytes: &[u8]) -> Result<Vec<Entry>> {
    let feed = parser::parse(bytes)?;

    let entries = feed
        .entries
        .into_iter()
        .map(|entry| {
            let link = entry.links.first().map(|l| l.href.clone());
            let published = entry.published.or(entry.updated).map(|dt| dt.timestamp());
            let snippet = entry
                .summary
                .map(|s| s.content)
                .or_else(|| entry.content.and_then(|c| c.body))
                .map(|raw| plain_text_snippet(&raw, SNIPPET_CHARS))
                .filter(|s| !s.is_empty());
            let title = entry
                .title
                .map(|t| t.content.trim().to_string())
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| "Untitled".to_string());

            let existing_id = if entry.id.is_empty() {
                None
            } else {
                Some(entry.id.as_str())
            };
            let guid = generate_guid(existing_id, link.as_deref(), &title, published);

            Entry {
                guid,
                title,
                link,
                published,
                snippet,
            }
        })
        .collect();

    Ok(entries)
}

fn generate_guid(
    existing: Option<&str>,
    link: Option<&str>,
    title: &str,
    published: Option<i64>,
) -> String {
    if let Some(guid) = existing {
        let trimmed = guid.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let input = format!(
        "{}|{}|{}",
        link.unwrap_or(""),
        title,
        published.map(|p| p.to_string()).unwrap_or_default()
    );
    format!("{:x}", Sha256::digest(input.as_bytes()))
}
