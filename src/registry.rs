//! Ordered registry of feed sources.
//!
//! A feed is identified by its position in the registry, not by value:
//! duplicates are allowed and display order is insertion order. Every
//! descriptor carries a non-empty name and a non-empty URL; the mutating
//! operations refuse input that would break that.
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Feed name must not be empty")]
    EmptyName,

    #[error("Feed URL must not be empty")]
    EmptyUrl,
}

// ============================================================================
// Types
// ============================================================================

/// A named feed source.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FeedDescriptor {
    pub name: String,
    pub url: String,
}

impl FeedDescriptor {
    /// Build a descriptor, rejecting blank fields.
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Result<Self, RegistryError> {
        let descriptor = Self {
            name: name.into(),
            url: url.into(),
        };
        descriptor.validate()?;
        Ok(descriptor)
    }

    fn validate(&self) -> Result<(), RegistryError> {
        if self.name.trim().is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if self.url.trim().is_empty() {
            return Err(RegistryError::EmptyUrl);
        }
        Ok(())
    }
}

/// Feeds shipped with the reader when the config file lists none.
const SEED_FEEDS: &[(&str, &str)] = &[
    ("Udacity Blog", "http://blog.udacity.com/feed"),
    ("CSS Tricks", "http://feeds.feedburner.com/CssTricks"),
    ("HTML5 Rocks", "http://feeds.feedburner.com/html5rocks"),
    (
        "Linear Digressions",
        "http://feeds.feedburner.com/udacity-linear-digressions",
    ),
];

/// Ordered, append/remove-only collection of [`FeedDescriptor`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedRegistry {
    feeds: Vec<FeedDescriptor>,
}

impl FeedRegistry {
    /// Registry populated with the built-in seed feeds.
    pub fn with_seed() -> Self {
        Self {
            feeds: SEED_FEEDS
                .iter()
                .map(|(name, url)| FeedDescriptor {
                    name: (*name).to_string(),
                    url: (*url).to_string(),
                })
                .collect(),
        }
    }

    /// Build a registry from externally supplied descriptors (config file).
    ///
    /// Fails on the first descriptor with a blank name or URL.
    pub fn from_descriptors(feeds: Vec<FeedDescriptor>) -> Result<Self, RegistryError> {
        for feed in &feeds {
            feed.validate()?;
        }
        Ok(Self { feeds })
    }

    /// Append a feed at the end of the registry.
    pub fn add_feed(
        &mut self,
        name: impl Into<String>,
        url: impl Into<String>,
    ) -> Result<&FeedDescriptor, RegistryError> {
        let descriptor = FeedDescriptor::new(name, url)?;
        tracing::debug!(name = %descriptor.name, url = %descriptor.url, "Feed added");
        self.feeds.push(descriptor);
        let last = self.feeds.len() - 1;
        Ok(&self.feeds[last])
    }

    /// Remove the most recently appended feed.
    ///
    /// Empty registry is a no-op and yields `None`.
    pub fn remove_last(&mut self) -> Option<FeedDescriptor> {
        let removed = self.feeds.pop();
        if removed.is_none() {
            tracing::debug!("remove_last on empty registry ignored");
        }
        removed
    }

    pub fn list(&self) -> &[FeedDescriptor] {
        &self.feeds
    }

    pub fn get(&self, index: usize) -> Option<&FeedDescriptor> {
        self.feeds.get(index)
    }

    pub fn len(&self) -> usize {
        self.feeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.feeds.is_empty()
    }

    /// Feed names in registry order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.feeds.iter().map(|f| f.name.as_str())
    }
}

// ============================================================================
// Tests
// ============================================================================
