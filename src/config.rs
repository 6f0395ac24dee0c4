//! Configuration file parser for ~/.config/feedreader/config.toml.
//!
//! The config file is optional; a missing file yields `Config::default()`.
//! Unknown keys are accepted but logged as warnings to surface typos.
use crate::registry::{FeedDescriptor, FeedRegistry, RegistryError};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config file too large: {0}")]
    TooLarge(String),

    #[error("Invalid feed in config file: {0}")]
    Registry(#[from] RegistryError),
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Top-level application configuration.
///
/// All fields use `#[serde(default)]` so any subset of keys can be specified.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Index of the feed loaded at startup.
    pub initial_feed: usize,

    /// Per-request timeout for feed fetches, in seconds.
    pub request_timeout_secs: u64,

    /// Maximum number of entries kept per loaded feed (0 = unlimited).
    pub max_entries: usize,

    /// Feed list replacing the built-in seed feeds when non-empty.
    pub feeds: Vec<FeedDescriptor>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_feed: 0,
            request_timeout_secs: 30,
            max_entries: 0,
            feeds: Vec::new(),
        }
    }
}

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line number info
    /// - Blank feed name or URL → `Err(ConfigError::Registry)`
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let Some(content) = read_config_file(path)? else {
            return Ok(Self::default());
        };

        warn_unknown_keys(&content);

        let config: Config = toml::from_str(&content)?;
        // Validate feeds up front so a bad entry is reported against the file.
        config.registry()?;
        tracing::info!(
            path = %path.display(),
            feeds = config.feeds.len(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Registry described by this config: the configured feeds, or the seed
    /// feeds when none are listed.
    pub fn registry(&self) -> Result<FeedRegistry, RegistryError> {
        if self.feeds.is_empty() {
            Ok(FeedRegistry::with_seed())
        } else {
            FeedRegistry::from_descriptors(self.feeds.clone())
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

/// Config keys understood by [`Config`].
const KNOWN_KEYS: &[&str] = &["initial_feed", "request_timeout_secs", "max_entries", "feeds"];

/// Read the config file, or `None` when it is absent or blank.
fn read_config_file(path: &Path) -> Result<Option<String>, ConfigError> {
    let len = match std::fs::metadata(path) {
        Ok(meta) => meta.len(),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "No config file found, using defaults");
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };
    if len > Config::MAX_FILE_SIZE {
        return Err(ConfigError::TooLarge(format!(
            "Config file is {} bytes (max {} bytes)",
            len,
            Config::MAX_FILE_SIZE
        )));
    }

    // The file can vanish between the size check and the read.
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    if content.trim().is_empty() {
        tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
        return Ok(None);
    }
    Ok(Some(content))
}

/// Log top-level keys serde would silently ignore.
fn warn_unknown_keys(content: &str) {
    let Ok(table) = content.parse::<toml::Table>() else {
        return;
    };
    for key in table.keys().filter(|k| !KNOWN_KEYS.contains(&k.as_str())) {
        tracing::warn!(key = %key, "Unknown key in config file, ignoring");
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(name: &str, content: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("feedreader_config_test_{}", name));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, content).unwrap();
        path
    }

    fn cleanup(path: &Path) {
        if let Some(dir) = path.parent() {
            std::fs::remove_dir_all(dir).ok();
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.initial_feed, 0);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.max_entries, 0);
        assert!(config.feeds.is_empty());
    }

    #[test]
    fn test_default_registry_is_seed() {
        let registry = Config::default().registry().unwrap();
        assert_eq!(registry, FeedRegistry::with_seed());
    }

    #[test]
    fn test_missing_file_returns_default() {
        let path = Path::new("/tmp/feedreader_test_nonexistent_config.toml");
        let config = Config::load(path).unwrap();
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_whitespace_only_file_returns_default() {
        let path = write_config("whitespace", "   \n  \n  ");
        let config = Config::load(&path).unwrap();
        assert!(config.feeds.is_empty());
        cleanup(&path);
    }

    #[test]
    fn test_partial_config_uses_defaults_for_missing() {
        let path = write_config("partial", "initial_feed = 2\n");
        let config = Config::load(&path).unwrap();
        assert_eq!(config.initial_feed, 2);
        assert_eq!(config.request_timeout_secs, 30);
        cleanup(&path);
    }

    #[test]
    fn test_full_config() {
        let content = r#"
initial_feed = 1
request_timeout_secs = 10
max_entries = 25

[[feeds]]
name = "BBC"
url = "http://feeds.bbci.co.uk/news/rss.xml"

[[feeds]]
name = "Example"
url = "https://example.com/atom.xml"
"#;
        let path = write_config("full", content);
        let config = Config::load(&path).unwrap();
        assert_eq!(config.initial_feed, 1);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.max_entries, 25);

        let registry = config.registry().unwrap();
        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, vec!["BBC", "Example"]);
        cleanup(&path);
    }

    #[test]
    fn test_blank_feed_url_rejected() {
        let content = r#"
[[feeds]]
name = "Broken"
url = ""
"#;
        let path = write_config("blank_url", content);
        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Registry(RegistryError::EmptyUrl)));
        cleanup(&path);
    }

    #[test]
    fn test_feed_missing_name_is_parse_error() {
        let content = r#"
[[feeds]]
url = "https://example.com/rss"
"#;
        let path = write_config("missing_name", content);
        assert!(matches!(Config::load(&path), Err(ConfigError::Parse(_))));
        cleanup(&path);
    }

    #[test]
    fn test_invalid_toml_returns_error() {
        let path = write_config("invalid", "this is not [valid toml");
        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("Invalid TOML"));
        cleanup(&path);
    }

    #[test]
    fn test_unknown_keys_accepted() {
        let path = write_config("unknown", "max_entries = 5\ntheme = \"dark\"\n");
        let config = Config::load(&path).unwrap();
        assert_eq!(config.max_entries, 5);
        cleanup(&path);
    }

    #[test]
    fn test_wrong_type_returns_error() {
        let path = write_config("wrongtype", "initial_feed = \"first\"\n");
        assert!(Config::load(&path).is_err());
        cleanup(&path);
    }

    #[test]
    fn test_too_large_file_rejected() {
        let path = write_config("too_large", &"a".repeat(1_048_577));
        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::TooLarge(_)));
        assert!(err.to_string().contains("too large"));
        cleanup(&path);
    }

    #[test]
    fn test_zero_timeout_clamped() {
        let config = Config {
            request_timeout_secs: 0,
            ..Config::default()
        };
        assert_eq!(config.request_timeout(), Duration::from_secs(1));
    }
}
