//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::EntrySelectors;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Page to scrape and definition links
    #[serde(default)]
    pub source: SourceConfig,

    /// HTTP behavior settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Structural selectors for the entry fields
    #[serde(default)]
    pub selectors: EntrySelectors,

    /// Shared entry list location
    #[serde(default)]
    pub storage: StorageConfig,

    /// CLI output settings
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.source.url)
            .map_err(|e| AppError::validation(format!("source.url is invalid: {e}")))?;
        Url::parse(&self.source.share_url)
            .map_err(|e| AppError::validation(format!("source.share_url is invalid: {e}")))?;
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::validation("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == Some(0) {
            return Err(AppError::validation("crawler.timeout_secs must be > 0"));
        }
        if self.storage.namespace.trim().is_empty() {
            return Err(AppError::validation("storage.namespace is empty"));
        }
        if self.storage.slot.trim().is_empty() {
            return Err(AppError::validation("storage.slot is empty"));
        }
        self.selectors.compile()?;
        Ok(())
    }

    /// Parsed base for share links.
    pub fn share_base(&self) -> Result<Url> {
        Url::parse(&self.source.share_url)
            .map_err(|e| AppError::config(format!("source.share_url is invalid: {e}")))
    }
}

/// Scraped page and outbound link settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Page holding the daily entries
    #[serde(default = "defaults::source_url")]
    pub url: String,

    /// Definition page used for share links
    #[serde(default = "defaults::share_url")]
    pub share_url: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: defaults::source_url(),
            share_url: defaults::share_url(),
        }
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds; unset means wait for the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: None,
        }
    }
}

/// Where the entry list lives.
///
/// Every process pointed at the same namespace and slot shares one list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Shared namespace (a directory under the storage root)
    #[serde(default = "defaults::namespace")]
    pub namespace: String,

    /// Slot name holding the list
    #[serde(default = "defaults::slot")]
    pub slot: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            namespace: defaults::namespace(),
            slot: defaults::slot(),
        }
    }
}

/// Console output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Template for listing entries, see [`crate::models::Entry::format`]
    #[serde(default = "defaults::template")]
    pub template: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            template: defaults::template(),
        }
    }
}

mod defaults {
    use crate::models::entry::SHARE_URL;

    pub fn source_url() -> String {
        "https://www.urbandictionary.com".into()
    }
    pub fn share_url() -> String {
        SHARE_URL.into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; shaneglish/0.1)".into()
    }
    pub fn namespace() -> String {
        "group.ch.laurinbrandner.Shaneglish".into()
    }
    pub fn slot() -> String {
        "entries".into()
    }
    pub fn template() -> String {
        "[{date}] {word}\n    {meaning}\n    \"{example}\"".into()
    }
}
