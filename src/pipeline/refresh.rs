// src/pipeline/refresh.rs

//! Fetch → parse → merge.
//!
//! [`EntryManager`] is what a front end talks to: it reads the cached list
//! synchronously and refreshes it asynchronously.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{Config, Entry};
use crate::services::{EntryParser, HttpFetcher, PageSource};
use crate::storage::{EntryStore, SlotStorage};

/// Outcome of a background refresh, as a today widget reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetUpdate {
    /// The list changed
    NewData,
    /// The page was fetched but had nothing new
    NoData,
    /// The page could not be fetched or the list not saved
    Failed,
}

/// Collaborator-facing entry point of the core.
pub struct EntryManager {
    source: Arc<dyn PageSource>,
    parser: EntryParser,
    store: EntryStore,
    share_base: Url,
}

impl EntryManager {
    pub fn new(
        source: Arc<dyn PageSource>,
        parser: EntryParser,
        store: EntryStore,
        share_base: Url,
    ) -> Self {
        Self {
            source,
            parser,
            store,
            share_base,
        }
    }

    /// Build a manager that fetches over HTTP and persists into `storage`.
    pub async fn from_config(config: &Config, storage: Arc<dyn SlotStorage>) -> Result<Self> {
        let source = Arc::new(HttpFetcher::new(config)?);
        let parser = EntryParser::new(&config.selectors)?;
        let store = EntryStore::open(storage, &config.storage).await?;
        let share_base = config.share_base()?;
        Ok(Self::new(source, parser, store, share_base))
    }

    /// Cached entry list, most recent first.
    pub fn current_entries(&self) -> Vec<Entry> {
        self.store.entries()
    }

    /// The entry a today widget shows.
    pub fn latest_entry(&self) -> Option<Entry> {
        self.store.latest()
    }

    /// Definition link for an entry.
    pub fn share_url(&self, entry: &Entry) -> Url {
        entry.share_url(&self.share_base)
    }

    pub fn store(&self) -> &EntryStore {
        &self.store
    }

    /// Fetch the page, parse it and merge the result.
    ///
    /// Returns whether the stored list changed. A fetch failure is returned
    /// as is and nothing is merged. Dropping the future before the page
    /// arrives aborts the request.
    pub async fn refresh(&self) -> Result<bool> {
        let html = self.source.fetch().await?;
        self.ingest(&html).await
    }

    /// Like [`refresh`](Self::refresh), but gives up with
    /// [`AppError::Cancelled`] if `cancel` fires before the page arrives.
    ///
    /// Cancelling after the page has arrived has no effect.
    pub async fn refresh_with_cancel(&self, cancel: &CancellationToken) -> Result<bool> {
        let html = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                log::info!("Refresh cancelled before the page arrived");
                return Err(AppError::Cancelled);
            }
            result = self.source.fetch() => result?,
        };
        self.ingest(&html).await
    }

    /// Refresh and fold the result into a widget update.
    pub async fn update_widget(&self) -> WidgetUpdate {
        match self.refresh().await {
            Ok(true) => WidgetUpdate::NewData,
            Ok(false) => WidgetUpdate::NoData,
            Err(e) => {
                log::warn!("Widget refresh failed: {}", e);
                WidgetUpdate::Failed
            }
        }
    }

    async fn ingest(&self, html: &[u8]) -> Result<bool> {
        let entries = self.parser.parse(html);
        log::info!("Parsed {} entries", entries.len());
        self.store.merge(&entries).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntrySelectors, SHARE_URL, StorageConfig};
    use crate::storage::MemoryStorage;
    use async_trait::async_trait;
    use std::time::Duration;

    const PAGE: &str = r#"<html><body>
        <div class="ribbon">Jan 05</div>
        <a class="word">yeet</a>
        <div class="meaning">meaning1</div>
        <div class="example">example1</div>
    </body></html>"#;

    /// Serves a fixed page, or fails as if the connection was refused.
    struct StaticSource(Option<&'static str>);

    #[async_trait]
    impl PageSource for StaticSource {
        async fn fetch(&self) -> Result<Vec<u8>> {
            match self.0 {
                Some(page) => Ok(page.as_bytes().to_vec()),
                None => Err(AppError::Io(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    "connection refused",
                ))),
            }
        }
    }

    /// Never answers.
    struct StalledSource;

    #[async_trait]
    impl PageSource for StalledSource {
        async fn fetch(&self) -> Result<Vec<u8>> {
            std::future::pending().await
        }
    }

    async fn build_manager(
        source: impl PageSource + 'static,
        storage: Arc<MemoryStorage>,
    ) -> EntryManager {
        let parser = EntryParser::new(&EntrySelectors::default()).unwrap();
        let store = EntryStore::open(storage, &StorageConfig::default())
            .await
            .unwrap();
        EntryManager::new(Arc::new(source), parser, store, Url::parse(SHARE_URL).unwrap())
    }

    #[tokio::test]
    async fn test_refresh_merges_page() {
        let manager = build_manager(StaticSource(Some(PAGE)), Arc::new(MemoryStorage::new())).await;

        assert!(manager.refresh().await.unwrap());
        let entries = manager.current_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].word, "yeet");
        assert_eq!(entries[0].meaning, "meaning1");
        assert_eq!(manager.latest_entry(), Some(entries[0].clone()));

        assert!(!manager.refresh().await.unwrap());
        assert_eq!(manager.current_entries().len(), 1);
    }

    #[tokio::test]
    async fn test_refresh_empty_page_reports_no_change() {
        let storage = Arc::new(MemoryStorage::new());
        let manager = build_manager(StaticSource(Some("<html></html>")), storage).await;
        assert!(!manager.refresh().await.unwrap());
    }

    #[tokio::test]
    async fn test_fetch_failure_is_propagated_without_merge() {
        let storage = Arc::new(MemoryStorage::new());
        let manager = build_manager(StaticSource(None), storage.clone()).await;

        let err = manager.refresh().await.unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
        assert!(manager.current_entries().is_empty());
        assert!(!storage.contains(&crate::storage::slot_key(&StorageConfig::default())));
    }

    #[tokio::test]
    async fn test_cancel_before_page_arrives() {
        let storage = Arc::new(MemoryStorage::new());
        let manager = build_manager(StalledSource, storage.clone()).await;
        let cancel = CancellationToken::new();

        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            trigger.cancel();
        });

        let err = manager.refresh_with_cancel(&cancel).await.unwrap_err();
        assert!(matches!(err, AppError::Cancelled));
        assert!(manager.current_entries().is_empty());
        assert!(!storage.contains(&crate::storage::slot_key(&StorageConfig::default())));
    }

    #[tokio::test]
    async fn test_uncancelled_token_completes() {
        let manager = build_manager(StaticSource(Some(PAGE)), Arc::new(MemoryStorage::new())).await;
        let cancel = CancellationToken::new();

        assert!(manager.refresh_with_cancel(&cancel).await.unwrap());

        // Too late to matter.
        cancel.cancel();
        assert_eq!(manager.current_entries().len(), 1);
    }

    #[tokio::test]
    async fn test_update_widget_outcomes() {
        let manager = build_manager(StaticSource(Some(PAGE)), Arc::new(MemoryStorage::new())).await;
        assert_eq!(manager.update_widget().await, WidgetUpdate::NewData);
        assert_eq!(manager.update_widget().await, WidgetUpdate::NoData);

        let failing = build_manager(StaticSource(None), Arc::new(MemoryStorage::new())).await;
        assert_eq!(failing.update_widget().await, WidgetUpdate::Failed);
    }

    #[tokio::test]
    async fn test_share_url_uses_configured_base() {
        let manager = build_manager(StaticSource(Some(PAGE)), Arc::new(MemoryStorage::new())).await;
        manager.refresh().await.unwrap();

        let entry = manager.latest_entry().unwrap();
        assert_eq!(
            manager.share_url(&entry).as_str(),
            "http://www.urbandictionary.com/define.php?term=yeet"
        );
    }
}
