// src/services/fetcher.rs

//! Source page fetcher.
//!
//! One GET per call, no retries. Dropping the returned future aborts the
//! request in flight.

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::error::Result;
use crate::models::Config;
use crate::utils::http;

/// Something that can produce the raw bytes of the source page.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch the page once.
    async fn fetch(&self) -> Result<Vec<u8>>;
}

/// Fetches the configured source page over HTTP.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    url: Url,
}

impl HttpFetcher {
    /// Create a fetcher from configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let client = http::create_async_client(&config.crawler)?;
        let url = Url::parse(&config.source.url)?;
        Ok(Self::with_client(client, url))
    }

    /// Create a fetcher around an existing client.
    pub fn with_client(client: Client, url: Url) -> Self {
        Self { client, url }
    }
}

#[async_trait]
impl PageSource for HttpFetcher {
    async fn fetch(&self) -> Result<Vec<u8>> {
        log::debug!("Fetching {}", self.url);
        let bytes = http::fetch_bytes(&self.client, self.url.as_str()).await?;
        log::debug!("Fetched {} bytes from {}", bytes.len(), self.url);
        Ok(bytes)
    }
}
