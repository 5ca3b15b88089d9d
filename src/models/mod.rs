// src/models/mod.rs

//! Domain models for the scraper core.
//!
//! This module contains the entry value type, the selectors used to find
//! entries in the page, and the application configuration.

mod config;
mod entry;
mod selectors;

// Re-export all public types
pub use config::{Config, CrawlerConfig, OutputConfig, SourceConfig, StorageConfig};
pub use entry::{Entry, EntryPayload, SHARE_URL};
pub use selectors::{CompiledSelectors, EntrySelectors};
