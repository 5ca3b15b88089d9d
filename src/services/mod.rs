//! Service layer for the scraper core.
//!
//! This module contains:
//! - Page fetching (`HttpFetcher`, behind the `PageSource` trait)
//! - Entry extraction (`EntryParser`)

mod fetcher;
mod parser;

pub use fetcher::{HttpFetcher, PageSource};
pub use parser::{EntryParser, resolve_date};
