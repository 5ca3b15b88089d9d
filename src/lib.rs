// src/lib.rs

//! Shaneglish scraper core library
//!
//! Fetches the Urban Dictionary front page, pulls the daily entries out of
//! it and keeps them in a bounded, deduplicated list shared by every
//! process pointed at the same storage namespace.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;

pub use error::{AppError, Result};
pub use models::{Config, Entry};
pub use pipeline::{EntryManager, WidgetUpdate};
