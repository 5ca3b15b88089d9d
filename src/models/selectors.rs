// src/models/selectors.rs

//! CSS selectors for scraping the front page.

use scraper::Selector;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// CSS selectors for the four positionally correlated entry fields.
///
/// Each selector is matched across the whole document; the Nth match of
/// each one belongs to the Nth entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EntrySelectors {
    /// Anchor holding the term
    #[serde(default = "defaults::word")]
    pub word: String,

    /// Block holding the definition
    #[serde(default = "defaults::meaning")]
    pub meaning: String,

    /// Block holding the usage example
    #[serde(default = "defaults::example")]
    pub example: String,

    /// Date badge, e.g. "Jan 05"
    #[serde(default = "defaults::ribbon")]
    pub ribbon: String,
}

impl Default for EntrySelectors {
    fn default() -> Self {
        Self {
            word: defaults::word(),
            meaning: defaults::meaning(),
            example: defaults::example(),
            ribbon: defaults::ribbon(),
        }
    }
}

impl EntrySelectors {
    /// Parse all four selector strings.
    pub fn compile(&self) -> Result<CompiledSelectors> {
        Ok(CompiledSelectors {
            word: parse_selector(&self.word)?,
            meaning: parse_selector(&self.meaning)?,
            example: parse_selector(&self.example)?,
            ribbon: parse_selector(&self.ribbon)?,
        })
    }
}

/// Parsed form of [`EntrySelectors`].
#[derive(Debug, Clone)]
pub struct CompiledSelectors {
    pub word: Selector,
    pub meaning: Selector,
    pub example: Selector,
    pub ribbon: Selector,
}

fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

// Exact class attribute matches, not class-list membership.
mod defaults {
    pub fn word() -> String {
        r#"a[class="word"]"#.into()
    }
    pub fn meaning() -> String {
        r#"div[class="meaning"]"#.into()
    }
    pub fn example() -> String {
        r#"div[class="example"]"#.into()
    }
    pub fn ribbon() -> String {
        r#"div[class="ribbon"]"#.into()
    }
}
