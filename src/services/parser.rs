// src/services/parser.rs

//! Front page parser.
//!
//! Turns the raw page into entries. Parsing never fails: a page that
//! cannot be read yields no entries, and an entry with a missing field
//! is skipped without affecting its siblings.

use chrono::format::{self, Parsed, StrftimeItems};
use chrono::{Datelike, Local, NaiveDate};
use scraper::{ElementRef, Html};

use crate::error::Result;
use crate::models::{CompiledSelectors, Entry, EntrySelectors};

/// Short month name and day of month, e.g. "Jan 05".
const RIBBON_FORMAT: &str = "%b %d";

/// Service for extracting entries from the front page.
#[derive(Debug, Clone)]
pub struct EntryParser {
    selectors: CompiledSelectors,
}

impl EntryParser {
    /// Create a parser, compiling the configured selectors.
    pub fn new(selectors: &EntrySelectors) -> Result<Self> {
        Ok(Self {
            selectors: selectors.compile()?,
        })
    }

    /// Parse a page using the local calendar date as "today".
    pub fn parse(&self, html: &[u8]) -> Vec<Entry> {
        self.parse_on(html, Local::now().date_naive())
    }

    /// Parse a page, pinning every entry to the year of `today`.
    ///
    /// Words, meanings, examples and ribbons are selected independently and
    /// matched up by position. The number of candidates is bounded by the
    /// shortest of the first three lists; a missing ribbon drops its entry.
    pub fn parse_on(&self, html: &[u8], today: NaiveDate) -> Vec<Entry> {
        let text = String::from_utf8_lossy(html);
        let document = Html::parse_document(&text);

        let words: Vec<ElementRef> = document.select(&self.selectors.word).collect();
        let meanings: Vec<ElementRef> = document.select(&self.selectors.meaning).collect();
        let examples: Vec<ElementRef> = document.select(&self.selectors.example).collect();
        let ribbons: Vec<ElementRef> = document.select(&self.selectors.ribbon).collect();

        let count = words.len().min(meanings.len()).min(examples.len());
        log::debug!(
            "Found {} words, {} meanings, {} examples, {} ribbons",
            words.len(),
            meanings.len(),
            examples.len(),
            ribbons.len()
        );

        (0..count)
            .filter_map(|index| {
                let entry = Self::parse_entry(
                    words[index],
                    meanings[index],
                    examples[index],
                    ribbons.get(index).copied(),
                    today,
                );
                if entry.is_none() {
                    log::debug!("Skipping entry {index}: missing field");
                }
                entry
            })
            .collect()
    }

    fn parse_entry(
        word: ElementRef<'_>,
        meaning: ElementRef<'_>,
        example: ElementRef<'_>,
        ribbon: Option<ElementRef<'_>>,
        today: NaiveDate,
    ) -> Option<Entry> {
        let word = trimmed_text(word)?;
        let meaning = trimmed_text(meaning)?;
        let example = trimmed_text(example)?;
        let ribbon = ribbon.and_then(trimmed_text)?;

        Some(Entry::new(word, meaning, example, resolve_date(&ribbon, today)))
    }
}

/// Visible text of an element, trimmed. `None` if nothing is left.
fn trimmed_text(element: ElementRef<'_>) -> Option<String> {
    let text: String = element.text().collect();
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Turn a ribbon like "Dec 25" into a full date in the year of `today`.
///
/// An unreadable ribbon takes today's month and day. A month/day that does
/// not exist in the current year (Feb 29) becomes `today`.
pub fn resolve_date(ribbon: &str, today: NaiveDate) -> NaiveDate {
    let (month, day) = parse_month_day(ribbon).unwrap_or((today.month(), today.day()));
    NaiveDate::from_ymd_opt(today.year(), month, day).unwrap_or(today)
}

fn parse_month_day(text: &str) -> Option<(u32, u32)> {
    let mut parsed = Parsed::new();
    format::parse(&mut parsed, text, StrftimeItems::new(RIBBON_FORMAT)).ok()?;
    Some((parsed.month()?, parsed.day()?))
}
