//! Entry data structure.

use chrono::{DateTime, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use url::Url;

/// Page that shows the full definition of a term.
pub const SHARE_URL: &str = "http://www.urbandictionary.com/define.php";

/// One scraped dictionary entry.
///
/// Two entries are equal iff word, meaning, example and calendar date are
/// equal; there is no separate identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// The term
    pub word: String,

    /// Definition text
    pub meaning: String,

    /// Usage example text
    pub example: String,

    /// Publication day (year is inferred at parse time)
    pub date: NaiveDate,
}

/// Persisted form of an [`Entry`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EntryPayload {
    pub word: String,
    pub meaning: String,
    pub example: String,

    /// Unix timestamp in seconds, UTC
    pub date: f64,
}

impl Entry {
    pub fn new(
        word: impl Into<String>,
        meaning: impl Into<String>,
        example: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            word: word.into(),
            meaning: meaning.into(),
            example: example.into(),
            date,
        }
    }

    /// Rebuild an entry from a persisted JSON mapping.
    ///
    /// Returns `None` if any of the four keys is missing or mistyped.
    pub fn from_payload(value: &serde_json::Value) -> Option<Self> {
        let payload = EntryPayload::deserialize(value).ok()?;
        Self::try_from(payload).ok()
    }

    /// Encode for persistence. The date is stored as midnight UTC.
    pub fn payload(&self) -> EntryPayload {
        let timestamp = self.date.and_time(NaiveTime::MIN).and_utc().timestamp();
        EntryPayload {
            word: self.word.clone(),
            meaning: self.meaning.clone(),
            example: self.example.clone(),
            date: timestamp as f64,
        }
    }

    /// Link to the definition page for this word.
    ///
    /// Every whitespace or newline character in the word becomes a `+`.
    pub fn share_url(&self, base: &Url) -> Url {
        let term: String = self
            .word
            .chars()
            .map(|c| if c.is_whitespace() { ' ' } else { c })
            .collect();

        let mut url = base.clone();
        url.query_pairs_mut().clear().append_pair("term", &term);
        url
    }

    /// Format entry for display using a template.
    ///
    /// Supported placeholders:
    /// - `{word}`, `{meaning}`, `{example}`, `{date}`
    pub fn format(&self, template: &str) -> String {
        template
            .replace("{word}", &self.word)
            .replace("{meaning}", &self.meaning)
            .replace("{example}", &self.example)
            .replace("{date}", &self.date.format("%Y-%m-%d").to_string())
    }
}

impl TryFrom<EntryPayload> for Entry {
    type Error = EntryPayload;

    fn try_from(payload: EntryPayload) -> std::result::Result<Self, Self::Error> {
        if !payload.date.is_finite() {
            return Err(payload);
        }
        let Some(date) = DateTime::from_timestamp(payload.date.floor() as i64, 0) else {
            return Err(payload);
        };

        Ok(Self {
            word: payload.word,
            meaning: payload.meaning,
            example: payload.example,
            date: date.date_naive(),
        })
    }
}
