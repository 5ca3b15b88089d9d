//! Pipeline for the scraper core.
//!
//! - `merge_entries`: fold a scraped batch into the stored list
//! - `EntryManager`: fetch → parse → merge, plus read access for front ends

pub mod merge;
pub mod refresh;

pub use merge::merge_entries;
pub use refresh::{EntryManager, WidgetUpdate};
