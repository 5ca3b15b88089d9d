//! Merge computation for the entry list.
//!
//! Pure function, no I/O. The store decides whether to persist by comparing
//! the result with what it had.

use crate::models::Entry;

/// Merge a freshly scraped batch into the current list.
///
/// Each entry of `incoming` that is not already in the list is inserted at
/// its own position in the batch (clamped to the list length), not at the
/// front. Entries already present keep their position. The result is cut
/// to `capacity`.
pub fn merge_entries(current: &[Entry], incoming: &[Entry], capacity: usize) -> Vec<Entry> {
    let mut merged = current.to_vec();

    for (index, entry) in incoming.iter().enumerate() {
        if !merged.contains(entry) {
            let position = index.min(merged.len());
            merged.insert(position, entry.clone());
        }
    }

    merged.truncate(capacity);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const CAPACITY: usize = 50;

    fn make_entry(word: &str) -> Entry {
        Entry::new(
            word,
            format!("meaning of {word}"),
            format!("example of {word}"),
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        )
    }

    fn make_entries(words: &[&str]) -> Vec<Entry> {
        words.iter().map(|w| make_entry(w)).collect()
    }

    fn words(entries: &[Entry]) -> Vec<&str> {
        entries.iter().map(|e| e.word.as_str()).collect()
    }

    /// Deterministic pseudo-random batches drawn from a small vocabulary so
    /// that overlaps and duplicates are common.
    fn batches(vocabulary: u64) -> Vec<Vec<Entry>> {
        let mut state: u64 = 0x2545_f491_4f6c_dd1d;
        let mut next = move || {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state
        };

        (0..60)
            .map(|_| {
                let len = (next() % 12) as usize;
                (0..len)
                    .map(|_| make_entry(&format!("w{}", next() % vocabulary)))
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_merge_into_empty() {
        let merged = merge_entries(&[], &make_entries(&["a", "b", "c"]), CAPACITY);
        assert_eq!(words(&merged), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_new_entries_inserted_at_batch_index() {
        let current = make_entries(&["x", "y", "z"]);
        let incoming = make_entries(&["a", "b"]);

        let merged = merge_entries(&current, &incoming, CAPACITY);
        assert_eq!(words(&merged), vec!["a", "b", "x", "y", "z"]);
    }

    #[test]
    fn test_new_entries_interleave_around_known_ones() {
        let current = make_entries(&["x", "y", "z"]);
        let incoming = make_entries(&["x", "a", "y", "b"]);

        // "a" goes to index 1, "b" to index 3; known entries do not move.
        let merged = merge_entries(&current, &incoming, CAPACITY);
        assert_eq!(words(&merged), vec!["x", "a", "y", "b", "z"]);
    }

    #[test]
    fn test_insert_position_clamped_to_length() {
        let incoming = make_entries(&["a", "a", "b"]);

        let merged = merge_entries(&[], &incoming, CAPACITY);
        assert_eq!(words(&merged), vec!["a", "b"]);
    }

    #[test]
    fn test_existing_entries_not_moved() {
        let current = make_entries(&["x", "y", "z"]);
        let incoming = make_entries(&["z", "y"]);

        let merged = merge_entries(&current, &incoming, CAPACITY);
        assert_eq!(merged, current);
    }

    #[test]
    fn test_truncates_to_capacity() {
        let current: Vec<Entry> = (0..CAPACITY)
            .map(|i| make_entry(&format!("old{i}")))
            .collect();
        let incoming = make_entries(&["new"]);

        let merged = merge_entries(&current, &incoming, CAPACITY);
        assert_eq!(merged.len(), CAPACITY);
        assert_eq!(merged[0].word, "new");
        assert_eq!(merged[CAPACITY - 1].word, format!("old{}", CAPACITY - 2));
    }

    #[test]
    fn test_empty_batch_changes_nothing() {
        let current = make_entries(&["x", "y"]);
        assert_eq!(merge_entries(&current, &[], CAPACITY), current);
    }

    #[test]
    fn test_same_word_different_date_is_new() {
        let current = make_entries(&["x"]);
        let mut later = make_entry("x");
        later.date = NaiveDate::from_ymd_opt(2024, 1, 6).unwrap();

        let merged = merge_entries(&current, &[later.clone()], CAPACITY);
        assert_eq!(merged, vec![later, make_entry("x")]);
    }

    #[test]
    fn test_known_tail_entry_pushed_out_returns_on_next_merge() {
        let current: Vec<Entry> = (0..CAPACITY)
            .map(|i| make_entry(&format!("old{i}")))
            .collect();
        let tail = current[CAPACITY - 1].clone();
        let incoming = vec![make_entry("new"), tail.clone()];

        let once = merge_entries(&current, &incoming, CAPACITY);
        assert!(!once.contains(&tail));

        let twice = merge_entries(&once, &incoming, CAPACITY);
        assert_eq!(twice[1], tail);
    }

    #[test]
    fn test_merge_is_idempotent() {
        // Vocabulary below capacity: nothing a batch knows about can be cut.
        let mut list = Vec::new();
        for batch in batches(40) {
            let once = merge_entries(&list, &batch, CAPACITY);
            let twice = merge_entries(&once, &batch, CAPACITY);
            assert_eq!(once, twice);
            list = once;
        }
    }

    #[test]
    fn test_merged_lists_are_bounded_and_unique() {
        let mut list = Vec::new();
        for batch in batches(120) {
            list = merge_entries(&list, &batch, CAPACITY);
            assert!(list.len() <= CAPACITY);
            for (i, a) in list.iter().enumerate() {
                assert!(!list[i + 1..].contains(a), "duplicate {}", a.word);
            }
        }
    }
}
