//! Snapshot persistence for watched items.
//!
//! Each watch keeps one snapshot: a JSON array of records, newest scrape
//! first, capped at the watch's retention limit.
//!
//! ```text
//! data/
//! ├── config.toml
//! ├── jobs.json             # job postings snapshot (max 200)
//! └── toss_articles.json    # blog snapshot (max 100)
//! ```

pub mod local;

use std::collections::HashSet;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::Record;

// Re-export for convenience
pub use local::LocalStorage;

/// Trait for snapshot storage backends.
#[async_trait]
pub trait SnapshotStorage: Send + Sync {
    /// Load the previous snapshot.
    ///
    /// A missing or unreadable snapshot is "no history" and yields an empty
    /// list; this never fails.
    async fn load(&self) -> Vec<Record>;

    /// Replace the stored snapshot with `records`.
    async fn save(&self, records: &[Record]) -> Result<()>;

    /// Human-readable location, for logging.
    fn location(&self) -> String;
}

/// Merge the latest scrape with the stored history.
///
/// The result is `current` as given, followed by every `previous` record whose
/// link does not appear in `current` (in their stored order), truncated to
/// the first `limit` entries. `current` is expected to be de-duplicated
/// already.
pub fn merge(current: &[Record], previous: &[Record], limit: usize) -> Vec<Record> {
    let current_links: HashSet<&str> = current.iter().map(|r| r.link.as_str()).collect();

    current
        .iter()
        .chain(
            previous
                .iter()
                .filter(|r| !current_links.contains(r.link.as_str())),
        )
        .take(limit)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::deduplicate;

    fn rec(link: &str) -> Record {
        Record::new(
            format!("title {link}"),
            link,
            "test",
            "2026-02-12T00:00:00",
        )
    }

    fn links(records: &[Record]) -> Vec<&str> {
        records.iter().map(|r| r.link.as_str()).collect()
    }

    #[test]
    fn test_merge_current_first_then_history() {
        let previous = vec![rec("A"), rec("B")];
        let current = deduplicate(vec![rec("B"), rec("B"), rec("C")]);

        let merged = merge(&current, &previous, 10);
        assert_eq!(links(&merged), vec!["B", "C", "A"]);
    }

    #[test]
    fn test_merge_truncates_oldest() {
        let previous = vec![rec("A"), rec("B")];
        let current = deduplicate(vec![rec("B"), rec("B"), rec("C")]);

        let merged = merge(&current, &previous, 2);
        assert_eq!(links(&merged), vec!["B", "C"]);
    }

    #[test]
    fn test_merge_prefers_current_version() {
        let mut old = rec("A");
        old.title = "old title".into();
        let mut new = rec("A");
        new.title = "new title".into();

        let merged = merge(&[new], &[old], 10);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].title, "new title");
    }

    #[test]
    fn test_merge_preserves_history_order() {
        let previous = vec![rec("D"), rec("A"), rec("E"), rec("B")];
        let merged = merge(&[rec("A")], &previous, 10);
        assert_eq!(links(&merged), vec!["A", "D", "E", "B"]);
    }

    #[test]
    fn test_merge_limit_shorter_than_current() {
        let current = vec![rec("A"), rec("B"), rec("C")];
        let merged = merge(&current, &[rec("Z")], 2);
        assert_eq!(links(&merged), vec!["A", "B"]);
    }

    #[test]
    fn test_merge_empty_inputs() {
        assert!(merge(&[], &[], 5).is_empty());
        assert_eq!(links(&merge(&[], &[rec("A")], 5)), vec!["A"]);
        assert!(merge(&[rec("A")], &[], 0).is_empty());
    }

    #[test]
    fn test_merge_links_unique_and_bounded() {
        let previous: Vec<Record> = ["A", "B", "C", "D", "E"].iter().map(|l| rec(l)).collect();
        let current = deduplicate(
            ["E", "F", "A", "F", "G"].iter().map(|l| rec(l)).collect(),
        );

        for limit in 0..12 {
            let merged = merge(&current, &previous, limit);
            assert!(merged.len() <= limit);

            let unique: HashSet<&str> = merged.iter().map(|r| r.link.as_str()).collect();
            assert_eq!(unique.len(), merged.len());

            let head = current.len().min(limit);
            assert_eq!(&merged[..head], &current[..head]);
        }
    }
}
