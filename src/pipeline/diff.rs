//! New-item detection.
//!
//! Identity is the record's `link`. Two records with the same link are the
//! same item even if their title or company differ, so an edited posting is
//! never reported twice.

use std::collections::HashSet;

use crate::models::Record;

/// Keep the first record for each distinct link, preserving input order.
pub fn deduplicate(records: Vec<Record>) -> Vec<Record> {
    let (_, unique) = records.into_iter().fold(
        (HashSet::new(), Vec::new()),
        |(mut seen, mut unique): (HashSet<String>, Vec<Record>), record| {
            if seen.insert(record.link.clone()) {
                unique.push(record);
            }
            (seen, unique)
        },
    );
    unique
}

/// Records of `current` whose link does not appear in `previous`, in
/// `current` order.
pub fn find_new(current: &[Record], previous: &[Record]) -> Vec<Record> {
    let previous_links: HashSet<&str> = previous.iter().map(|r| r.link.as_str()).collect();

    current
        .iter()
        .filter(|r| !previous_links.contains(r.link.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(link: &str, title: &str) -> Record {
        Record::new(title, link, "test", "2026-02-12T00:00:00")
    }

    fn links(records: &[Record]) -> Vec<&str> {
        records.iter().map(|r| r.link.as_str()).collect()
    }

    #[test]
    fn test_deduplicate_keeps_first_occurrence() {
        let records = vec![
            rec("B", "first B"),
            rec("B", "second B"),
            rec("C", "C"),
            rec("B", "third B"),
        ];

        let unique = deduplicate(records);
        assert_eq!(links(&unique), vec!["B", "C"]);
        assert_eq!(unique[0].title, "first B");
    }

    #[test]
    fn test_deduplicate_is_idempotent() {
        let records = vec![
            rec("A", "1"),
            rec("B", "2"),
            rec("A", "3"),
            rec("C", "4"),
            rec("C", "5"),
        ];

        let once = deduplicate(records);
        let twice = deduplicate(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_deduplicate_is_subsequence() {
        let records = vec![
            rec("X", "1"),
            rec("Y", "2"),
            rec("X", "3"),
            rec("Z", "4"),
            rec("Y", "5"),
        ];

        let unique = deduplicate(records.clone());
        let unique_links: HashSet<&str> = unique.iter().map(|r| r.link.as_str()).collect();
        assert_eq!(unique_links.len(), unique.len());

        let mut rest = records.iter();
        for kept in &unique {
            assert!(rest.any(|r| r == kept));
        }
    }

    #[test]
    fn test_deduplicate_empty() {
        assert!(deduplicate(Vec::new()).is_empty());
    }

    #[test]
    fn test_find_new_against_itself_is_empty() {
        let records = vec![rec("A", "a"), rec("B", "b")];
        assert!(find_new(&records, &records).is_empty());
    }

    #[test]
    fn test_find_new_without_history_returns_all() {
        let records = vec![rec("A", "a"), rec("B", "b"), rec("C", "c")];
        assert_eq!(find_new(&records, &[]), records);
    }

    #[test]
    fn test_find_new_scenario() {
        let previous = vec![rec("A", "a"), rec("B", "b")];
        let current = deduplicate(vec![rec("B", "b"), rec("B", "b"), rec("C", "c")]);

        assert_eq!(links(&current), vec!["B", "C"]);
        assert_eq!(links(&find_new(&current, &previous)), vec!["C"]);
    }

    #[test]
    fn test_find_new_ignores_field_changes() {
        let previous = vec![rec("A", "Backend Engineer")];
        let current = vec![
            rec("A", "Backend Engineer (Payments)").with_field("company", "토스"),
        ];
        assert!(find_new(&current, &previous).is_empty());
    }

    #[test]
    fn test_find_new_preserves_current_order() {
        let previous = vec![rec("B", "b")];
        let current = vec![rec("D", "d"), rec("B", "b"), rec("A", "a"), rec("C", "c")];
        assert_eq!(links(&find_new(&current, &previous)), vec!["D", "A", "C"]);
    }
}
