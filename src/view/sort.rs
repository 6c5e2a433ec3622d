// Sorting stage: stable comparators with an id tie-break
use crate::decision::DecisionRecord;
use crate::view::{SortDirection, SortKey};
use std::cmp::Ordering;

/// Sort records by the requested key
///
/// The direction reverses only the key comparison; ties always break by id
/// ascending, so the resulting order is total and identical across runs.
pub fn sort_records(records: &mut [&DecisionRecord], key: SortKey, direction: SortDirection) {
    records.sort_by(|a, b| {
        let ord = compare_by_key(a, b, key);
        let ord = match direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        };
        ord.then_with(|| a.id.cmp(&b.id))
    });
}

fn compare_by_key(a: &DecisionRecord, b: &DecisionRecord, key: SortKey) -> Ordering {
    match key {
        SortKey::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        SortKey::CreatedAt => match (a.created_at, b.created_at) {
            (Some(a), Some(b)) => a.cmp(&b),
            // undated records sort after dated ones in ascending order
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
        SortKey::Status => a.status.rank().cmp(&b.status.rank()),
        SortKey::Priority => {
            let rank = |r: &DecisionRecord| r.priority.map(|p| p.rank()).unwrap_or(u8::MAX);
            rank(a).cmp(&rank(b))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::RawDecision;

    fn record(id: &str, title: &str, status: &str) -> DecisionRecord {
        RawDecision {
            id: Some(id.to_string()),
            title: Some(title.to_string()),
            status: Some(status.to_string()),
            ..Default::default()
        }
        .validate()
        .unwrap()
    }

    fn ids(records: &[&DecisionRecord]) -> Vec<String> {
        records.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn test_title_sort_is_case_insensitive() {
        let a = record("1", "apply security policy", "pending");
        let b = record("2", "Create New Account", "pending");
        let mut refs = vec![&b, &a];

        sort_records(&mut refs, SortKey::Title, SortDirection::Ascending);
        assert_eq!(ids(&refs), vec!["1", "2"]);
    }

    #[test]
    fn test_descending_reverses_key_not_tie_break() {
        let a = record("1", "Same Title", "pending");
        let b = record("2", "Same Title", "pending");
        let c = record("3", "Other", "pending");
        let mut refs = vec![&b, &c, &a];

        sort_records(&mut refs, SortKey::Title, SortDirection::Descending);
        // "Same Title" > "Other" descending, equal titles tie-break by id ascending
        assert_eq!(ids(&refs), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_created_at_chronological() {
        let mut older = record("1", "Older", "pending");
        older.created_at = "2026-01-30T09:00:00Z".parse().ok();
        let mut newer = record("2", "Newer", "pending");
        newer.created_at = "2026-01-30T10:00:00Z".parse().ok();
        let undated = record("3", "Undated", "pending");

        let mut refs = vec![&undated, &newer, &older];
        sort_records(&mut refs, SortKey::CreatedAt, SortDirection::Ascending);
        assert_eq!(ids(&refs), vec!["1", "2", "3"]);

        let mut refs = vec![&older, &undated, &newer];
        sort_records(&mut refs, SortKey::CreatedAt, SortDirection::Descending);
        assert_eq!(ids(&refs), vec!["3", "2", "1"]);
    }

    #[test]
    fn test_status_sorts_by_rank_not_alphabetically() {
        let approved = record("1", "A", "approved");
        let executed = record("2", "B", "executed");
        let pending = record("3", "C", "pending");
        let rejected = record("4", "D", "rejected");

        let mut refs = vec![&executed, &rejected, &approved, &pending];
        sort_records(&mut refs, SortKey::Status, SortDirection::Ascending);
        // lifecycle order, not "approved" < "executed" < "pending" < "rejected"
        assert_eq!(ids(&refs), vec!["3", "1", "4", "2"]);
    }

    #[test]
    fn test_priority_unset_sorts_last() {
        let mut critical = record("1", "A", "pending");
        critical.priority = "critical".parse().ok();
        let mut low = record("2", "B", "pending");
        low.priority = "low".parse().ok();
        let unset = record("3", "C", "pending");

        let mut refs = vec![&unset, &low, &critical];
        sort_records(&mut refs, SortKey::Priority, SortDirection::Ascending);
        assert_eq!(ids(&refs), vec!["1", "2", "3"]);
    }
}
