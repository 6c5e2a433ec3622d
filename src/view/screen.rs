// Screening stage: drop malformed records instead of failing the view
use crate::decision::RawDecision;
use crate::view::Screened;
use ahash::AHashSet;

/// Screen wire-form records into validated ones
///
/// A record missing `id`, `title`, or `status` is a feed defect; the policy
/// is to exclude it and surface the count rather than fail the whole
/// computation. Duplicate ids keep the first occurrence so later stages can
/// rely on id uniqueness.
pub fn screen(raws: impl IntoIterator<Item = RawDecision>) -> Screened {
    let mut seen_ids = AHashSet::new();
    let mut screened = Screened::default();

    for raw in raws {
        match raw.validate() {
            Some(record) => {
                if seen_ids.insert(record.id.clone()) {
                    screened.records.push(record);
                } else {
                    tracing::warn!(id = %record.id, "duplicate decision id, keeping first");
                    screened.excluded += 1;
                }
            }
            None => screened.excluded += 1,
        }
    }

    if screened.excluded > 0 {
        tracing::warn!(
            excluded = screened.excluded,
            kept = screened.records.len(),
            "excluded malformed records from feed"
        );
    }

    screened
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(id: Option<&str>, title: Option<&str>, status: Option<&str>) -> RawDecision {
        RawDecision {
            id: id.map(String::from),
            title: title.map(String::from),
            status: status.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_screen_keeps_valid_records() {
        let screened = screen(vec![
            raw(Some("a"), Some("A"), Some("pending")),
            raw(Some("b"), Some("B"), Some("approved")),
        ]);
        assert_eq!(screened.records.len(), 2);
        assert_eq!(screened.excluded, 0);
    }

    #[test]
    fn test_screen_counts_malformed() {
        let screened = screen(vec![
            raw(Some("a"), Some("A"), Some("pending")),
            raw(None, Some("no id"), Some("pending")),
            raw(Some("c"), None, Some("pending")),
            raw(Some("d"), Some("bad status"), Some("wat")),
        ]);
        assert_eq!(screened.records.len(), 1);
        assert_eq!(screened.excluded, 3);
    }

    #[test]
    fn test_screen_deduplicates_ids() {
        let screened = screen(vec![
            raw(Some("a"), Some("first"), Some("pending")),
            raw(Some("a"), Some("second"), Some("approved")),
        ]);
        assert_eq!(screened.records.len(), 1);
        assert_eq!(screened.records[0].title, "first");
        assert_eq!(screened.excluded, 1);
    }

    #[test]
    fn test_screen_empty_input() {
        let screened = screen(Vec::new());
        assert!(screened.records.is_empty());
        assert_eq!(screened.excluded, 0);
    }
}
