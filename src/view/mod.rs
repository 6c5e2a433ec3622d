// Decision view pipeline
//
// Screening: drop malformed records, count them
// Filtering: status AND priority AND search term
// Sorting:   stable, fixed rank tables, id tie-break
// Paging:    1-based, clamped past the end

mod filter;
mod paginate;
mod screen;
mod sort;
mod types;

pub use filter::{apply_filters, matches};
pub use paginate::total_pages;
pub use screen::screen;
pub use sort::sort_records;
pub use types::{
    DecisionPage, Screened, SortDirection, SortKey, ViewState, DEFAULT_PAGE_SIZE,
};

use crate::decision::DecisionRecord;
use crate::error::{Result, StewardError};

/// Compute the ordered, paginated view over a snapshot of records
///
/// Pure and deterministic: identical `(records, state)` always yields the
/// identical page, and the input records are never mutated. Callers may
/// re-invoke on every input event without coordination.
pub fn compute_view(records: &[DecisionRecord], state: &ViewState) -> Result<DecisionPage> {
    if state.page_size == 0 {
        return Err(StewardError::InvalidViewState(
            "page_size must be positive".to_string(),
        ));
    }
    if state.page == 0 {
        return Err(StewardError::InvalidViewState(
            "page index is 1-based".to_string(),
        ));
    }

    let mut matched = apply_filters(records, state);
    let total_matched = matched.len();

    sort_records(&mut matched, state.sort_key, state.sort_direction);

    let total_pages = total_pages(total_matched, state.page_size);
    let rows = paginate::paginate(&matched, state.page, state.page_size);

    Ok(DecisionPage {
        rows,
        total_matched,
        total_pages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::{DecisionStatus, RawDecision};

    fn two_records() -> Vec<DecisionRecord> {
        screen(vec![
            RawDecision {
                id: Some("1".to_string()),
                title: Some("Create New Account".to_string()),
                status: Some("pending".to_string()),
                created_at: Some("2026-01-30T10:00:00Z".to_string()),
                ..Default::default()
            },
            RawDecision {
                id: Some("2".to_string()),
                title: Some("Apply Security Policy".to_string()),
                status: Some("approved".to_string()),
                created_at: Some("2026-01-30T09:00:00Z".to_string()),
                ..Default::default()
            },
        ])
        .records
    }

    #[test]
    fn test_status_filter_scenario() {
        let records = two_records();
        let state = ViewState {
            status: Some(DecisionStatus::Pending),
            ..Default::default()
        };

        let page = compute_view(&records, &state).unwrap();
        assert_eq!(page.total_matched, 1);
        assert_eq!(page.rows[0].title, "Create New Account");
    }

    #[test]
    fn test_search_scenario() {
        let records = two_records();
        let state = ViewState {
            search: "Security".to_string(),
            ..Default::default()
        };

        let page = compute_view(&records, &state).unwrap();
        assert_eq!(page.total_matched, 1);
        assert_eq!(page.rows[0].title, "Apply Security Policy");
    }

    #[test]
    fn test_title_sort_scenario() {
        let records = two_records();
        let state = ViewState {
            sort_key: SortKey::Title,
            sort_direction: SortDirection::Ascending,
            ..Default::default()
        };

        let page = compute_view(&records, &state).unwrap();
        let titles: Vec<&str> = page.rows.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Apply Security Policy", "Create New Account"]);
    }

    #[test]
    fn test_empty_snapshot() {
        let page = compute_view(&[], &ViewState::default()).unwrap();
        assert!(page.rows.is_empty());
        assert_eq!(page.total_matched, 0);
        assert_eq!(page.total_pages, 1);
        assert!(page.is_empty());
    }

    #[test]
    fn test_invalid_view_state() {
        let records = two_records();

        let zero_page_size = ViewState {
            page_size: 0,
            ..Default::default()
        };
        assert!(compute_view(&records, &zero_page_size).is_err());

        let zero_page = ViewState {
            page: 0,
            ..Default::default()
        };
        assert!(compute_view(&records, &zero_page).is_err());
    }

    #[test]
    fn test_determinism() {
        let records = two_records();
        let state = ViewState {
            search: "policy".to_string(),
            sort_key: SortKey::Title,
            ..Default::default()
        };

        let first = compute_view(&records, &state).unwrap();
        let second = compute_view(&records, &state).unwrap();
        assert_eq!(first.total_matched, second.total_matched);
        assert_eq!(first.total_pages, second.total_pages);
        let first_ids: Vec<&str> = first.rows.iter().map(|r| r.id.as_str()).collect();
        let second_ids: Vec<&str> = second.rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(first_ids, second_ids);
    }
}
