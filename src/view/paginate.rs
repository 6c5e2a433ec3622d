// Pagination stage: 1-based pages, clamped past the end
use crate::decision::DecisionRecord;

/// Total page count for a match count, at least 1 even with zero matches
pub fn total_pages(total_matched: usize, page_size: usize) -> usize {
    total_matched.div_ceil(page_size).max(1)
}

/// Slice out the requested page
///
/// A page beyond the last yields an empty slice rather than an error, so a
/// filter change that shrinks the result set never breaks the caller's
/// current page selection.
pub fn paginate(records: &[&DecisionRecord], page: usize, page_size: usize) -> Vec<DecisionRecord> {
    let start = (page - 1).saturating_mul(page_size);
    if start >= records.len() {
        return Vec::new();
    }
    let end = (start + page_size).min(records.len());
    records[start..end].iter().map(|r| (*r).clone()).collect()
}
