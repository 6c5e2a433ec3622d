// Shared types for the decision view pipeline
use crate::decision::{DecisionRecord, DecisionStatus, Priority};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Default number of rows per page when the caller does not choose one
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Sort key for the decision table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Case-insensitive lexicographic by title
    Title,
    /// Chronological by creation instant, undated records last
    CreatedAt,
    /// Fixed status rank: pending < approved < rejected < executed
    Status,
    /// Fixed priority rank: critical < high < medium < low, unset last
    Priority,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "title" => Ok(SortKey::Title),
            "created" | "created_at" | "createdat" => Ok(SortKey::CreatedAt),
            "status" => Ok(SortKey::Status),
            "priority" => Ok(SortKey::Priority),
            other => Err(format!(
                "unknown sort key '{}', expected title|created|status|priority",
                other
            )),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            other => Err(format!(
                "unknown sort direction '{}', expected asc|desc",
                other
            )),
        }
    }
}

/// Caller-owned filter, sort, and pagination selections
///
/// The pipeline holds no state between calls; the presentation layer owns a
/// `ViewState` and passes it in on every computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewState {
    /// Retain only this status, `None` means all
    pub status: Option<DecisionStatus>,

    /// Retain only this priority, `None` means all
    pub priority: Option<Priority>,

    /// Free-text search term, matched case-insensitively against title and
    /// description; empty or whitespace-only means no filter
    pub search: String,

    pub sort_key: SortKey,
    pub sort_direction: SortDirection,

    /// 1-based page index
    pub page: usize,

    /// Rows per page, must be positive
    pub page_size: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            status: None,
            priority: None,
            search: String::new(),
            sort_key: SortKey::CreatedAt,
            sort_direction: SortDirection::Descending,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One computed page of the decision table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionPage {
    /// Records on the requested page, filtered and sorted
    pub rows: Vec<DecisionRecord>,

    /// Number of records matching the filters, across all pages
    pub total_matched: usize,

    /// Number of pages, at least 1 even with zero matches
    pub total_pages: usize,
}

impl DecisionPage {
    /// True when the filters matched nothing
    ///
    /// An empty result is a valid terminal state, not an error; callers
    /// render an explicit empty-state message for it.
    pub fn is_empty(&self) -> bool {
        self.total_matched == 0
    }
}

/// Screening output: validated records plus the exclusion count
#[derive(Debug, Clone, Default)]
pub struct Screened {
    /// Records that passed validation, first occurrence per id
    pub records: Vec<DecisionRecord>,

    /// Count of malformed or duplicate-id records excluded, surfaced to the
    /// caller for diagnostics
    pub excluded: usize,
}
