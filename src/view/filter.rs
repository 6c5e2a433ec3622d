// Filtering stage: status, priority, and search compose by AND
use crate::decision::DecisionRecord;
use crate::view::ViewState;

/// True when the record satisfies every active filter in the state
pub fn matches(record: &DecisionRecord, state: &ViewState) -> bool {
    if let Some(status) = state.status {
        if record.status != status {
            return false;
        }
    }

    if let Some(priority) = state.priority {
        if record.priority != Some(priority) {
            return false;
        }
    }

    let term = state.search.trim();
    if !term.is_empty() {
        let term = term.to_lowercase();
        let in_title = record.title.to_lowercase().contains(&term);
        let in_description = record
            .description
            .as_deref()
            .map(|d| d.to_lowercase().contains(&term))
            .unwrap_or(false);
        if !in_title && !in_description {
            return false;
        }
    }

    true
}

/// Retain the records matching the state's filters, preserving input order
pub fn apply_filters<'a>(
    records: &'a [DecisionRecord],
    state: &ViewState,
) -> Vec<&'a DecisionRecord> {
    records.iter().filter(|r| matches(r, state)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::{DecisionStatus, Priority, RawDecision};

    fn record(id: &str, title: &str, status: &str, priority: Option<&str>) -> DecisionRecord {
        RawDecision {
            id: Some(id.to_string()),
            title: Some(title.to_string()),
            status: Some(status.to_string()),
            priority: priority.map(String::from),
            ..Default::default()
        }
        .validate()
        .unwrap()
    }

    #[test]
    fn test_no_filters_matches_everything() {
        let r = record("a", "Anything", "pending", None);
        assert!(matches(&r, &ViewState::default()));
    }

    #[test]
    fn test_status_filter() {
        let pending = record("a", "Create New Account", "pending", None);
        let approved = record("b", "Apply Security Policy", "approved", None);

        let state = ViewState {
            status: Some(DecisionStatus::Pending),
            ..Default::default()
        };
        assert!(matches(&pending, &state));
        assert!(!matches(&approved, &state));
    }

    #[test]
    fn test_priority_filter_requires_priority() {
        let critical = record("a", "A", "pending", Some("critical"));
        let unset = record("b", "B", "pending", None);

        let state = ViewState {
            priority: Some(Priority::Critical),
            ..Default::default()
        };
        assert!(matches(&critical, &state));
        assert!(!matches(&unset, &state));
    }

    #[test]
    fn test_filters_compose_with_and() {
        let r = record("a", "Create New Account", "pending", Some("high"));

        let both = ViewState {
            status: Some(DecisionStatus::Pending),
            priority: Some(Priority::High),
            ..Default::default()
        };
        assert!(matches(&r, &both));

        let mismatched = ViewState {
            status: Some(DecisionStatus::Pending),
            priority: Some(Priority::Critical),
            ..Default::default()
        };
        assert!(!matches(&r, &mismatched));
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let r = record("a", "Apply Security Policy", "approved", None);

        for term in ["Security", "security", "SECUR", "policy"] {
            let state = ViewState {
                search: term.to_string(),
                ..Default::default()
            };
            assert!(matches(&r, &state), "term '{}' should match", term);
        }

        let state = ViewState {
            search: "firewall".to_string(),
            ..Default::default()
        };
        assert!(!matches(&r, &state));
    }

    #[test]
    fn test_whitespace_search_is_no_filter() {
        let r = record("a", "Anything", "pending", None);
        let state = ViewState {
            search: "   ".to_string(),
            ..Default::default()
        };
        assert!(matches(&r, &state));
    }

    #[test]
    fn test_search_matches_description() {
        let mut r = record("a", "Move Account", "pending", None);
        r.description = Some("Move AWS-Prod-001 to Production OU".to_string());

        let state = ViewState {
            search: "aws-prod".to_string(),
            ..Default::default()
        };
        assert!(matches(&r, &state));
    }
}
