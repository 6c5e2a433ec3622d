//! Approve/reject action dispatch
//!
//! The review surface is advisory: it checks that an action is valid against
//! the current snapshot, then emits an intent to the feed. The authoritative
//! status lives in the feed, never here.

use crate::decision::{DecisionRecord, DecisionStatus};
use crate::error::{Result, StewardError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reviewer action on a pending decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Approve,
    Reject,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::Approve => f.write_str("approve"),
            ActionKind::Reject => f.write_str("reject"),
        }
    }
}

/// An action notification passed through to the feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionIntent {
    /// Id of the decision acted on
    pub id: String,

    pub action: ActionKind,

    /// When the reviewer issued the action
    pub issued_at: DateTime<Utc>,
}

impl ActionIntent {
    pub fn new(id: impl Into<String>, action: ActionKind) -> Self {
        Self {
            id: id.into(),
            action,
            issued_at: Utc::now(),
        }
    }

    /// Status the decision moves to once the feed accepts the intent
    pub fn target_status(&self) -> DecisionStatus {
        match self.action {
            ActionKind::Approve => DecisionStatus::Approved,
            ActionKind::Reject => DecisionStatus::Rejected,
        }
    }
}

/// Check that an action may be issued against the snapshot
///
/// Only pending decisions can be approved or rejected; anything else is an
/// `InvalidTransition` the caller surfaces as feedback, not a crash.
pub fn validate_action<'a>(
    records: &'a [DecisionRecord],
    id: &str,
) -> Result<&'a DecisionRecord> {
    let record = records
        .iter()
        .find(|r| r.id == id)
        .ok_or_else(|| StewardError::DecisionNotFound { id: id.to_string() })?;

    if record.status != DecisionStatus::Pending {
        return Err(StewardError::InvalidTransition {
            id: id.to_string(),
            status: record.status,
        });
    }

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::RawDecision;

    fn record(id: &str, status: &str) -> DecisionRecord {
        RawDecision {
            id: Some(id.to_string()),
            title: Some("Title".to_string()),
            status: Some(status.to_string()),
            ..Default::default()
        }
        .validate()
        .unwrap()
    }

    #[test]
    fn test_pending_decision_can_be_acted_on() {
        let records = vec![record("dec-001", "pending")];
        assert!(validate_action(&records, "dec-001").is_ok());
    }

    #[test]
    fn test_non_pending_decision_is_invalid_transition() {
        let records = vec![record("dec-001", "approved")];
        match validate_action(&records, "dec-001") {
            Err(StewardError::InvalidTransition { id, status }) => {
                assert_eq!(id, "dec-001");
                assert_eq!(status, DecisionStatus::Approved);
            }
            other => panic!("expected InvalidTransition, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let records = vec![record("dec-001", "pending")];
        assert!(matches!(
            validate_action(&records, "dec-999"),
            Err(StewardError::DecisionNotFound { .. })
        ));
    }

    #[test]
    fn test_intent_target_status() {
        assert_eq!(
            ActionIntent::new("x", ActionKind::Approve).target_status(),
            DecisionStatus::Approved
        );
        assert_eq!(
            ActionIntent::new("x", ActionKind::Reject).target_status(),
            DecisionStatus::Rejected
        );
    }
}
