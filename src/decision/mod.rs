//! Governance decision records
//!
//! Defines the decision data model shared by the view pipeline, the review
//! desk, and the decision feeds. Records arrive in a field-optional wire
//! form (`RawDecision`) and are screened into validated `DecisionRecord`s.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a governance decision
///
/// Sort rank follows the lifecycle: pending work surfaces first in
/// ascending order, executed decisions last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionStatus {
    /// Awaiting approval
    Pending,
    /// Approved but not yet executed
    Approved,
    /// Rejected by a reviewer
    Rejected,
    /// Approved and carried out
    Executed,
}

impl DecisionStatus {
    /// Fixed sort rank: pending < approved < rejected < executed
    pub fn rank(&self) -> u8 {
        match self {
            DecisionStatus::Pending => 0,
            DecisionStatus::Approved => 1,
            DecisionStatus::Rejected => 2,
            DecisionStatus::Executed => 3,
        }
    }

    /// Badge style token for rendering, one per status
    pub fn badge(&self) -> &'static str {
        match self {
            DecisionStatus::Pending => "warning",
            DecisionStatus::Approved => "success",
            DecisionStatus::Rejected => "danger",
            DecisionStatus::Executed => "info",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionStatus::Pending => "pending",
            DecisionStatus::Approved => "approved",
            DecisionStatus::Rejected => "rejected",
            DecisionStatus::Executed => "executed",
        }
    }
}

impl fmt::Display for DecisionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DecisionStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(DecisionStatus::Pending),
            "approved" => Ok(DecisionStatus::Approved),
            "rejected" => Ok(DecisionStatus::Rejected),
            "executed" => Ok(DecisionStatus::Executed),
            other => Err(format!(
                "unknown status '{}', expected pending|approved|rejected|executed",
                other
            )),
        }
    }
}

/// Priority assigned to a decision
///
/// Sort rank puts the most urgent work first in ascending order:
/// critical < high < medium < low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    /// Fixed sort rank: critical < high < medium < low
    pub fn rank(&self) -> u8 {
        match self {
            Priority::Critical => 0,
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Critical => "critical",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "critical" => Ok(Priority::Critical),
            other => Err(format!(
                "unknown priority '{}', expected low|medium|high|critical",
                other
            )),
        }
    }
}

/// Kind of organization-management action a decision proposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DecisionKind {
    /// Create an organizational unit
    OuCreate,
    /// Attach a policy to an OU or account
    PolicyAttach,
    /// Move an account between OUs
    AccountMove,
    /// Update a service control policy
    ScpUpdate,
}

impl DecisionKind {
    /// Human-readable label, underscores replaced the way the wire form is
    pub fn label(&self) -> &'static str {
        match self {
            DecisionKind::OuCreate => "OU CREATE",
            DecisionKind::PolicyAttach => "POLICY ATTACH",
            DecisionKind::AccountMove => "ACCOUNT MOVE",
            DecisionKind::ScpUpdate => "SCP UPDATE",
        }
    }
}

impl FromStr for DecisionKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "OU_CREATE" => Ok(DecisionKind::OuCreate),
            "POLICY_ATTACH" => Ok(DecisionKind::PolicyAttach),
            "ACCOUNT_MOVE" => Ok(DecisionKind::AccountMove),
            "SCP_UPDATE" => Ok(DecisionKind::ScpUpdate),
            other => Err(format!("unknown decision kind '{}'", other)),
        }
    }
}

/// A validated governance decision
///
/// The view pipeline never mutates records, it only derives views over them.
/// `id` is unique within a snapshot (screening keeps the first occurrence).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionRecord {
    /// Unique identifier, stable sort and lookup key
    pub id: String,

    /// Display title, primary search target
    pub title: String,

    /// Optional longer description, secondary search target
    pub description: Option<String>,

    /// Lifecycle status
    pub status: DecisionStatus,

    /// Optional priority
    pub priority: Option<Priority>,

    /// Optional action kind
    pub kind: Option<DecisionKind>,

    /// Creation instant, used for chronological sort
    pub created_at: Option<DateTime<Utc>>,

    /// Agent confidence in [0, 1], display only
    pub confidence: Option<f32>,

    /// Approvals required before execution, display only
    pub required_approvals: Option<u32>,

    /// Approvals received so far, display only
    pub received_approvals: Option<u32>,
}

/// Wire form of a decision as supplied by a feed
///
/// Every required field is optional here so that one malformed record can be
/// screened out without failing deserialization of the whole collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawDecision {
    pub id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(alias = "timestamp")]
    pub created_at: Option<String>,
    pub confidence: Option<f32>,
    pub required_approvals: Option<u32>,
    pub received_approvals: Option<u32>,
}

impl RawDecision {
    /// Validate the wire form into a `DecisionRecord`
    ///
    /// Returns `None` when `id`, `title`, or `status` is missing or the
    /// status value is not in the closed set. Optional fields degrade
    /// instead: an unknown priority or kind becomes `None`, an unparseable
    /// timestamp becomes `None` and the record sorts after dated ones.
    pub fn validate(self) -> Option<DecisionRecord> {
        let id = self.id?;
        let title = self.title?;
        let status = match self.status.as_deref().map(DecisionStatus::from_str) {
            Some(Ok(status)) => status,
            _ => {
                tracing::debug!(id = %id, "excluding record with missing or unknown status");
                return None;
            }
        };

        let priority = self.priority.as_deref().and_then(|p| {
            Priority::from_str(p)
                .map_err(|e| tracing::debug!(id = %id, "{}", e))
                .ok()
        });
        let kind = self.kind.as_deref().and_then(|k| {
            DecisionKind::from_str(k)
                .map_err(|e| tracing::debug!(id = %id, "{}", e))
                .ok()
        });
        let created_at = self.created_at.as_deref().and_then(|ts| {
            DateTime::parse_from_rfc3339(ts)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|_| tracing::debug!(id = %id, timestamp = %ts, "unparseable timestamp"))
                .ok()
        });
        let confidence = self.confidence.map(|c| c.clamp(0.0, 1.0));

        Some(DecisionRecord {
            id,
            title,
            description: self.description,
            status,
            priority,
            kind,
            created_at,
            confidence,
            required_approvals: self.required_approvals,
            received_approvals: self.received_approvals,
        })
    }
}

impl From<DecisionRecord> for RawDecision {
    fn from(record: DecisionRecord) -> Self {
        RawDecision {
            id: Some(record.id),
            title: Some(record.title),
            description: record.description,
            status: Some(record.status.as_str().to_string()),
            priority: record.priority.map(|p| p.as_str().to_string()),
            kind: record.kind.map(|k| {
                match k {
                    DecisionKind::OuCreate => "OU_CREATE",
                    DecisionKind::PolicyAttach => "POLICY_ATTACH",
                    DecisionKind::AccountMove => "ACCOUNT_MOVE",
                    DecisionKind::ScpUpdate => "SCP_UPDATE",
                }
                .to_string()
            }),
            created_at: record.created_at.map(|dt| dt.to_rfc3339()),
            confidence: record.confidence,
            required_approvals: record.required_approvals,
            received_approvals: record.received_approvals,
        }
    }
}
