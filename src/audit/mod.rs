//! Audit trail
//!
//! Records reviewer actions and feed refreshes so the trail page can show
//! recent events and summary stats. The trail is bounded in memory and can
//! be persisted as a JSON file under the data directory.

use crate::actions::ActionKind;
use crate::error::{Result, StewardError};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

/// What happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditAction {
    /// A decision was approved
    Approved,
    /// A decision was rejected
    Rejected,
    /// The snapshot was refreshed from the feed
    Refreshed,
}

impl AuditAction {
    pub fn label(&self) -> &'static str {
        match self {
            AuditAction::Approved => "Approved decision",
            AuditAction::Rejected => "Rejected decision",
            AuditAction::Refreshed => "Refreshed snapshot",
        }
    }
}

impl From<ActionKind> for AuditAction {
    fn from(kind: ActionKind) -> Self {
        match kind {
            ActionKind::Approve => AuditAction::Approved,
            ActionKind::Reject => AuditAction::Rejected,
        }
    }
}

/// One audit event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    pub id: Uuid,
    pub at: DateTime<Utc>,
    pub action: AuditAction,
    /// Decision id or a short free-form note
    pub detail: String,
}

/// Bounded in-memory audit trail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditTrail {
    events: Vec<AuditEvent>,
    max_events: usize,
}

/// Summary statistics over the trail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditStats {
    pub total_events: usize,
    pub approvals: usize,
    pub rejections: usize,
    /// Approvals over all reviewer actions, 0.0 when there are none
    pub approval_rate: f32,
    /// Events recorded in the last 24 hours
    pub last_24h: usize,
}

impl AuditTrail {
    pub fn new(max_events: usize) -> Self {
        Self {
            events: Vec::new(),
            max_events,
        }
    }

    /// Append an event, dropping the oldest past the bound
    pub fn record(&mut self, action: AuditAction, detail: impl Into<String>) {
        self.events.push(AuditEvent {
            id: Uuid::new_v4(),
            at: Utc::now(),
            action,
            detail: detail.into(),
        });
        if self.events.len() > self.max_events {
            let excess = self.events.len() - self.max_events;
            self.events.drain(..excess);
        }
    }

    /// Most recent events first
    pub fn recent(&self, limit: usize) -> Vec<&AuditEvent> {
        self.events.iter().rev().take(limit).collect()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Summary statistics for the stats cards
    pub fn stats(&self) -> AuditStats {
        let approvals = self
            .events
            .iter()
            .filter(|e| e.action == AuditAction::Approved)
            .count();
        let rejections = self
            .events
            .iter()
            .filter(|e| e.action == AuditAction::Rejected)
            .count();
        let reviewed = approvals + rejections;
        let approval_rate = if reviewed == 0 {
            0.0
        } else {
            approvals as f32 / reviewed as f32
        };
        let cutoff = Utc::now() - Duration::hours(24);
        let last_24h = self.events.iter().filter(|e| e.at > cutoff).count();

        AuditStats {
            total_events: self.events.len(),
            approvals,
            rejections,
            approval_rate,
            last_24h,
        }
    }

    /// Save the trail to a JSON file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StewardError::Io {
                source: e,
                context: format!("Failed to create audit directory: {}", parent.display()),
            })?;
        }
        let content = serde_json::to_string_pretty(self).map_err(|e| StewardError::Json {
            source: e,
            context: "Failed to serialize audit trail".to_string(),
        })?;
        std::fs::write(path, content).map_err(|e| StewardError::Io {
            source: e,
            context: format!("Failed to write audit trail: {}", path.display()),
        })
    }

    /// Load a trail from a JSON file, empty when the file does not exist
    pub fn load(path: &Path, max_events: usize) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new(max_events));
        }
        let content = std::fs::read_to_string(path).map_err(|e| StewardError::Io {
            source: e,
            context: format!("Failed to read audit trail: {}", path.display()),
        })?;
        let mut trail: AuditTrail =
            serde_json::from_str(&content).map_err(|e| StewardError::Json {
                source: e,
                context: format!("Failed to parse audit trail: {}", path.display()),
            })?;
        trail.max_events = max_events;
        Ok(trail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_record_and_recent() {
        let mut trail = AuditTrail::new(100);
        trail.record(AuditAction::Approved, "dec-001");
        trail.record(AuditAction::Rejected, "dec-002");

        let recent = trail.recent(10);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].detail, "dec-002");
    }

    #[test]
    fn test_bound_drops_oldest() {
        let mut trail = AuditTrail::new(3);
        for i in 0..5 {
            trail.record(AuditAction::Approved, format!("dec-{:03}", i));
        }
        assert_eq!(trail.len(), 3);
        assert_eq!(trail.recent(1)[0].detail, "dec-004");
    }

    #[test]
    fn test_stats() {
        let mut trail = AuditTrail::new(100);
        trail.record(AuditAction::Approved, "dec-001");
        trail.record(AuditAction::Approved, "dec-002");
        trail.record(AuditAction::Rejected, "dec-003");
        trail.record(AuditAction::Refreshed, "feed");

        let stats = trail.stats();
        assert_eq!(stats.total_events, 4);
        assert_eq!(stats.approvals, 2);
        assert_eq!(stats.rejections, 1);
        assert!((stats.approval_rate - 2.0 / 3.0).abs() < 1e-6);
        assert_eq!(stats.last_24h, 4);
    }

    #[test]
    fn test_stats_with_no_reviews() {
        let trail = AuditTrail::new(100);
        assert_eq!(trail.stats().approval_rate, 0.0);
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("audit").join("trail.json");

        let mut trail = AuditTrail::new(100);
        trail.record(AuditAction::Approved, "dec-001");
        trail.save(&path).unwrap();

        let loaded = AuditTrail::load(&path, 100).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.recent(1)[0].detail, "dec-001");
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let trail = AuditTrail::load(&dir.path().join("absent.json"), 50).unwrap();
        assert!(trail.is_empty());
    }
}
