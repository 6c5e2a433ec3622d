//! Review desk
//!
//! Owns the last-known snapshot and coordinates the feed, the view
//! pipeline, and the audit trail. The desk is advisory over its snapshot:
//! approve/reject validate locally, the feed applies the change, and the
//! snapshot is refreshed from the feed rather than patched in place.

use crate::actions::{validate_action, ActionIntent, ActionKind};
use crate::audit::{AuditAction, AuditTrail};
use crate::decision::DecisionRecord;
use crate::error::{Result, StewardError};
use crate::metrics::{summarize, MetricCard};
use crate::source::DecisionFeed;
use crate::view::{compute_view, screen, DecisionPage, ViewState};
use chrono::{DateTime, Utc};

/// Point-in-time copy of the decision collection
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    /// Validated records, id-unique
    pub records: Vec<DecisionRecord>,

    /// Malformed records the screening stage excluded
    pub excluded: usize,

    /// When the snapshot was fetched, `None` before the first refresh
    pub fetched_at: Option<DateTime<Utc>>,
}

/// Coordinates feed, view pipeline, and audit trail
pub struct ReviewDesk {
    feed: Box<dyn DecisionFeed>,
    snapshot: Snapshot,
    trail: AuditTrail,

    /// Caller-owned flag: a fetch is in flight somewhere else. Views still
    /// compute from the stale snapshot, actions are refused.
    loading: bool,

    /// Last fetch failure, displayed with a retry affordance
    last_error: Option<String>,
}

impl ReviewDesk {
    pub fn new(feed: Box<dyn DecisionFeed>, trail: AuditTrail) -> Self {
        Self {
            feed,
            snapshot: Snapshot::default(),
            trail,
            loading: false,
            last_error: None,
        }
    }

    /// Pull a fresh snapshot from the feed
    ///
    /// On failure the stale snapshot is kept for display and the error is
    /// stored for the caller to surface; `retry` re-invokes this.
    pub fn refresh(&mut self) -> Result<&Snapshot> {
        match self.feed.fetch() {
            Ok(raws) => {
                let screened = screen(raws);
                self.snapshot = Snapshot {
                    records: screened.records,
                    excluded: screened.excluded,
                    fetched_at: Some(Utc::now()),
                };
                self.last_error = None;
                self.trail
                    .record(AuditAction::Refreshed, self.feed.describe());
                tracing::info!(
                    records = self.snapshot.records.len(),
                    excluded = self.snapshot.excluded,
                    "snapshot refreshed"
                );
                Ok(&self.snapshot)
            }
            Err(e) => {
                let message = e.to_string();
                tracing::warn!(error = %message, "refresh failed, keeping stale snapshot");
                self.last_error = Some(message);
                Err(e)
            }
        }
    }

    /// Re-invoke the fetch after a failure
    pub fn retry(&mut self) -> Result<&Snapshot> {
        self.refresh()
    }

    /// Compute a page over the current snapshot
    ///
    /// Works from the last-known records even while loading, so the caller
    /// can keep rendering stale rows during a refresh.
    pub fn page(&self, state: &ViewState) -> Result<DecisionPage> {
        compute_view(&self.snapshot.records, state)
    }

    /// Approve a pending decision
    pub fn approve(&mut self, id: &str) -> Result<()> {
        self.act(id, ActionKind::Approve)
    }

    /// Reject a pending decision
    pub fn reject(&mut self, id: &str) -> Result<()> {
        self.act(id, ActionKind::Reject)
    }

    fn act(&mut self, id: &str, action: ActionKind) -> Result<()> {
        if self.loading {
            return Err(StewardError::DeskBusy);
        }

        validate_action(&self.snapshot.records, id)?;

        let intent = ActionIntent::new(id, action);
        self.feed.submit(&intent)?;
        self.trail.record(AuditAction::from(action), id);
        tracing::info!(id = %id, action = %action, "action submitted");

        self.refresh()?;
        Ok(())
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Short description of the feed for status output
    pub fn feed_description(&self) -> String {
        self.feed.describe()
    }

    pub fn trail(&self) -> &AuditTrail {
        &self.trail
    }

    pub fn trail_mut(&mut self) -> &mut AuditTrail {
        &mut self.trail
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Dashboard cards for the current snapshot
    pub fn metrics(&self) -> Vec<MetricCard> {
        summarize(
            &self.snapshot.records,
            self.snapshot.excluded,
            &self.trail.stats(),
        )
    }
}
