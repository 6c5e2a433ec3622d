// In-memory feed seeded with demonstration decisions
use crate::actions::ActionIntent;
use crate::decision::RawDecision;
use crate::error::{Result, StewardError};
use crate::source::DecisionFeed;

/// Feed backed by an in-memory collection
///
/// Used by the demo commands and by tests. Submitted intents mutate the
/// internal store so a later fetch reflects the action, mirroring how a real
/// feed reconciles state. A one-shot failure can be armed to exercise the
/// caller's error and retry surface.
pub struct MockFeed {
    records: Vec<RawDecision>,
    fail_next: Option<String>,
}

impl MockFeed {
    /// Empty feed
    pub fn new(records: Vec<RawDecision>) -> Self {
        Self {
            records,
            fail_next: None,
        }
    }

    /// Feed seeded with the demonstration decision queue
    pub fn seeded() -> Self {
        Self::new(seed_records())
    }

    /// Arm a failure for the next fetch, consumed once
    pub fn arm_failure(&mut self, message: impl Into<String>) {
        self.fail_next = Some(message.into());
    }
}

impl DecisionFeed for MockFeed {
    fn fetch(&mut self) -> Result<Vec<RawDecision>> {
        if let Some(message) = self.fail_next.take() {
            return Err(StewardError::Feed(message));
        }
        Ok(self.records.clone())
    }

    fn submit(&mut self, intent: &ActionIntent) -> Result<()> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id.as_deref() == Some(intent.id.as_str()))
            .ok_or_else(|| StewardError::DecisionNotFound {
                id: intent.id.clone(),
            })?;

        record.status = Some(intent.target_status().as_str().to_string());
        Ok(())
    }

    fn describe(&self) -> String {
        format!("mock feed ({} records)", self.records.len())
    }
}

fn seed(
    id: &str,
    title: &str,
    description: &str,
    kind: &str,
    status: &str,
    created_at: &str,
    confidence: f32,
    required: u32,
    received: u32,
) -> RawDecision {
    RawDecision {
        id: Some(id.to_string()),
        title: Some(title.to_string()),
        description: Some(description.to_string()),
        status: Some(status.to_string()),
        priority: None,
        kind: Some(kind.to_string()),
        created_at: Some(created_at.to_string()),
        confidence: Some(confidence),
        required_approvals: Some(required),
        received_approvals: Some(received),
    }
}

/// Demonstration decision queue
fn seed_records() -> Vec<RawDecision> {
    vec![
        seed(
            "dec-001",
            "Create Production OU under Workloads",
            "Create a new Organizational Unit for production workloads",
            "OU_CREATE",
            "pending",
            "2024-01-15T10:30:00Z",
            0.98,
            2,
            1,
        ),
        seed(
            "dec-002",
            "Attach DenyUnauthorizedRegions SCP",
            "Attach DenyUnauthorizedRegions SCP to production OU",
            "POLICY_ATTACH",
            "pending",
            "2024-01-15T09:15:00Z",
            0.95,
            1,
            0,
        ),
        seed(
            "dec-003",
            "Move AWS-Prod-001 to Production OU",
            "Move AWS-Prod-001 to Production OU",
            "ACCOUNT_MOVE",
            "approved",
            "2024-01-14T15:20:00Z",
            0.92,
            1,
            1,
        ),
    ]
}
