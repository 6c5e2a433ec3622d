//! Dashboard metric cards
//!
//! Display-only summary cards derived from the current snapshot and the
//! audit trail. Computed on demand, never stored.

use crate::audit::AuditStats;
use crate::decision::{DecisionRecord, DecisionStatus};
use serde::{Deserialize, Serialize};

/// Direction of change since the last look
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

impl Trend {
    pub fn marker(&self) -> &'static str {
        match self {
            Trend::Up => "+",
            Trend::Down => "-",
            Trend::Neutral => "=",
        }
    }
}

/// One stat card on the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricCard {
    pub title: String,
    pub value: String,
    /// Short change note, e.g. "2 awaiting review"
    pub change: Option<String>,
    pub trend: Trend,
}

impl MetricCard {
    fn new(title: &str, value: impl Into<String>, change: Option<String>, trend: Trend) -> Self {
        Self {
            title: title.to_string(),
            value: value.into(),
            change,
            trend,
        }
    }
}

/// Derive the dashboard cards from a snapshot and the audit stats
pub fn summarize(
    records: &[DecisionRecord],
    excluded: usize,
    stats: &AuditStats,
) -> Vec<MetricCard> {
    let pending = records
        .iter()
        .filter(|r| r.status == DecisionStatus::Pending)
        .count();
    let executed = records
        .iter()
        .filter(|r| r.status == DecisionStatus::Executed)
        .count();

    let mut cards = vec![
        MetricCard::new(
            "Decision Queue",
            records.len().to_string(),
            Some(format!("{} awaiting review", pending)),
            if pending > 0 { Trend::Up } else { Trend::Neutral },
        ),
        MetricCard::new(
            "Executed",
            executed.to_string(),
            None,
            Trend::Neutral,
        ),
        MetricCard::new(
            "Approval Rate",
            format!("{:.1}%", stats.approval_rate * 100.0),
            Some(format!("{} reviews", stats.approvals + stats.rejections)),
            Trend::Neutral,
        ),
        MetricCard::new(
            "Last 24h Events",
            stats.last_24h.to_string(),
            None,
            Trend::Neutral,
        ),
    ];

    if excluded > 0 {
        cards.push(MetricCard::new(
            "Excluded Records",
            excluded.to_string(),
            Some("malformed feed records".to_string()),
            Trend::Down,
        ));
    }

    cards
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

    fn empty_stats() -> AuditStats {
        AuditStats {
            total_events: 0,
            approvals: 0,
            rejections: 0,
            approval_rate: 0.0,
            last_24h: 0,
        }
    }

    #[test]
    fn test_queue_card_counts_pending() {
        let records = vec![
            record("a", "pending"),
            record("b", "pending"),
            record("c", "approved"),
        ];
        let cards = summarize(&records, 0, &empty_stats());

        let queue = &cards[0];
        assert_eq!(queue.value, "3");
        assert_eq!(queue.change.as_deref(), Some("2 awaiting review"));
        assert_eq!(queue.trend, Trend::Up);
    }

    #[test]
    fn test_excluded_card_only_when_nonzero() {
        let records = vec![record("a", "pending")];
        let without = summarize(&records, 0, &empty_stats());
        assert!(!without.iter().any(|c| c.title == "Excluded Records"));

        let with = summarize(&records, 2, &empty_stats());
        let card = with.iter().find(|c| c.title == "Excluded Records").unwrap();
        assert_eq!(card.value, "2");
    }
}
