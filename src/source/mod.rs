//! Decision feeds
//!
//! A feed is the collaborator that owns the authoritative decision
//! collection. It hands the desk an immutable snapshot on each fetch and
//! accepts approve/reject intents; the desk never mutates records itself.

use crate::actions::ActionIntent;
use crate::decision::RawDecision;
use crate::error::{Result, StewardError};
use std::path::PathBuf;

mod mock;

pub use mock::MockFeed;

/// Trait for decision feeds
///
/// Allows abstraction over where decisions come from (in-memory seed data,
/// a snapshot file, a remote service behind one of these).
pub trait DecisionFeed {
    /// Fetch a fresh snapshot of all decisions in wire form
    fn fetch(&mut self) -> Result<Vec<RawDecision>>;

    /// Apply an approve/reject intent to the authoritative collection
    fn submit(&mut self, intent: &ActionIntent) -> Result<()>;

    /// Short human-readable description for status output
    fn describe(&self) -> String;
}

/// Feed backed by a JSON snapshot file
///
/// The file holds a pretty-printed array of wire-form records. Submitting an
/// intent rewrites the file with the new status, so the next fetch reflects
/// the action.
pub struct FileFeed {
    path: PathBuf,
}

impl FileFeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> Result<Vec<RawDecision>> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| StewardError::Io {
            source: e,
            context: format!("Failed to read snapshot file: {}", self.path.display()),
        })?;
        serde_json::from_str(&content).map_err(|e| StewardError::Json {
            source: e,
            context: format!("Failed to parse snapshot file: {}", self.path.display()),
        })
    }

    fn store(&self, records: &[RawDecision]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StewardError::Io {
                source: e,
                context: format!("Failed to create snapshot directory: {}", parent.display()),
            })?;
        }
        let content = serde_json::to_string_pretty(records).map_err(|e| StewardError::Json {
            source: e,
            context: "Failed to serialize snapshot".to_string(),
        })?;
        std::fs::write(&self.path, content).map_err(|e| StewardError::Io {
            source: e,
            context: format!("Failed to write snapshot file: {}", self.path.display()),
        })
    }
}

impl DecisionFeed for FileFeed {
    fn fetch(&mut self) -> Result<Vec<RawDecision>> {
        self.load()
    }

    fn submit(&mut self, intent: &ActionIntent) -> Result<()> {
        let mut records = self.load()?;

        let record = records
            .iter_mut()
            .find(|r| r.id.as_deref() == Some(intent.id.as_str()))
            .ok_or_else(|| StewardError::DecisionNotFound {
                id: intent.id.clone(),
            })?;

        record.status = Some(intent.target_status().as_str().to_string());
        self.store(&records)
    }

    fn describe(&self) -> String {
        format!("file feed ({})", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{ActionIntent, ActionKind};
    use tempfile::TempDir;

    fn seed_file(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("decisions.json");
        let records = vec![RawDecision {
            id: Some("dec-001".to_string()),
            title: Some("Create Production OU".to_string()),
            status: Some("pending".to_string()),
            ..Default::default()
        }];
        std::fs::write(&path, serde_json::to_string_pretty(&records).unwrap()).unwrap();
        path
    }

    #[test]
    fn test_file_feed_fetch() {
        let dir = TempDir::new().unwrap();
        let mut feed = FileFeed::new(seed_file(&dir));

        let records = feed.fetch().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id.as_deref(), Some("dec-001"));
    }

    #[test]
    fn test_file_feed_submit_persists_status() {
        let dir = TempDir::new().unwrap();
        let mut feed = FileFeed::new(seed_file(&dir));

        let intent = ActionIntent::new("dec-001", ActionKind::Approve);
        feed.submit(&intent).unwrap();

        let records = feed.fetch().unwrap();
        assert_eq!(records[0].status.as_deref(), Some("approved"));
    }

    #[test]
    fn test_file_feed_submit_unknown_id() {
        let dir = TempDir::new().unwrap();
        let mut feed = FileFeed::new(seed_file(&dir));

        let intent = ActionIntent::new("dec-404", ActionKind::Reject);
        assert!(matches!(
            feed.submit(&intent),
            Err(StewardError::DecisionNotFound { .. })
        ));
    }

    #[test]
    fn test_file_feed_missing_file() {
        let dir = TempDir::new().unwrap();
        let mut feed = FileFeed::new(dir.path().join("absent.json"));
        assert!(feed.fetch().is_err());
    }
}
