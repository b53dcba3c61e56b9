//! Flat-file record store for meetings and action items.
//!
//! Two keyed collections held in memory and mirrored to two JSON array
//! files under the data directory. Iteration order is insertion order, and
//! the files are fully rewritten on every save. There is no transaction
//! across the two files: a crash between the writes can leave them
//! inconsistent, which is within this system's durability bar.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::ToolError;
use crate::models::{ActionItem, MeetingRecord};

const MEETINGS_FILE: &str = "meetings.json";
const ACTIONS_FILE: &str = "actions.json";

/// Owns the meeting and action-item maps; callers never see the raw
/// containers. All mutation goes through insert + save.
pub struct RecordStore {
    data_dir: PathBuf,
    meetings: HashMap<String, MeetingRecord>,
    meeting_order: Vec<String>,
    actions: HashMap<String, ActionItem>,
    action_order: Vec<String>,
}

impl RecordStore {
    /// Create the data directory if needed and load both files. A missing
    /// or unparseable file starts that collection empty; only a directory
    /// that cannot be created is fatal.
    pub fn load(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;

        let mut store = Self {
            data_dir,
            meetings: HashMap::new(),
            meeting_order: Vec::new(),
            actions: HashMap::new(),
            action_order: Vec::new(),
        };

        let meetings: Vec<MeetingRecord> = read_array(&store.data_dir.join(MEETINGS_FILE));
        for record in meetings {
            store.insert_meeting(record);
        }

        let actions: Vec<ActionItem> = read_array(&store.data_dir.join(ACTIONS_FILE));
        for item in actions {
            store.insert_action(item);
        }

        info!(
            "Record store loaded: {} meetings, {} action items",
            store.meeting_order.len(),
            store.action_order.len()
        );
        Ok(store)
    }

    /// Insert a meeting record. Re-inserting an existing id replaces the
    /// value without duplicating its position.
    pub fn insert_meeting(&mut self, record: MeetingRecord) {
        if self.meetings.insert(record.id.clone(), record.clone()).is_none() {
            self.meeting_order.push(record.id);
        }
    }

    /// Insert an action item, same replacement rule as meetings.
    pub fn insert_action(&mut self, item: ActionItem) {
        if self.actions.insert(item.id.clone(), item.clone()).is_none() {
            self.action_order.push(item.id);
        }
    }

    /// Look up one meeting by id.
    pub fn meeting(&self, id: &str) -> Option<&MeetingRecord> {
        self.meetings.get(id)
    }

    /// All meetings in insertion order.
    pub fn meetings(&self) -> Vec<&MeetingRecord> {
        self.meeting_order
            .iter()
            .filter_map(|id| self.meetings.get(id))
            .collect()
    }

    /// All action items in insertion order.
    pub fn action_items(&self) -> Vec<&ActionItem> {
        self.action_order
            .iter()
            .filter_map(|id| self.actions.get(id))
            .collect()
    }

    /// Rewrite both JSON files from the in-memory collections. A write
    /// failure fails the triggering operation.
    pub fn save(&self) -> Result<(), ToolError> {
        write_array(&self.data_dir.join(MEETINGS_FILE), &self.meetings())?;
        write_array(&self.data_dir.join(ACTIONS_FILE), &self.action_items())?;
        Ok(())
    }
}

/// Read a JSON array file into records; missing or corrupt files yield an
/// empty set and a log line, never an error.
fn read_array<T: DeserializeOwned>(path: &Path) -> Vec<T> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(_) => {
            info!("No existing data at {}, starting fresh", path.display());
            return Vec::new();
        }
    };

    match serde_json::from_str(&data) {
        Ok(records) => records,
        Err(e) => {
            warn!(
                "Could not parse {}, starting fresh: {}",
                path.display(),
                e
            );
            Vec::new()
        }
    }
}

fn write_array<T: Serialize>(path: &Path, records: &[T]) -> Result<(), ToolError> {
    let json = serde_json::to_string_pretty(records)
        .map_err(|e| ToolError::Persistence(format!("serialize {}: {}", path.display(), e)))?;
    fs::write(path, json)
        .map_err(|e| ToolError::Persistence(format!("write {}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActionCategory, ActionStatus, Priority, Sentiment};
    use tempfile::TempDir;

    fn meeting(id: &str) -> MeetingRecord {
        MeetingRecord {
            id: id.to_string(),
            title: "Sync".to_string(),
            date: "2024-05-01".to_string(),
            duration: 30.0,
            participants: vec!["Alice".to_string()],
            transcript: "Alice will send the agenda".to_string(),
            summary: ".".to_string(),
            action_items: Vec::new(),
            key_topics: Vec::new(),
            sentiment: Sentiment::Neutral,
            follow_up_needed: false,
        }
    }

    fn action(id: &str) -> ActionItem {
        ActionItem {
            id: id.to_string(),
            description: "send the agenda".to_string(),
            assignee: "Alice".to_string(),
            due_date: None,
            priority: Priority::Medium,
            status: ActionStatus::Pending,
            category: ActionCategory::General,
        }
    }

    #[test]
    fn test_round_trip_preserves_ids_and_order() {
        let dir = TempDir::new().unwrap();

        let mut store = RecordStore::load(dir.path()).unwrap();
        store.insert_meeting(meeting("meeting_2_b"));
        store.insert_meeting(meeting("meeting_1_a"));
        store.insert_action(action("action_3_c"));
        store.insert_action(action("action_1_a"));
        store.save().unwrap();

        let reloaded = RecordStore::load(dir.path()).unwrap();
        let meeting_ids: Vec<&str> = reloaded.meetings().iter().map(|m| m.id.as_str()).collect();
        let action_ids: Vec<&str> = reloaded
            .action_items()
            .iter()
            .map(|a| a.id.as_str())
            .collect();

        assert_eq!(meeting_ids, vec!["meeting_2_b", "meeting_1_a"]);
        assert_eq!(action_ids, vec!["action_3_c", "action_1_a"]);
    }

    #[test]
    fn test_missing_files_start_empty() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::load(dir.path().join("nested")).unwrap();

        assert!(store.meetings().is_empty());
        assert!(store.action_items().is_empty());
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(MEETINGS_FILE), "not json at all").unwrap();

        let store = RecordStore::load(dir.path()).unwrap();
        assert!(store.meetings().is_empty());
    }

    #[test]
    fn test_reinsert_does_not_duplicate_order() {
        let dir = TempDir::new().unwrap();
        let mut store = RecordStore::load(dir.path()).unwrap();

        store.insert_meeting(meeting("meeting_1_a"));
        let mut replacement = meeting("meeting_1_a");
        replacement.title = "Renamed".to_string();
        store.insert_meeting(replacement);

        let meetings = store.meetings();
        assert_eq!(meetings.len(), 1);
        assert_eq!(meetings[0].title, "Renamed");
    }

    #[test]
    fn test_lookup_by_id() {
        let dir = TempDir::new().unwrap();
        let mut store = RecordStore::load(dir.path()).unwrap();
        store.insert_meeting(meeting("meeting_1_a"));

        assert!(store.meeting("meeting_1_a").is_some());
        assert!(store.meeting("meeting_9_z").is_none());
    }
}
