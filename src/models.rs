//! Data models for meeting and developer analytics.
//!
//! This module contains the core data structures shared by the heuristics
//! engine, the record store, and the tool dispatch facade. Meeting-side
//! types use camelCase on the wire and on disk; developer-side profile and
//! repository rows keep the upstream API's snake_case field names.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Priority of an action item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Low priority - "when possible" phrasing
    Low,
    /// Medium priority - the default
    Medium,
    /// High priority - urgency keywords present
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Low => write!(f, "low"),
            Priority::Medium => write!(f, "medium"),
            Priority::High => write!(f, "high"),
        }
    }
}

/// Lifecycle status of an action item.
///
/// Extraction always produces `Pending`; there is no status update path in
/// this core, so the other variants only appear in data loaded from disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionStatus {
    Pending,
    InProgress,
    Completed,
}

impl fmt::Display for ActionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionStatus::Pending => write!(f, "pending"),
            ActionStatus::InProgress => write!(f, "in-progress"),
            ActionStatus::Completed => write!(f, "completed"),
        }
    }
}

/// Overall sentiment of a transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sentiment::Positive => write!(f, "positive"),
            Sentiment::Neutral => write!(f, "neutral"),
            Sentiment::Negative => write!(f, "negative"),
        }
    }
}

/// Category assigned to an action item by keyword matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionCategory {
    Development,
    Research,
    Communication,
    Meeting,
    Documentation,
    Review,
    General,
}

impl fmt::Display for ActionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActionCategory::Development => "development",
            ActionCategory::Research => "research",
            ActionCategory::Communication => "communication",
            ActionCategory::Meeting => "meeting",
            ActionCategory::Documentation => "documentation",
            ActionCategory::Review => "review",
            ActionCategory::General => "general",
        };
        write!(f, "{}", name)
    }
}

/// A discrete task extracted from a transcript line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionItem {
    /// Unique id, `action_<millis>_<suffix>`.
    pub id: String,
    /// What needs to be done (second capture group when present).
    pub description: String,
    /// Matched participant name, or "Unassigned".
    pub assignee: String,
    /// Due date. The by-phrase capture exists in the pattern but is not
    /// consumed, so extraction never fills this in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    pub priority: Priority,
    pub status: ActionStatus,
    pub category: ActionCategory,
}

/// A transcript plus all derived analytical fields.
///
/// Created once at ingestion and immutable thereafter; re-ingesting the same
/// transcript creates a new record with a new id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingRecord {
    /// Unique id, `meeting_<millis>_<suffix>`.
    pub id: String,
    pub title: String,
    /// Calendar date string as supplied by the caller.
    pub date: String,
    /// Duration in minutes, non-negative.
    pub duration: f64,
    /// Participant names in the order supplied.
    pub participants: Vec<String>,
    /// Raw transcript text.
    pub transcript: String,
    /// Extracted summary (always present; "." when nothing qualified).
    pub summary: String,
    /// Ids of the action items extracted from this transcript. Every id
    /// here exists in the store's global action-item map.
    pub action_items: Vec<String>,
    /// Key topics, most frequent first.
    pub key_topics: Vec<String>,
    pub sentiment: Sentiment,
    pub follow_up_needed: bool,
}

/// Cross-meeting aggregate statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingAnalytics {
    pub total_meetings: usize,
    /// Sum of durations in hours.
    pub total_hours: f64,
    /// Mean duration in minutes, 0 when there are no meetings.
    pub average_duration: f64,
    /// Top 5 participants by appearance count.
    pub most_active_participants: Vec<String>,
    /// Top 10 topics across all meetings.
    pub common_topics: Vec<String>,
    /// Completed action items as a percentage, 0 when there are none.
    pub action_item_completion_rate: f64,
    pub meeting_trends: MeetingTrends,
}

/// Meeting counts inside the trailing trend windows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeetingTrends {
    /// Meetings within the trailing 7x24h window.
    pub weekly: usize,
    /// Meetings within the trailing 30x24h window.
    pub monthly: usize,
}

/// A developer profile as returned by the upstream API, with nullable
/// fields already defaulted to "N/A".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeveloperProfile {
    pub username: String,
    pub name: String,
    pub bio: String,
    pub public_repos: u64,
    pub followers: u64,
    pub following: u64,
    pub created_at: String,
    pub location: String,
    pub company: String,
}

/// One repository row, normalized from the upstream API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoSummary {
    pub name: String,
    /// "No description" when the upstream field is null.
    pub description: String,
    /// Primary language, "Unknown" when the upstream field is null.
    pub language: String,
    pub stars: u64,
    pub forks: u64,
    pub created_at: String,
    pub updated_at: String,
    /// Repository size in KB.
    pub size: u64,
    pub topics: Vec<String>,
}

/// One language's share of a repository portfolio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageShare {
    pub language: String,
    /// Share of total repository count, rounded to the nearest percent.
    pub percentage: i64,
    pub repositories: usize,
}

/// Recently-updated vs dormant repository counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityPattern {
    /// Repositories updated within the trailing 365x24h window.
    pub recently_active: usize,
    pub dormant: usize,
}

/// Generate a `<prefix>_<unix-millis>_<suffix>` identifier.
///
/// The suffix is the first 9 hex characters of a UUIDv4, which keeps ids
/// unique even within a single millisecond.
pub fn generate_id(prefix: &str) -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix: String = Uuid::new_v4().simple().to_string().chars().take(9).collect();
    format!("{}_{}_{}", prefix, millis, suffix)
}
