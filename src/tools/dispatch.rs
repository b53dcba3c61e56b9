//! Tool dispatcher.
//!
//! Executes named operations: validates arguments, runs the heuristics
//! engine and aggregators, talks to the record store and the GitHub
//! client, and returns a single JSON payload per call. The store mutex is
//! the only synchronization boundary and is never held across an await.

use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use tracing::debug;

use crate::analytics::{counts_to_object, count_in_order, developer, meetings};
use crate::error::ToolError;
use crate::github::GithubClient;
use crate::heuristics;
use crate::models::{
    generate_id, ActionCategory, ActionItem, ActionStatus, DeveloperProfile, MeetingRecord,
    Priority, RepoSummary,
};
use crate::store::RecordStore;
use crate::tools::definitions::{
    optional_str, optional_u64, require_f64, require_str, require_str_array,
};

/// Repositories fetched for the full-portfolio operations.
const FULL_PORTFOLIO_LIMIT: u64 = 100;
/// Default repository limit for get-code-analytics.
const DEFAULT_ANALYTICS_LIMIT: u64 = 30;
/// Trailing window for the "recent" trending-languages timeframe.
const RECENT_TIMEFRAME_DAYS: i64 = 180;

/// Executes tool operations against the store and the GitHub client.
pub struct ToolDispatcher {
    store: Mutex<RecordStore>,
    github: GithubClient,
}

/// Profile plus repositories, reused by analyze-developer and
/// compare-developers.
struct DeveloperOverview {
    profile: DeveloperProfile,
    repositories: Vec<RepoSummary>,
}

impl DeveloperOverview {
    fn summary_json(&self) -> Value {
        json!({
            "totalRepos": self.repositories.len(),
            "totalStars": developer::total_stars(&self.repositories),
            "primaryLanguages": developer::top_languages(&self.repositories, 5),
            "joinedDate": format_joined_date(&self.profile.created_at),
        })
    }
}

impl ToolDispatcher {
    pub fn new(store: RecordStore, github: GithubClient) -> Self {
        Self {
            store: Mutex::new(store),
            github,
        }
    }

    /// Execute one named operation with a flat JSON argument object.
    pub async fn dispatch(&self, name: &str, args: &Value) -> Result<Value, ToolError> {
        debug!("dispatching tool {}", name);

        match name {
            "analyze_meeting_transcript" => self.analyze_meeting_transcript(args),
            "get_meeting_summary" => self.get_meeting_summary(args),
            "track_action_items" => self.track_action_items(args),
            "generate_meeting_analytics" => self.generate_meeting_analytics(),
            "find_follow_up_meetings" => self.find_follow_up_meetings(),
            "extract_meeting_insights" => self.extract_meeting_insights(args),
            "analyze-developer" => self.analyze_developer(args).await,
            "get-code-analytics" => self.get_code_analytics(args).await,
            "compare-developers" => self.compare_developers(args).await,
            "get-trending-languages" => self.get_trending_languages(args).await,
            other => Err(ToolError::UnknownTool(other.to_string())),
        }
    }

    fn store(&self) -> Result<MutexGuard<'_, RecordStore>, ToolError> {
        self.store
            .lock()
            .map_err(|_| ToolError::Persistence("record store lock poisoned".to_string()))
    }

    /// Run the full heuristics pipeline over a transcript, persist the new
    /// record and its action items, and return the ingestion summary.
    fn analyze_meeting_transcript(&self, args: &Value) -> Result<Value, ToolError> {
        let title = require_str(args, "title")?;
        let transcript = require_str(args, "transcript")?;
        let participants = require_str_array(args, "participants")?;
        let date = require_str(args, "date")?;
        let duration = require_f64(args, "duration")?;
        if duration < 0.0 {
            return Err(ToolError::invalid("\"duration\" must be non-negative"));
        }

        let action_items = heuristics::extract_action_items(transcript, &participants);
        let summary = heuristics::generate_summary(transcript);
        let key_topics = heuristics::extract_key_topics(transcript);
        let sentiment = heuristics::analyze_sentiment(transcript);
        let follow_up_needed = heuristics::needs_follow_up(transcript, &action_items);

        let meeting_id = generate_id("meeting");
        let record = MeetingRecord {
            id: meeting_id.clone(),
            title: title.to_string(),
            date: date.to_string(),
            duration,
            participants: participants.clone(),
            transcript: transcript.to_string(),
            summary,
            action_items: action_items.iter().map(|i| i.id.clone()).collect(),
            key_topics: key_topics.clone(),
            sentiment,
            follow_up_needed,
        };

        {
            let mut store = self.store()?;
            for item in &action_items {
                store.insert_action(item.clone());
            }
            store.insert_meeting(record);
            store.save()?;
        }

        Ok(json!({
            "success": true,
            "meetingId": meeting_id,
            "summary": {
                "title": title,
                "duration": format!("{} minutes", duration),
                "participants": participants.len(),
                "actionItems": action_items.len(),
                "keyTopics": key_topics.iter().take(5).collect::<Vec<_>>(),
                "sentiment": sentiment,
                "followUpNeeded": follow_up_needed,
            },
            "actionItems": action_items.iter().map(|item| json!({
                "id": item.id,
                "description": item.description,
                "assignee": item.assignee,
                "priority": item.priority,
                "category": item.category,
            })).collect::<Vec<_>>(),
        }))
    }

    /// Derived view of one stored meeting.
    fn get_meeting_summary(&self, args: &Value) -> Result<Value, ToolError> {
        let meeting_id = require_str(args, "meetingId")?;

        let store = self.store()?;
        let record = store
            .meeting(meeting_id)
            .ok_or_else(|| ToolError::invalid(format!("unknown meeting id: {}", meeting_id)))?;

        Ok(json!({
            "meetingId": record.id,
            "title": record.title,
            "date": record.date,
            "duration": record.duration,
            "participants": record.participants,
            "summary": record.summary,
            "actionItems": record.action_items,
            "keyTopics": record.key_topics,
            "sentiment": record.sentiment,
            "followUpNeeded": record.follow_up_needed,
        }))
    }

    /// Filtered listing over the global action-item map.
    fn track_action_items(&self, args: &Value) -> Result<Value, ToolError> {
        let assignee = optional_str(args, "assignee")?.map(str::to_string);
        let status = parse_filter::<ActionStatus>(args, "status")?;
        let priority = parse_filter::<Priority>(args, "priority")?;
        let category = parse_filter::<ActionCategory>(args, "category")?;

        let store = self.store()?;
        let items: Vec<ActionItem> = store
            .action_items()
            .into_iter()
            .filter(|item| assignee.as_ref().is_none_or(|a| &item.assignee == a))
            .filter(|item| status.is_none_or(|s| item.status == s))
            .filter(|item| priority.is_none_or(|p| item.priority == p))
            .filter(|item| category.is_none_or(|c| item.category == c))
            .cloned()
            .collect();

        let status_counts =
            count_in_order(items.iter().map(|item| item.status.to_string()));

        Ok(json!({
            "total": items.len(),
            "statusCounts": counts_to_object(&status_counts),
            "items": items,
        }))
    }

    /// Aggregate analytics across all stored meetings and action items.
    fn generate_meeting_analytics(&self) -> Result<Value, ToolError> {
        let (meetings, items) = self.snapshot()?;
        let analytics = meetings::build_analytics(&meetings, &items, Utc::now());

        Ok(json!(analytics))
    }

    /// Meetings flagged as needing follow-up.
    fn find_follow_up_meetings(&self) -> Result<Value, ToolError> {
        let (meetings, _) = self.snapshot()?;
        let flagged: Vec<Value> = meetings
            .iter()
            .filter(|m| m.follow_up_needed)
            .map(|m| {
                json!({
                    "meetingId": m.id,
                    "title": m.title,
                    "date": m.date,
                    "participants": m.participants.len(),
                    "actionItems": m.action_items.len(),
                    "sentiment": m.sentiment,
                })
            })
            .collect();

        Ok(json!({
            "count": flagged.len(),
            "meetings": flagged,
        }))
    }

    /// Per-meeting deep dive with action-item groupings.
    fn extract_meeting_insights(&self, args: &Value) -> Result<Value, ToolError> {
        let meeting_id = require_str(args, "meetingId")?;

        let store = self.store()?;
        let record = store
            .meeting(meeting_id)
            .ok_or_else(|| ToolError::invalid(format!("unknown meeting id: {}", meeting_id)))?;

        let items: Vec<&ActionItem> = store
            .action_items()
            .into_iter()
            .filter(|item| record.action_items.contains(&item.id))
            .collect();

        let by_priority = count_in_order(items.iter().map(|i| i.priority.to_string()));
        let by_category = count_in_order(items.iter().map(|i| i.category.to_string()));
        let by_assignee = count_in_order(items.iter().map(|i| i.assignee.as_str()));

        Ok(json!({
            "meetingId": record.id,
            "title": record.title,
            "summary": record.summary,
            "keyTopics": record.key_topics,
            "sentiment": record.sentiment,
            "followUpNeeded": record.follow_up_needed,
            "actionItems": {
                "total": items.len(),
                "byPriority": counts_to_object(&by_priority),
                "byCategory": counts_to_object(&by_category),
                "byAssignee": counts_to_object(&by_assignee),
            },
        }))
    }

    /// Profile + repositories + headline summary for one developer.
    async fn analyze_developer(&self, args: &Value) -> Result<Value, ToolError> {
        let username = require_str(args, "username")?;
        let overview = self.developer_overview(username).await?;

        Ok(json!({
            "profile": overview.profile,
            "repositories": overview.repositories,
            "summary": overview.summary_json(),
        }))
    }

    /// Portfolio-wide analytics plus generated insight sentences.
    async fn get_code_analytics(&self, args: &Value) -> Result<Value, ToolError> {
        let username = require_str(args, "username")?;
        let limit = optional_u64(args, "limit")?.unwrap_or(DEFAULT_ANALYTICS_LIMIT);

        let repos = self.github.fetch_repos(username, limit).await?;
        let now = Utc::now();
        let pattern = developer::activity_pattern(&repos, now);

        let breakdown = developer::language_breakdown(&repos);
        let topics = developer::topics_frequency(&repos);
        let most_popular = developer::most_popular_repo(&repos)
            .map(|r| r.name.clone())
            .unwrap_or_else(|| "N/A".to_string());

        Ok(json!({
            "analytics": {
                "totalRepos": repos.len(),
                "languageBreakdown": counts_to_object(&breakdown),
                "totalStars": developer::total_stars(&repos),
                "totalForks": developer::total_forks(&repos),
                "avgRepoSize": developer::avg_repo_size(&repos),
                "mostPopularRepo": most_popular,
                "topicsFrequency": counts_to_object(&topics),
                "activityPattern": pattern,
            },
            "insights": developer::generate_insights(&repos, &pattern),
        }))
    }

    /// Side-by-side comparison; both overviews are fetched concurrently.
    async fn compare_developers(&self, args: &Value) -> Result<Value, ToolError> {
        let username1 = require_str(args, "username1")?;
        let username2 = require_str(args, "username2")?;

        let (dev1, dev2) = futures::future::try_join(
            self.developer_overview(username1),
            self.developer_overview(username2),
        )
        .await?;

        let langs1 = developer::top_languages(&dev1.repositories, 5);
        let langs2 = developer::top_languages(&dev2.repositories, 5);

        let stars1 = developer::total_stars(&dev1.repositories) as f64;
        let stars2 = developer::total_stars(&dev2.repositories) as f64;

        Ok(json!({
            "developer1": {
                "username": dev1.profile.username,
                "stats": dev1.summary_json(),
            },
            "developer2": {
                "username": dev2.profile.username,
                "stats": dev2.summary_json(),
            },
            "comparison": {
                "starsRatio": stars1 / stars2,
                "reposRatio": dev1.repositories.len() as f64 / dev2.repositories.len() as f64,
                "commonLanguages": developer::common_languages(&langs1, &langs2),
                "experienceComparison": developer::compare_experience(
                    &dev1.profile.created_at,
                    &dev2.profile.created_at,
                ),
            },
        }))
    }

    /// Language share trends, optionally restricted to recently updated
    /// repositories.
    async fn get_trending_languages(&self, args: &Value) -> Result<Value, ToolError> {
        let username = require_str(args, "username")?;
        let timeframe = optional_str(args, "timeframe")?.unwrap_or("all");
        if timeframe != "all" && timeframe != "recent" {
            return Err(ToolError::invalid(
                "\"timeframe\" must be \"all\" or \"recent\"",
            ));
        }

        let repos = self.github.fetch_repos(username, FULL_PORTFOLIO_LIMIT).await?;
        let filtered = if timeframe == "recent" {
            developer::updated_within(&repos, RECENT_TIMEFRAME_DAYS, Utc::now())
        } else {
            repos
        };

        let stats = developer::language_breakdown(&filtered);
        let distribution = developer::language_trends(&filtered);
        let dominant = distribution
            .first()
            .map(|s| s.language.clone())
            .unwrap_or_else(|| "N/A".to_string());

        Ok(json!({
            "timeframe": timeframe,
            "totalRepos": filtered.len(),
            "languageStats": counts_to_object(&stats),
            "trends": {
                "dominantLanguage": dominant,
                "diversity": stats.len(),
                "distribution": distribution,
            },
        }))
    }

    async fn developer_overview(&self, username: &str) -> Result<DeveloperOverview, ToolError> {
        let profile = self.github.fetch_profile(username).await?;
        let repositories = self.github.fetch_repos(username, FULL_PORTFOLIO_LIMIT).await?;
        Ok(DeveloperOverview {
            profile,
            repositories,
        })
    }

    /// Consistent snapshot of both collections, taken under the lock and
    /// released before any aggregation work.
    fn snapshot(&self) -> Result<(Vec<MeetingRecord>, Vec<ActionItem>), ToolError> {
        let store = self.store()?;
        let meetings = store.meetings().into_iter().cloned().collect();
        let items = store.action_items().into_iter().cloned().collect();
        Ok((meetings, items))
    }
}

/// Parse an optional enum-valued filter argument through its serde form.
fn parse_filter<T: serde::de::DeserializeOwned>(
    args: &Value,
    key: &str,
) -> Result<Option<T>, ToolError> {
    match optional_str(args, key)? {
        None => Ok(None),
        Some(raw) => serde_json::from_value(Value::String(raw.to_string()))
            .map(Some)
            .map_err(|_| {
                ToolError::invalid(format!("missing or invalid \"{}\" argument", key))
            }),
    }
}

/// Joined date as YYYY-MM-DD; unparseable timestamps pass through as-is.
fn format_joined_date(created_at: &str) -> String {
    DateTime::parse_from_rfc3339(created_at)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|_| created_at.to_string())
}
