//! Cross-meeting aggregation.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use super::{count_in_order, top_n};
use crate::models::{ActionItem, ActionStatus, MeetingAnalytics, MeetingRecord, MeetingTrends};

/// Trailing trend window. Fixed durations, not calendar periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendPeriod {
    /// 7x24h.
    Week,
    /// 30x24h.
    Month,
}

impl TrendPeriod {
    fn window(&self) -> Duration {
        match self {
            TrendPeriod::Week => Duration::days(7),
            TrendPeriod::Month => Duration::days(30),
        }
    }
}

/// Top 5 participants by appearance count across all meetings.
pub fn most_active_participants(meetings: &[MeetingRecord]) -> Vec<String> {
    let counts = count_in_order(meetings.iter().flat_map(|m| m.participants.iter()));
    top_n(counts, 5)
}

/// Top 10 topics by frequency across all meetings' key-topics fields.
pub fn common_topics(meetings: &[MeetingRecord]) -> Vec<String> {
    let counts = count_in_order(meetings.iter().flat_map(|m| m.key_topics.iter()));
    top_n(counts, 10)
}

/// Completed action items as a percentage of all items; 0 when there are
/// no items.
pub fn action_item_completion_rate(items: &[ActionItem]) -> f64 {
    if items.is_empty() {
        return 0.0;
    }
    let completed = items
        .iter()
        .filter(|i| i.status == ActionStatus::Completed)
        .count();
    (completed as f64 / items.len() as f64) * 100.0
}

/// Meetings whose date falls within the trailing window ending at `now`.
/// Unparseable dates never fall inside a window.
pub fn meeting_trend(meetings: &[MeetingRecord], period: TrendPeriod, now: DateTime<Utc>) -> usize {
    let window = period.window();
    meetings
        .iter()
        .filter_map(|m| parse_meeting_date(&m.date))
        .filter(|date| now.signed_duration_since(*date) <= window)
        .count()
}

/// Assemble the full cross-meeting aggregate.
pub fn build_analytics(
    meetings: &[MeetingRecord],
    items: &[ActionItem],
    now: DateTime<Utc>,
) -> MeetingAnalytics {
    let total_minutes: f64 = meetings.iter().map(|m| m.duration).sum();
    let average_duration = if meetings.is_empty() {
        0.0
    } else {
        total_minutes / meetings.len() as f64
    };

    MeetingAnalytics {
        total_meetings: meetings.len(),
        total_hours: total_minutes / 60.0,
        average_duration,
        most_active_participants: most_active_participants(meetings),
        common_topics: common_topics(meetings),
        action_item_completion_rate: action_item_completion_rate(items),
        meeting_trends: MeetingTrends {
            weekly: meeting_trend(meetings, TrendPeriod::Week, now),
            monthly: meeting_trend(meetings, TrendPeriod::Month, now),
        },
    }
}

/// Parse a meeting date string: RFC 3339 first, then plain `YYYY-MM-DD`
/// (taken as midnight UTC).
fn parse_meeting_date(date: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(date) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActionCategory, Priority, Sentiment};
    use chrono::TimeZone;

    fn meeting(date: &str, duration: f64, participants: &[&str]) -> MeetingRecord {
        MeetingRecord {
            id: format!("meeting_{}", date),
            title: "Sync".to_string(),
            date: date.to_string(),
            duration,
            participants: participants.iter().map(|p| p.to_string()).collect(),
            transcript: String::new(),
            summary: ".".to_string(),
            action_items: Vec::new(),
            key_topics: Vec::new(),
            sentiment: Sentiment::Neutral,
            follow_up_needed: false,
        }
    }

    fn item(status: ActionStatus) -> ActionItem {
        ActionItem {
            id: "action_1_abc".to_string(),
            description: "task".to_string(),
            assignee: "Unassigned".to_string(),
            due_date: None,
            priority: Priority::Medium,
            status,
            category: ActionCategory::General,
        }
    }

    #[test]
    fn test_completion_rate_empty_is_zero() {
        assert_eq!(action_item_completion_rate(&[]), 0.0);
    }

    #[test]
    fn test_completion_rate_all_completed_is_hundred() {
        let items = vec![item(ActionStatus::Completed), item(ActionStatus::Completed)];
        assert_eq!(action_item_completion_rate(&items), 100.0);
    }

    #[test]
    fn test_completion_rate_mixed() {
        let items = vec![
            item(ActionStatus::Completed),
            item(ActionStatus::Pending),
            item(ActionStatus::InProgress),
            item(ActionStatus::Completed),
        ];
        assert_eq!(action_item_completion_rate(&items), 50.0);
    }

    #[test]
    fn test_week_trend_window_boundaries() {
        let now = Utc.with_ymd_and_hms(2024, 5, 20, 12, 0, 0).unwrap();
        let meetings = vec![
            meeting("2024-05-12", 30.0, &[]), // 8 days before now
            meeting("2024-05-14", 30.0, &[]), // 6 days before now
        ];

        assert_eq!(meeting_trend(&meetings, TrendPeriod::Week, now), 1);
        assert_eq!(meeting_trend(&meetings, TrendPeriod::Month, now), 2);
    }

    #[test]
    fn test_month_trend_is_thirty_days_exactly() {
        let now = Utc.with_ymd_and_hms(2024, 5, 31, 0, 0, 0).unwrap();
        let meetings = vec![
            meeting("2024-04-30", 30.0, &[]), // 31 days before
            meeting("2024-05-02", 30.0, &[]), // 29 days before
        ];

        assert_eq!(meeting_trend(&meetings, TrendPeriod::Month, now), 1);
    }

    #[test]
    fn test_unparseable_dates_are_excluded() {
        let now = Utc.with_ymd_and_hms(2024, 5, 20, 12, 0, 0).unwrap();
        let meetings = vec![meeting("next tuesday", 30.0, &[])];

        assert_eq!(meeting_trend(&meetings, TrendPeriod::Week, now), 0);
        assert_eq!(meeting_trend(&meetings, TrendPeriod::Month, now), 0);
    }

    #[test]
    fn test_most_active_participants_order_and_cap() {
        let meetings = vec![
            meeting("2024-05-01", 30.0, &["Ana", "Ben", "Cy", "Dee", "Ed", "Flo"]),
            meeting("2024-05-02", 30.0, &["Ben", "Ana"]),
            meeting("2024-05-03", 30.0, &["Ben"]),
        ];

        let top = most_active_participants(&meetings);
        assert_eq!(top.len(), 5);
        assert_eq!(top[0], "Ben");
        assert_eq!(top[1], "Ana");
        // Cy/Dee/Ed/Flo all tie at 1; first-seen order decides the cut.
        assert_eq!(&top[2..], ["Cy", "Dee", "Ed"]);
    }

    #[test]
    fn test_build_analytics_durations() {
        let now = Utc.with_ymd_and_hms(2024, 5, 20, 12, 0, 0).unwrap();
        let meetings = vec![
            meeting("2024-05-19", 90.0, &["Ana"]),
            meeting("2024-05-18", 30.0, &["Ana"]),
        ];

        let analytics = build_analytics(&meetings, &[], now);
        assert_eq!(analytics.total_meetings, 2);
        assert_eq!(analytics.total_hours, 2.0);
        assert_eq!(analytics.average_duration, 60.0);
        assert_eq!(analytics.meeting_trends.weekly, 2);
        assert_eq!(analytics.action_item_completion_rate, 0.0);
    }

    #[test]
    fn test_build_analytics_empty_store() {
        let now = Utc.with_ymd_and_hms(2024, 5, 20, 12, 0, 0).unwrap();
        let analytics = build_analytics(&[], &[], now);

        assert_eq!(analytics.total_meetings, 0);
        assert_eq!(analytics.average_duration, 0.0);
        assert!(analytics.most_active_participants.is_empty());
    }
}
