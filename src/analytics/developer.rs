//! Cross-repository aggregation for developer analytics.

use chrono::{DateTime, Duration, Utc};

use super::{count_in_order, top_n};
use crate::models::{ActivityPattern, LanguageShare, RepoSummary};

/// Repositories updated inside this trailing window count as recently
/// active.
const ACTIVITY_WINDOW_DAYS: i64 = 365;

/// Count of repositories per primary language, first-seen order.
/// Rows are already normalized, so absent languages arrive as "Unknown".
pub fn language_breakdown(repos: &[RepoSummary]) -> Vec<(String, usize)> {
    count_in_order(repos.iter().map(|r| r.language.as_str()))
}

/// Top `count` languages by repository count.
pub fn top_languages(repos: &[RepoSummary], count: usize) -> Vec<String> {
    top_n(language_breakdown(repos), count)
}

/// Count of repositories per topic tag, first-seen order.
pub fn topics_frequency(repos: &[RepoSummary]) -> Vec<(String, usize)> {
    count_in_order(repos.iter().flat_map(|r| r.topics.iter()))
}

/// Recently-active vs dormant counts. A repository with an unparseable
/// updated_at counts as dormant.
pub fn activity_pattern(repos: &[RepoSummary], now: DateTime<Utc>) -> ActivityPattern {
    let cutoff = now - Duration::days(ACTIVITY_WINDOW_DAYS);
    let recently_active = repos
        .iter()
        .filter_map(|r| parse_timestamp(&r.updated_at))
        .filter(|updated| *updated > cutoff)
        .count();

    ActivityPattern {
        recently_active,
        dormant: repos.len() - recently_active,
    }
}

/// Filter to repositories updated inside the trailing window.
pub fn updated_within(repos: &[RepoSummary], days: i64, now: DateTime<Utc>) -> Vec<RepoSummary> {
    let cutoff = now - Duration::days(days);
    repos
        .iter()
        .filter(|r| parse_timestamp(&r.updated_at).is_some_and(|updated| updated > cutoff))
        .cloned()
        .collect()
}

/// Integer-percent share per language, sorted descending; ties keep
/// first-seen order.
pub fn language_trends(repos: &[RepoSummary]) -> Vec<LanguageShare> {
    let breakdown = language_breakdown(repos);
    let total: usize = breakdown.iter().map(|(_, count)| count).sum();
    if total == 0 {
        return Vec::new();
    }

    let mut shares: Vec<LanguageShare> = breakdown
        .into_iter()
        .map(|(language, count)| LanguageShare {
            language,
            percentage: ((count as f64 / total as f64) * 100.0).round() as i64,
            repositories: count,
        })
        .collect();

    shares.sort_by(|a, b| b.percentage.cmp(&a.percentage));
    shares
}

/// Languages present in both top lists, in the order of the first.
pub fn common_languages(langs1: &[String], langs2: &[String]) -> Vec<String> {
    langs1
        .iter()
        .filter(|lang| langs2.contains(lang))
        .cloned()
        .collect()
}

/// Compare two account creation timestamps. Unparseable timestamps fall
/// into the same-time branch.
pub fn compare_experience(created1: &str, created2: &str) -> &'static str {
    match (parse_timestamp(created1), parse_timestamp(created2)) {
        (Some(d1), Some(d2)) if d1 < d2 => "Developer 1 has more experience on GitHub",
        (Some(d1), Some(d2)) if d1 > d2 => "Developer 2 has more experience on GitHub",
        _ => "Both developers joined GitHub around the same time",
    }
}

/// Repository with the most stars; the later entry wins ties.
pub fn most_popular_repo(repos: &[RepoSummary]) -> Option<&RepoSummary> {
    repos
        .iter()
        .reduce(|prev, current| if prev.stars > current.stars { prev } else { current })
}

/// Total stars across the portfolio.
pub fn total_stars(repos: &[RepoSummary]) -> u64 {
    repos.iter().map(|r| r.stars).sum()
}

/// Total forks across the portfolio.
pub fn total_forks(repos: &[RepoSummary]) -> u64 {
    repos.iter().map(|r| r.forks).sum()
}

/// Mean repository size in KB; 0 for an empty portfolio.
pub fn avg_repo_size(repos: &[RepoSummary]) -> f64 {
    if repos.is_empty() {
        return 0.0;
    }
    repos.iter().map(|r| r.size).sum::<u64>() as f64 / repos.len() as f64
}

/// Three human-readable observations about a portfolio.
pub fn generate_insights(repos: &[RepoSummary], pattern: &ActivityPattern) -> Vec<String> {
    let mut insights = Vec::new();

    let mut breakdown = language_breakdown(repos);
    breakdown.sort_by(|a, b| b.1.cmp(&a.1));
    if let Some((language, count)) = breakdown.first() {
        insights.push(format!(
            "Primary language: {} ({} repositories)",
            language, count
        ));
    }

    insights.push(format!(
        "Average repository size: {} KB",
        avg_repo_size(repos).round() as i64
    ));

    if pattern.recently_active > pattern.dormant {
        insights.push(
            "High activity: More recently active repositories than dormant ones".to_string(),
        );
    } else {
        insights.push(
            "Lower activity: More dormant repositories than recently active ones".to_string(),
        );
    }

    insights
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
