//! Text heuristics engine for transcript analysis.
//!
//! Pure pattern-based derivation of action items, summary, key topics,
//! sentiment, and the follow-up flag from raw transcript text. Keyword
//! tables are fixed; matching is case-insensitive substring unless noted.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::analytics::count_in_order;
use crate::models::{generate_id, ActionCategory, ActionItem, ActionStatus, Priority, Sentiment};

/// Line patterns that read as action-item phrasings. A line is tested
/// against every pattern, so one line can yield several items.
static ACTION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)(.+?)\s+(?:will|should|needs to|must)\s+(.+?)(?:\s+by\s+(.+?))?$")
            .unwrap(),
        Regex::new(r"(?i)action\s*item[:\s]*(.+?)(?:\s+[-–]\s*(.+?))?$").unwrap(),
        Regex::new(r"(?i)(.+?)\s+is\s+responsible\s+for\s+(.+?)$").unwrap(),
        Regex::new(r"(?i)(.+?)\s+to\s+follow\s+up\s+on\s+(.+?)$").unwrap(),
    ]
});

static WORD_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\W+").unwrap());
static SENTENCE_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").unwrap());

const HIGH_PRIORITY_WORDS: &[&str] = &[
    "urgent",
    "critical",
    "asap",
    "immediately",
    "priority",
    "important",
];

const LOW_PRIORITY_WORDS: &[&str] = &["when possible", "eventually", "nice to have", "if time permits"];

/// Category keyword tables, checked in this order; first hit wins.
const CATEGORY_KEYWORDS: &[(ActionCategory, &[&str])] = &[
    (
        ActionCategory::Development,
        &["code", "develop", "build", "implement", "programming"],
    ),
    (
        ActionCategory::Research,
        &["research", "investigate", "analyze", "study", "explore"],
    ),
    (
        ActionCategory::Communication,
        &["email", "call", "message", "contact", "reach out"],
    ),
    (
        ActionCategory::Meeting,
        &["schedule", "meeting", "call", "discussion", "presentation"],
    ),
    (
        ActionCategory::Documentation,
        &["document", "write", "report", "summary", "notes"],
    ),
    (
        ActionCategory::Review,
        &["review", "check", "verify", "validate", "approve"],
    ),
];

const SUMMARY_KEYWORDS: &[&str] = &["decision", "action", "next step", "important", "key"];

const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by", "is",
    "are", "was", "were", "be", "been", "being", "have", "has", "had", "do", "does", "did", "will",
    "would", "could", "should", "may", "might", "must", "can", "need", "we", "you", "they", "i",
    "he", "she", "it", "this", "that", "these", "those",
];

const POSITIVE_WORDS: &[&str] = &[
    "great",
    "excellent",
    "good",
    "positive",
    "success",
    "agree",
    "perfect",
    "wonderful",
    "amazing",
    "fantastic",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad",
    "terrible",
    "wrong",
    "problem",
    "issue",
    "concern",
    "worry",
    "difficult",
    "challenge",
    "fail",
];

const FOLLOW_UP_INDICATORS: &[&str] = &[
    "follow up",
    "next meeting",
    "circle back",
    "check in",
    "pending",
    "waiting for",
    "need to discuss",
    "table this",
    "revisit",
];

/// Extract action items from a transcript.
///
/// Each line is tested against every pattern in [`ACTION_PATTERNS`]; a line
/// matching more than one pattern produces one item per match. The
/// description is the second capture group when present, else the first.
/// The assignee is the first participant whose first name token appears in
/// the line.
pub fn extract_action_items(transcript: &str, participants: &[String]) -> Vec<ActionItem> {
    let mut items = Vec::new();

    for line in transcript.split('\n') {
        for pattern in ACTION_PATTERNS.iter() {
            let Some(captures) = pattern.captures(line) else {
                continue;
            };

            let description = captures
                .get(2)
                .or_else(|| captures.get(1))
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();

            items.push(ActionItem {
                id: generate_id("action"),
                description,
                assignee: find_assignee(line, participants),
                due_date: None,
                priority: determine_priority(line),
                status: ActionStatus::Pending,
                category: categorize_action(line),
            });
        }
    }

    items
}

/// First participant whose first name token (lowercased) occurs in the
/// lowercased line, else "Unassigned".
fn find_assignee(line: &str, participants: &[String]) -> String {
    let line_lower = line.to_lowercase();
    participants
        .iter()
        .find(|p| {
            p.to_lowercase()
                .split_whitespace()
                .next()
                .is_some_and(|first| line_lower.contains(first))
        })
        .cloned()
        .unwrap_or_else(|| "Unassigned".to_string())
}

/// Priority from fixed keyword lists; the high list is checked first.
pub fn determine_priority(text: &str) -> Priority {
    let lower = text.to_lowercase();
    if HIGH_PRIORITY_WORDS.iter().any(|w| lower.contains(w)) {
        return Priority::High;
    }
    if LOW_PRIORITY_WORDS.iter().any(|w| lower.contains(w)) {
        return Priority::Low;
    }
    Priority::Medium
}

/// Category from fixed keyword tables in enumeration order; no hit means
/// `General`.
pub fn categorize_action(text: &str) -> ActionCategory {
    let lower = text.to_lowercase();
    for (category, keywords) in CATEGORY_KEYWORDS {
        if keywords.iter().any(|k| lower.contains(k)) {
            return *category;
        }
    }
    ActionCategory::General
}

/// Select up to three important sentences, joined with ". " and closed with
/// a trailing period. Fragments keep their original spacing; with no
/// qualifying sentence the result is just ".".
pub fn generate_summary(transcript: &str) -> String {
    let important: Vec<&str> = SENTENCE_SPLIT
        .split(transcript)
        .filter(|s| !s.trim().is_empty())
        .filter(|s| {
            let lower = s.to_lowercase();
            SUMMARY_KEYWORDS.iter().any(|k| lower.contains(k))
        })
        .take(3)
        .collect();

    format!("{}.", important.join(". "))
}

/// Top 10 topics by frequency. Tokens are lowercased, split on non-word
/// boundaries, and dropped when they are stop words or 3 characters or
/// shorter; ties keep first-seen order.
pub fn extract_key_topics(transcript: &str) -> Vec<String> {
    let lower = transcript.to_lowercase();
    let words = WORD_SPLIT
        .split(&lower)
        .filter(|w| w.len() > 3 && !STOP_WORDS.contains(w));

    let mut counts = count_in_order(words);
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(10);
    counts.into_iter().map(|(topic, _)| topic).collect()
}

/// Sentiment by whole-word counts against the two fixed lists; strict
/// majority wins, otherwise neutral.
pub fn analyze_sentiment(transcript: &str) -> Sentiment {
    let lower = transcript.to_lowercase();
    let words: Vec<&str> = WORD_SPLIT.split(&lower).collect();

    let positive = words.iter().filter(|w| POSITIVE_WORDS.contains(w)).count();
    let negative = words.iter().filter(|w| NEGATIVE_WORDS.contains(w)).count();

    if positive > negative {
        Sentiment::Positive
    } else if negative > positive {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

/// A meeting needs follow-up when the transcript contains any follow-up
/// phrase or when any action items were extracted.
pub fn needs_follow_up(transcript: &str, action_items: &[ActionItem]) -> bool {
    let lower = transcript.to_lowercase();
    FOLLOW_UP_INDICATORS.iter().any(|p| lower.contains(p)) || !action_items.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn participants(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_no_matching_lines_yields_no_items() {
        let transcript = "Hello everyone.\nNothing was decided.\nSee you around.";
        let items = extract_action_items(transcript, &participants(&["Alice"]));
        assert!(items.is_empty());
    }

    #[test]
    fn test_urgent_report_line() {
        let transcript = "Alice will prepare the report by Friday. This is an urgent task.";
        let items = extract_action_items(transcript, &participants(&["Alice", "Bob"]));

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].assignee, "Alice");
        assert_eq!(items[0].priority, Priority::High);
        assert_eq!(items[0].category, ActionCategory::Documentation);
        assert_eq!(items[0].description, "prepare the report");
        assert_eq!(items[0].status, ActionStatus::Pending);
    }

    #[test]
    fn test_line_matching_two_patterns_yields_two_items() {
        // "is responsible for" and "must" both match; one item per match.
        let transcript = "Carol is responsible for the rollout and must update the plan";
        let items = extract_action_items(transcript, &participants(&["Carol"]));

        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|i| i.assignee == "Carol"));
        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_ne!(ids[0], ids[1]);
    }

    #[test]
    fn test_unmatched_participant_is_unassigned() {
        let transcript = "Someone should update the wiki";
        let items = extract_action_items(transcript, &participants(&["Alice", "Bob"]));

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].assignee, "Unassigned");
    }

    #[test]
    fn test_assignee_matches_on_first_name_token() {
        let transcript = "alice should email the vendor";
        let items = extract_action_items(transcript, &participants(&["Alice Smith", "Bob Jones"]));

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].assignee, "Alice Smith");
        assert_eq!(items[0].category, ActionCategory::Communication);
    }

    #[test]
    fn test_action_item_label_pattern() {
        let transcript = "Action item: update the deployment checklist";
        let items = extract_action_items(transcript, &[]);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].description, "update the deployment checklist");
    }

    #[test]
    fn test_priority_tables() {
        assert_eq!(determine_priority("this is URGENT"), Priority::High);
        assert_eq!(determine_priority("do it when possible"), Priority::Low);
        assert_eq!(determine_priority("just a normal task"), Priority::Medium);
        // High list is checked before low list.
        assert_eq!(
            determine_priority("urgent, but only if time permits"),
            Priority::High
        );
    }

    #[test]
    fn test_category_enumeration_order() {
        // "research" and "code" both hit; development is enumerated first.
        assert_eq!(
            categorize_action("research the code"),
            ActionCategory::Development
        );
        // "call" is in both communication and meeting; communication wins.
        assert_eq!(
            categorize_action("call the client"),
            ActionCategory::Communication
        );
        assert_eq!(categorize_action("tidy the desk"), ActionCategory::General);
    }

    #[test]
    fn test_summary_keeps_first_three_important_sentences() {
        let transcript =
            "We made a key decision today. The weather was nice. Next step is to ship.";
        // The second fragment has no keyword; kept fragments preserve their
        // original leading whitespace.
        assert_eq!(
            generate_summary(transcript),
            "We made a key decision today.  Next step is to ship."
        );
    }

    #[test]
    fn test_summary_without_keywords_is_a_bare_period() {
        assert_eq!(generate_summary("Nothing of note happened here"), ".");
        assert_eq!(generate_summary(""), ".");
    }

    #[test]
    fn test_summary_caps_at_three_sentences() {
        let transcript =
            "First key point! Second key point? Third key point. Fourth key point.";
        let summary = generate_summary(transcript);
        assert!(summary.contains("Third key point"));
        assert!(!summary.contains("Fourth"));
    }

    #[test]
    fn test_topics_drop_stop_words_and_short_tokens() {
        let transcript = "sprint sprint sprint budget budget the the cat cat cat cat";
        let topics = extract_key_topics(transcript);

        assert_eq!(topics, vec!["sprint", "budget"]);
    }

    #[test]
    fn test_topics_capped_at_ten_descending() {
        let mut transcript = String::new();
        for (i, word) in [
            "alpha", "bravo", "charlie", "delta", "echoes", "foxtrot", "golfing", "hotels",
            "india", "juliet", "kilos", "limas",
        ]
        .iter()
        .enumerate()
        {
            for _ in 0..(20 - i) {
                transcript.push_str(word);
                transcript.push(' ');
            }
        }

        let topics = extract_key_topics(&transcript);
        assert_eq!(topics.len(), 10);
        assert_eq!(topics[0], "alpha");
        assert!(!topics.contains(&"limas".to_string()));
    }

    #[test]
    fn test_topic_ties_keep_first_seen_order() {
        let topics = extract_key_topics("zebra yacht zebra yacht apple");
        assert_eq!(topics, vec!["zebra", "yacht", "apple"]);
    }

    #[test]
    fn test_sentiment_majority() {
        assert_eq!(
            analyze_sentiment("great great excellent but one problem"),
            Sentiment::Positive
        );
        assert_eq!(
            analyze_sentiment("good result, bad process"),
            Sentiment::Neutral
        );
        assert_eq!(
            analyze_sentiment("terrible problem and a challenge"),
            Sentiment::Negative
        );
    }

    #[test]
    fn test_sentiment_counts_whole_words_only() {
        // "goodness" must not count as "good".
        assert_eq!(analyze_sentiment("goodness gracious"), Sentiment::Neutral);
    }

    #[test]
    fn test_follow_up_from_phrase_or_items() {
        assert!(needs_follow_up("let's circle back on this", &[]));
        assert!(needs_follow_up("we will revisit the plan", &[]));
        assert!(!needs_follow_up("all wrapped up", &[]));

        let items = extract_action_items("Bob should write the notes", &participants(&["Bob"]));
        assert!(needs_follow_up("all wrapped up", &items));
    }
}
