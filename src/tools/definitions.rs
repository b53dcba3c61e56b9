//! Operation catalog and argument access.
//!
//! Each tool operation is described by a name, a description, and a JSON
//! schema for its flat argument object. The accessors at the bottom turn
//! missing or mistyped arguments into `InvalidRequest` errors before any
//! work happens.

use serde::Serialize;
use serde_json::{json, Value};

use crate::error::ToolError;

/// One operation in the catalog.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// The full operation catalog, meeting side first. Meeting operations use
/// snake_case names and GitHub operations kebab-case; both casings are part
/// of the wire contract.
pub fn tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: "analyze_meeting_transcript".to_string(),
            description: "Analyze a meeting transcript: extract action items, summary, topics, sentiment, and persist the record".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "title": { "type": "string", "description": "Meeting title" },
                    "transcript": { "type": "string", "description": "Raw transcript text" },
                    "participants": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Participant names"
                    },
                    "date": { "type": "string", "description": "Meeting date (YYYY-MM-DD)" },
                    "duration": { "type": "number", "description": "Duration in minutes" }
                },
                "required": ["title", "transcript", "participants", "date", "duration"]
            }),
        },
        ToolDefinition {
            name: "get_meeting_summary".to_string(),
            description: "Get the derived summary view of one analyzed meeting".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "meetingId": { "type": "string", "description": "Meeting id" }
                },
                "required": ["meetingId"]
            }),
        },
        ToolDefinition {
            name: "track_action_items".to_string(),
            description: "List tracked action items, optionally filtered by assignee, status, priority, or category".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "assignee": { "type": "string", "description": "Filter by assignee name" },
                    "status": {
                        "type": "string",
                        "enum": ["pending", "in-progress", "completed"],
                        "description": "Filter by status"
                    },
                    "priority": {
                        "type": "string",
                        "enum": ["low", "medium", "high"],
                        "description": "Filter by priority"
                    },
                    "category": { "type": "string", "description": "Filter by category" }
                },
                "required": []
            }),
        },
        ToolDefinition {
            name: "generate_meeting_analytics".to_string(),
            description: "Compute aggregate analytics across all stored meetings".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
        },
        ToolDefinition {
            name: "find_follow_up_meetings".to_string(),
            description: "List meetings flagged as needing follow-up".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
        },
        ToolDefinition {
            name: "extract_meeting_insights".to_string(),
            description: "Deep dive into one meeting: topics, sentiment, and action item groupings".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "meetingId": { "type": "string", "description": "Meeting id" }
                },
                "required": ["meetingId"]
            }),
        },
        ToolDefinition {
            name: "analyze-developer".to_string(),
            description: "Analyze a GitHub developer profile and repositories".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "username": { "type": "string", "description": "GitHub username to analyze" }
                },
                "required": ["username"]
            }),
        },
        ToolDefinition {
            name: "get-code-analytics".to_string(),
            description: "Get detailed code analytics for a developer".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "username": { "type": "string", "description": "GitHub username for analytics" },
                    "limit": {
                        "type": "number",
                        "description": "Maximum number of repositories to analyze",
                        "default": 30
                    }
                },
                "required": ["username"]
            }),
        },
        ToolDefinition {
            name: "compare-developers".to_string(),
            description: "Compare two developers side by side".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "username1": { "type": "string", "description": "First developer username" },
                    "username2": { "type": "string", "description": "Second developer username" }
                },
                "required": ["username1", "username2"]
            }),
        },
        ToolDefinition {
            name: "get-trending-languages".to_string(),
            description: "Analyze trending programming languages from a developer portfolio".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "username": { "type": "string", "description": "GitHub username to analyze language trends" },
                    "timeframe": {
                        "type": "string",
                        "enum": ["recent", "all"],
                        "description": "Time frame for analysis",
                        "default": "all"
                    }
                },
                "required": ["username"]
            }),
        },
    ]
}

/// A required string argument.
pub fn require_str<'a>(args: &'a Value, key: &str) -> Result<&'a str, ToolError> {
    args.get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| missing(key))
}

/// A required non-negative number argument.
pub fn require_f64(args: &Value, key: &str) -> Result<f64, ToolError> {
    args.get(key).and_then(|v| v.as_f64()).ok_or_else(|| missing(key))
}

/// A required array-of-strings argument.
pub fn require_str_array(args: &Value, key: &str) -> Result<Vec<String>, ToolError> {
    let array = args.get(key).and_then(|v| v.as_array()).ok_or_else(|| missing(key))?;
    array
        .iter()
        .map(|v| v.as_str().map(str::to_string).ok_or_else(|| missing(key)))
        .collect()
}

/// An optional string argument; present-but-mistyped is an error.
pub fn optional_str<'a>(args: &'a Value, key: &str) -> Result<Option<&'a str>, ToolError> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value.as_str().map(Some).ok_or_else(|| missing(key)),
    }
}

/// An optional unsigned number argument; present-but-mistyped is an error.
pub fn optional_u64(args: &Value, key: &str) -> Result<Option<u64>, ToolError> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value.as_u64().map(Some).ok_or_else(|| missing(key)),
    }
}

fn missing(key: &str) -> ToolError {
    ToolError::invalid(format!("missing or invalid \"{}\" argument", key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_all_operations() {
        let tools = tool_definitions();
        assert_eq!(tools.len(), 10);

        let names: Vec<&str> = tools.iter().map(|t| t.name.as_str()).collect();
        assert!(names.contains(&"analyze_meeting_transcript"));
        assert!(names.contains(&"generate_meeting_analytics"));
        assert!(names.contains(&"analyze-developer"));
        assert!(names.contains(&"get-trending-languages"));
    }

    #[test]
    fn test_catalog_serializes_input_schema_key() {
        let tools = tool_definitions();
        let value = serde_json::to_value(&tools[0]).unwrap();
        assert!(value.get("inputSchema").is_some());
        assert_eq!(value["inputSchema"]["required"][0], "title");
    }

    #[test]
    fn test_require_str() {
        let args = json!({"title": "Standup", "duration": 30});
        assert_eq!(require_str(&args, "title").unwrap(), "Standup");
        assert!(require_str(&args, "duration").is_err());
        assert!(require_str(&args, "absent").is_err());
    }

    #[test]
    fn test_require_str_array_rejects_mixed_items() {
        let args = json!({"participants": ["Alice", 7]});
        assert!(require_str_array(&args, "participants").is_err());

        let args = json!({"participants": ["Alice", "Bob"]});
        assert_eq!(
            require_str_array(&args, "participants").unwrap(),
            vec!["Alice", "Bob"]
        );
    }

    #[test]
    fn test_optional_accessors() {
        let args = json!({"limit": 10, "timeframe": "recent"});
        assert_eq!(optional_u64(&args, "limit").unwrap(), Some(10));
        assert_eq!(optional_u64(&args, "absent").unwrap(), None);
        assert_eq!(optional_str(&args, "timeframe").unwrap(), Some("recent"));
        assert!(optional_str(&args, "limit").is_err());
        assert!(optional_u64(&args, "timeframe").is_err());
    }
}
