use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

/// Kind of repository activity an event record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    Push,
    Merge,
    PullRequest,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Push => "PUSH",
            Action::Merge => "MERGE",
            Action::PullRequest => "PULL_REQUEST",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical stored form of one webhook-derived action.
///
/// `(request_id, action)` identifies the record; the storage row id is never
/// part of this struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct EventRecord {
    pub request_id: String,
    pub author: Option<String>,
    pub action: Action,
    pub to_branch: Option<String>,
    pub from_branch: Option<String>,
    pub timestamp: String,
}

/// Result of attempting to store a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    Duplicate,
}

impl InsertOutcome {
    pub fn status(&self) -> &'static str {
        match self {
            InsertOutcome::Inserted => "success",
            InsertOutcome::Duplicate => "duplicate",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_wire_names() {
        assert_eq!(serde_json::to_value(Action::Push).unwrap(), "PUSH");
        assert_eq!(serde_json::to_value(Action::Merge).unwrap(), "MERGE");
        assert_eq!(serde_json::to_value(Action::PullRequest).unwrap(), "PULL_REQUEST");
    }

    #[test]
    fn test_record_serializes_absent_fields_as_null() {
        let record = EventRecord {
            request_id: "abc123".to_string(),
            author: Some("alice".to_string()),
            action: Action::Push,
            to_branch: Some("main".to_string()),
            from_branch: None,
            timestamp: "2nd January 2024 - 03:30 PM UTC".to_string(),
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["from_branch"], serde_json::Value::Null);
        assert_eq!(value["action"], "PUSH");
        assert!(value.get("id").is_none());
    }
}
