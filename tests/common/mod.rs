#![allow(dead_code)]

use action_feed::config::AppConfig;
use action_feed::database::models::{Action, EventRecord};
use action_feed::database::Database;
use axum::Router;

/// Setup an in-memory SQLite database for testing
pub async fn setup_test_db() -> Database {
    Database::new_in_memory().await.expect("Failed to create test database")
}

/// Router wired to a fresh in-memory database; the handle is returned for assertions
pub async fn setup_test_app() -> (Router, Database) {
    let database = setup_test_db().await;
    let app = action_feed::server::build_router(AppConfig::default(), database.clone());
    (app, database)
}

/// Create a test event record
pub fn create_test_record(request_id: &str, action: Action) -> EventRecord {
    EventRecord {
        request_id: request_id.to_string(),
        author: Some("alice".to_string()),
        action,
        to_branch: Some("main".to_string()),
        from_branch: None,
        timestamp: "2nd January 2024 - 03:30 PM UTC".to_string(),
    }
}

/// Mock GitHub webhook payloads
pub mod github_mocks {
    use serde_json::Value;

    pub fn push_payload(after: &str, git_ref: &str, timestamp: &str) -> Value {
        serde_json::json!({
            "ref": git_ref,
            "before": "0000000000000000000000000000000000000000",
            "after": after,
            "repository": {
                "full_name": "octo-org/webhook-repo"
            },
            "head_commit": {
                "id": after,
                "message": "Update README",
                "timestamp": timestamp
            },
            "sender": {
                "login": "alice"
            }
        })
    }

    pub fn pull_request_payload(id: u64, merged: bool, updated_at: &str) -> Value {
        serde_json::json!({
            "action": if merged { "closed" } else { "opened" },
            "number": 7,
            "pull_request": {
                "id": id,
                "number": 7,
                "merged": merged,
                "head": {
                    "ref": "feature/login",
                    "sha": "def456"
                },
                "base": {
                    "ref": "main"
                },
                "updated_at": updated_at
            },
            "repository": {
                "full_name": "octo-org/webhook-repo"
            },
            "sender": {
                "login": "bob"
            }
        })
    }
}
