use serde_json::Value;
use tracing::debug;

use crate::database::models::{Action, EventRecord};
use crate::error::FeedError;
use crate::webhooks::timestamp;

/// Normalize a `push` payload.
///
/// The post-push commit hash identifies the event; the branch is the last
/// segment of the pushed ref.
pub fn normalize_push(payload: &Value, author: Option<String>) -> Result<EventRecord, FeedError> {
    let request_id = payload
        .get("after")
        .and_then(|v| v.as_str())
        .filter(|sha| !sha.is_empty())
        .ok_or_else(|| FeedError::missing_field("push", "after"))?;

    let to_branch = payload
        .get("ref")
        .and_then(|r| r.as_str())
        .map(branch_from_ref);

    let raw_timestamp = payload
        .pointer("/head_commit/timestamp")
        .and_then(|t| t.as_str())
        .ok_or_else(|| FeedError::missing_field("push", "head_commit.timestamp"))?;

    debug!("Push {} to {:?}", request_id, to_branch);

    Ok(EventRecord {
        request_id: request_id.to_string(),
        author,
        action: Action::Push,
        to_branch,
        from_branch: None,
        timestamp: timestamp::format_timestamp(raw_timestamp)?,
    })
}

/// `refs/heads/main` -> `main`
pub fn branch_from_ref(git_ref: &str) -> String {
    git_ref.rsplit('/').next().unwrap_or(git_ref).to_string()
}
