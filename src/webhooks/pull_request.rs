use serde_json::Value;
use tracing::debug;

use crate::database::models::{Action, EventRecord};
use crate::error::FeedError;
use crate::webhooks::timestamp;

/// Normalize a `pull_request` payload.
///
/// A merged pull request is recorded as `MERGE`, anything else as
/// `PULL_REQUEST`; both share the pull request id as request id.
pub fn normalize_pull_request(
    payload: &Value,
    author: Option<String>,
) -> Result<EventRecord, FeedError> {
    let pr = payload
        .get("pull_request")
        .filter(|pr| pr.is_object())
        .ok_or_else(|| FeedError::missing_field("pull_request", "pull_request"))?;

    let merged = pr.get("merged").and_then(|m| m.as_bool()).unwrap_or(false);
    let action = if merged {
        Action::Merge
    } else {
        Action::PullRequest
    };

    let request_id = match pr.get("id") {
        Some(Value::Number(id)) => id.to_string(),
        Some(Value::String(id)) if !id.is_empty() => id.clone(),
        _ => return Err(FeedError::missing_field("pull_request", "pull_request.id")),
    };

    let from_branch = pr
        .pointer("/head/ref")
        .and_then(|r| r.as_str())
        .map(str::to_string);

    let to_branch = pr
        .pointer("/base/ref")
        .and_then(|r| r.as_str())
        .map(str::to_string);

    let raw_timestamp = pr
        .get("updated_at")
        .and_then(|t| t.as_str())
        .ok_or_else(|| FeedError::missing_field("pull_request", "pull_request.updated_at"))?;

    debug!(
        "Pull request {} {:?} -> {:?} ({})",
        request_id, from_branch, to_branch, action
    );

    Ok(EventRecord {
        request_id,
        author,
        action,
        to_branch,
        from_branch,
        timestamp: timestamp::format_timestamp(raw_timestamp)?,
    })
}
