//! Maps raw GitHub webhook payloads onto [`EventRecord`]s

use serde_json::Value;
use tracing::warn;

use crate::database::models::EventRecord;
use crate::error::FeedError;
use crate::webhooks::{pull_request, push};

/// Event types the feed understands, keyed off the `X-GitHub-Event` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookEvent {
    Push,
    PullRequest,
    Unsupported(String),
}

impl WebhookEvent {
    pub fn from_header(event_type: &str) -> Self {
        match event_type.trim() {
            "push" => WebhookEvent::Push,
            "pull_request" => WebhookEvent::PullRequest,
            other => WebhookEvent::Unsupported(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            WebhookEvent::Push => "push",
            WebhookEvent::PullRequest => "pull_request",
            WebhookEvent::Unsupported(name) => name,
        }
    }
}

/// A payload that carries nothing to normalize: `null`, `false`, zero, or an
/// empty string, array or object.
pub fn is_empty_payload(payload: &Value) -> bool {
    match payload {
        Value::Null | Value::Bool(false) => true,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(true) => false,
    }
}

/// Normalize a payload for the given event.
///
/// Empty payloads fail validation before the event type is looked at;
/// unsupported events are rejected before any field extraction.
pub fn normalize(event: &WebhookEvent, payload: &Value) -> Result<EventRecord, FeedError> {
    if is_empty_payload(payload) {
        return Err(FeedError::no_data());
    }
    if !payload.is_object() {
        return Err(FeedError::FormatError(
            "Webhook payload must be a JSON object".to_string(),
        ));
    }

    let author = payload
        .pointer("/sender/login")
        .and_then(|l| l.as_str())
        .map(str::to_string);

    match event {
        WebhookEvent::Push => push::normalize_push(payload, author),
        WebhookEvent::PullRequest => pull_request::normalize_pull_request(payload, author),
        WebhookEvent::Unsupported(name) => {
            warn!("Rejecting unsupported webhook event: {:?}", name);
            let name = if name.is_empty() { "<missing>" } else { name.as_str() };
            Err(FeedError::UnsupportedEvent(name.to_string()))
        }
    }
}
