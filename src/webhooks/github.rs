use axum::{
    body::Bytes,
    extract::State,
    http::HeaderMap,
    response::Json,
};
use serde_json::Value;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::database::models::InsertOutcome;
use crate::database::Database;
use crate::error::FeedError;
use crate::webhooks::normalizer::{self, WebhookEvent};

pub const EVENT_HEADER: &str = "x-github-event";

/// `POST /webhook/receiver`
///
/// Runs the dedup protocol: existence check first, insert only when absent.
/// Two racing deliveries of the same event are caught by the insert itself.
pub async fn handle_webhook(
    State((_config, database)): State<(AppConfig, Database)>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, FeedError> {
    let event = WebhookEvent::from_header(
        headers
            .get(EVENT_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(""),
    );

    let payload = parse_body(&body)?;

    info!("Received webhook: {}", event.name());

    let record = normalizer::normalize(&event, &payload).map_err(|e| {
        warn!("Rejected {} webhook: {}", event.name(), e);
        e
    })?;

    if database
        .event_exists(&record.request_id, record.action)
        .await?
    {
        info!("Duplicate {} event {}", record.action, record.request_id);
        return Ok(Json(serde_json::json!({ "status": InsertOutcome::Duplicate.status() })));
    }

    let outcome = database.insert_event(&record).await?;
    if outcome == InsertOutcome::Duplicate {
        warn!(
            "Concurrent delivery of {} event {} already stored",
            record.action, record.request_id
        );
    }

    Ok(Json(serde_json::json!({ "status": outcome.status() })))
}

fn parse_body(body: &[u8]) -> Result<Value, FeedError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(FeedError::no_data());
    }
    Ok(serde_json::from_slice(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_body_is_no_data() {
        for body in [&b""[..], &b"  \n"[..]] {
            let err = parse_body(body).unwrap_err();
            assert_eq!(err.public_reason(), "No data");
        }
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        let err = parse_body(b"{\"after\":").unwrap_err();
        assert_eq!(err.public_reason(), "Malformed JSON");
    }

    #[test]
    fn test_null_body_parses_to_null() {
        assert_eq!(parse_body(b"null").unwrap(), Value::Null);
    }
}
