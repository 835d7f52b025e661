use axum::{extract::State, response::Json};
use serde_json::Value;
use tracing::debug;

use crate::config::AppConfig;
use crate::database::models::EventRecord;
use crate::database::Database;
use crate::error::FeedError;

/// `GET /api/actions-list`: every stored record, newest first.
pub async fn list_actions(
    State((_config, database)): State<(AppConfig, Database)>,
) -> Result<Json<Vec<EventRecord>>, FeedError> {
    let records = database.list_events().await?;
    debug!("Serving {} actions", records.len());
    Ok(Json(records))
}

pub async fn health_check() -> Json<Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "action-feed",
        "timestamp": chrono::Utc::now()
    }))
}
