use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;
use tracing::error;

impl From<serde_json::Error> for FeedError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedJson(err.to_string())
    }
}

impl From<sqlx::Error> for FeedError {
    fn from(err: sqlx::Error) -> Self {
        Self::DatabaseError(err.to_string())
    }
}

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Request body missing or empty.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Request body present but not parseable as JSON.
    #[error("Malformed JSON: {0}")]
    MalformedJson(String),

    /// Payload present but a required field is missing or unparsable.
    #[error("Format error: {0}")]
    FormatError(String),

    #[error("Unsupported event type: {0}")]
    UnsupportedEvent(String),
}

impl FeedError {
    pub fn no_data() -> Self {
        Self::ValidationError("No data".to_string())
    }

    pub fn missing_field(event: &str, field: &str) -> Self {
        Self::FormatError(format!("{} payload is missing `{}`", event, field))
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::ValidationError(_) | Self::MalformedJson(_) => StatusCode::BAD_REQUEST,
            Self::FormatError(_) | Self::UnsupportedEvent(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::DatabaseError(_) | Self::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Reason string returned to the caller. Server-side failures are not echoed.
    pub fn public_reason(&self) -> String {
        match self {
            Self::ValidationError(reason) => reason.clone(),
            Self::MalformedJson(_) => "Malformed JSON".to_string(),
            Self::FormatError(_) | Self::UnsupportedEvent(_) => self.to_string(),
            Self::DatabaseError(_) | Self::ConfigError(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for FeedError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }
        (status, Json(serde_json::json!({ "error": self.public_reason() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_data_maps_to_bad_request() {
        let err = FeedError::no_data();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.public_reason(), "No data");
    }

    #[test]
    fn test_malformed_json_reason_is_short() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = FeedError::from(parse_err);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.public_reason(), "Malformed JSON");
    }

    #[test]
    fn test_format_errors_are_client_errors() {
        let err = FeedError::missing_field("push", "after");
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.public_reason(), "Format error: push payload is missing `after`");

        let err = FeedError::UnsupportedEvent("issues".to_string());
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.public_reason(), "Unsupported event type: issues");
    }

    #[test]
    fn test_validation_reason_is_returned_whole() {
        let err = FeedError::ValidationError("Body rejected: empty array".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.public_reason(), "Body rejected: empty array");
    }

    #[test]
    fn test_database_errors_are_not_echoed() {
        let err = FeedError::from(sqlx::Error::PoolTimedOut);
        assert_eq!(err.to_string().matches("Database error").count(), 1);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_reason(), "Internal server error");
    }
}
