use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rlookup_completion::CompletionError;
use serde_json::json;

/// Error reported to the HTTP caller as `{"error": message}`
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let payload = json!({ "error": self.message });
        (self.status, Json(payload)).into_response()
    }
}

impl From<CompletionError> for ApiError {
    fn from(e: CompletionError) -> Self {
        match e {
            CompletionError::InvalidRequest(msg) => {
                tracing::debug!("Invalid completion request: {msg}");
                Self::bad_request(msg)
            }
            CompletionError::RateLimitExceeded => {
                tracing::warn!("Completion API rate limit exceeded");
                Self::new(StatusCode::TOO_MANY_REQUESTS, e.to_string())
            }
            other => {
                tracing::error!("Completion request failed: {other}");
                Self::new(StatusCode::BAD_GATEWAY, other.to_string())
            }
        }
    }
}
