use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rlookup_core::HistoryError;
use rlookup_core::history::now_millis;
use rlookup_types::{HistoryItem, NewHistoryItem};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::handlers::{SuccessResponse, parse_body};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub history: Vec<HistoryItem>,
}

#[derive(Debug, Deserialize)]
pub struct AddHistoryBody {
    pub word: Option<String>,
    pub description: Option<String>,
    pub language: Option<String>,
    pub pronunciation: Option<String>,
    pub completion: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ClearHistoryBody {
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
struct ClearFailure {
    error: &'static str,
    success: bool,
}

/// Read failures are already swallowed by the store, so this is always 200
pub async fn list_history(State(state): State<AppState>) -> Json<HistoryResponse> {
    Json(HistoryResponse {
        history: state.history.read_all().await,
    })
}

pub async fn add_history(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SuccessResponse>, ApiError> {
    let body: AddHistoryBody = parse_body(&body)?;

    let (Some(word), Some(description), Some(language)) = (
        non_empty(body.word),
        non_empty(body.description),
        non_empty(body.language),
    ) else {
        return Err(ApiError::bad_request("Missing required fields"));
    };

    let saved = state
        .history
        .append(NewHistoryItem {
            word,
            description,
            language,
            timestamp: now_millis(),
            pronunciation: non_empty(body.pronunciation),
            completion: non_empty(body.completion),
        })
        .await;

    Ok(Json(SuccessResponse { success: saved }))
}

pub async fn clear_history(
    State(state): State<AppState>,
    body: Bytes,
) -> Response {
    let body: ClearHistoryBody = match serde_json::from_slice(&body) {
        Ok(body) => body,
        Err(e) => {
            tracing::debug!("Rejected clear request body: {e}");
            return failure(StatusCode::BAD_REQUEST, "Invalid JSON body");
        }
    };
    let Some(password) = non_empty(body.password) else {
        return failure(StatusCode::BAD_REQUEST, "Password required");
    };

    match state.history.try_clear(&password).await {
        Ok(()) => Json(SuccessResponse { success: true }).into_response(),
        Err(HistoryError::Unauthorized) => {
            tracing::warn!("History clear attempted with a wrong password");
            failure(StatusCode::UNAUTHORIZED, "Invalid password")
        }
        Err(HistoryError::Store(e)) => {
            tracing::error!("Error clearing history: {e}");
            failure(StatusCode::INTERNAL_SERVER_ERROR, "Failed to clear history")
        }
    }
}

fn failure(status: StatusCode, error: &'static str) -> Response {
    (
        status,
        Json(ClearFailure {
            error,
            success: false,
        }),
    )
        .into_response()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
