use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use futures_util::TryStreamExt;
use rlookup_completion::CompletionRequest;
use serde::Deserialize;

use crate::error::ApiError;
use crate::handlers::parse_body;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CompletionBody {
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub language: String,
}

/// Stream the model's reply as plain text while it is generated.
///
/// Upstream failures before the first token become an error status. A failure
/// mid-stream aborts the body so the client sees an incomplete response.
pub async fn complete(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let body: CompletionBody = parse_body(&body)?;
    let request = CompletionRequest {
        prompt: body.prompt,
        language: body.language,
    };

    tracing::info!(language = %request.language, "Completion requested");

    let tokens = state.completion.stream(&request).await?;
    let tokens = tokens.inspect_err(|e| tracing::error!("Completion stream failed: {e}"));

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        Body::from_stream(tokens),
    )
        .into_response())
}
