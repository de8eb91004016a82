use axum::Json;
use axum::body::Bytes;
use rlookup_core::extract_word_info;
use rlookup_types::WordInfo;
use serde::Deserialize;

use crate::error::ApiError;
use crate::handlers::parse_body;

#[derive(Debug, Deserialize)]
pub struct ExtractBody {
    pub completion: Option<String>,
}

/// Headword and pronunciation of a finished completion
pub async fn extract(body: Bytes) -> Result<Json<WordInfo>, ApiError> {
    let body: ExtractBody = parse_body(&body)?;
    let completion = body
        .completion
        .ok_or_else(|| ApiError::bad_request("completion is required"))?;

    extract_word_info(&completion)
        .map(Json)
        .ok_or_else(|| ApiError::not_found("No word found in completion"))
}
