//! HTTP handlers, one module per resource

pub mod completion;
pub mod extract;
pub mod history;
pub mod page;
pub mod suggest;

use axum::body::Bytes;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Parse a JSON request body whatever its declared content type
pub fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!("Rejected request body: {e}");
        ApiError::bad_request(format!("Invalid JSON body: {e}"))
    })
}
