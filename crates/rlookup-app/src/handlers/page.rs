use axum::Json;
use axum::response::Html;
use serde::Serialize;

/// Target languages offered by the lookup form
pub const LANGUAGES: &[&str] = &[
    "English",
    "Spanish",
    "French",
    "German",
    "Italian",
    "Portuguese",
    "Japanese",
    "Korean",
    "Chinese",
    "Hindi",
    "Russian",
    "Nepali",
];

const INDEX_HTML: &str = include_str!("../../static/index.html");

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct LanguagesResponse {
    pub languages: &'static [&'static str],
}

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub async fn languages() -> Json<LanguagesResponse> {
    Json(LanguagesResponse {
        languages: LANGUAGES,
    })
}
