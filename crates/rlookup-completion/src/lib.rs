use futures_util::stream::BoxStream;

mod openai;
pub mod prompt;
mod sse;

pub use openai::OpenAiCompletion;
pub use prompt::{ChatMessage, Role, build_messages};
pub use sse::{EventDecoder, StreamDelta};

/// Reply text as it arrives from the model
pub type TokenStream = BoxStream<'static, Result<String, CompletionError>>;

/// Completion provider interface
#[async_trait::async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Start a streamed completion for a reverse lookup.
    ///
    /// Fails before any text is produced when the upstream rejects the request;
    /// later failures surface as an `Err` item in the stream.
    async fn stream(&self, request: &CompletionRequest) -> Result<TokenStream, CompletionError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Description of the concept to find a word for
    pub prompt: String,
    /// Language the word should be in
    pub language: String,
}

impl CompletionRequest {
    pub fn validate(&self) -> Result<(), CompletionError> {
        if self.prompt.trim().is_empty() {
            return Err(CompletionError::InvalidRequest("prompt is required".to_string()));
        }
        if self.language.trim().is_empty() {
            return Err(CompletionError::InvalidRequest("language is required".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub model: String,
    pub requires_api_key: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Malformed stream frame: {0}")]
    MalformedFrame(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Authentication error")]
    AuthenticationError,
}

/// Map a non-success upstream status to an error
pub fn error_for_status(status: u16, body: &str) -> CompletionError {
    match status {
        401 | 403 => CompletionError::AuthenticationError,
        429 => CompletionError::RateLimitExceeded,
        _ => CompletionError::ApiError(format!("HTTP {status}: {}", body.trim())),
    }
}
