use async_trait::async_trait;
use futures_util::future;
use futures_util::stream::{self, Stream, StreamExt};
use rlookup_config::completion::CompletionConfig;
use serde::Serialize;

use crate::prompt::{ChatMessage, build_messages};
use crate::sse::{EventDecoder, StreamDelta};
use crate::{
    CompletionError, CompletionProvider, CompletionRequest, ProviderMetadata, TokenStream,
    error_for_status,
};

/// OpenAI-compatible chat-completion client
#[derive(Clone)]
pub struct OpenAiCompletion {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    stream: bool,
    max_tokens: u32,
    temperature: f32,
}

impl OpenAiCompletion {
    pub fn new(config: &CompletionConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config.api_key.clone(),
            api_url: config.api_url.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }
}

#[async_trait]
impl CompletionProvider for OpenAiCompletion {
    async fn stream(&self, request: &CompletionRequest) -> Result<TokenStream, CompletionError> {
        request.validate()?;

        if self.api_key.is_empty() {
            return Err(CompletionError::AuthenticationError);
        }

        let body = ChatRequest {
            model: &self.model,
            messages: build_messages(&request.prompt, &request.language),
            stream: true,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        tracing::debug!(
            model = %self.model,
            language = %request.language,
            "Requesting completion"
        );

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(error_for_status(status.as_u16(), &detail));
        }

        Ok(token_stream(response.bytes_stream()))
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "openai".to_string(),
            model: self.model.clone(),
            requires_api_key: true,
        }
    }
}

/// Turn raw event-stream chunks into reply text, stopping at `[DONE]`
pub(crate) fn token_stream<S, B, E>(chunks: S) -> TokenStream
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + 'static,
    E: Into<CompletionError> + 'static,
{
    let mut decoder = EventDecoder::default();

    chunks
        .map(move |chunk| match chunk {
            Ok(bytes) => decoder.feed(bytes.as_ref()),
            Err(e) => vec![Err(e.into())],
        })
        .flat_map(stream::iter)
        .take_while(|item| future::ready(!matches!(item, Ok(StreamDelta::Done))))
        .filter_map(|item| {
            future::ready(match item {
                Ok(StreamDelta::Text(text)) => Some(Ok(text)),
                Ok(StreamDelta::Done) => None,
                Err(e) => Some(Err(e)),
            })
        })
        .boxed()
}
