use std::sync::Arc;

use rlookup_completion::{CompletionProvider, OpenAiCompletion, ProviderMetadata};
use rlookup_config::Config;
use rlookup_config::completion::CompletionConfig;
use rlookup_core::{ClientProvider, HistoryStore, MemoryKv, MemoryProvider};
use rlookup_kv::RedisProvider;

/// Shared by every request handler
#[derive(Clone)]
pub struct AppState {
    pub history: Arc<HistoryStore>,
    pub completion: Arc<dyn CompletionProvider>,
}

impl AppState {
    pub fn new(history: Arc<HistoryStore>, completion: Arc<dyn CompletionProvider>) -> Self {
        Self {
            history,
            completion,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let provider: Arc<dyn ClientProvider> = match &config.store.redis_url {
            Some(url) => Arc::new(RedisProvider::new(Some(url.clone()))),
            None => {
                tracing::warn!("REDIS_URL is not set, history is kept in process memory only");
                Arc::new(MemoryProvider::new(Arc::new(MemoryKv::new())))
            }
        };

        if config.store.uses_default_password() {
            tracing::warn!("ADMIN_PASSWORD is not set, using the default admin password");
        }

        let completion = OpenAiCompletion::new(&config.completion);
        let metadata = completion.metadata();
        if missing_api_key(&metadata, &config.completion) {
            tracing::warn!("OPENAI_API_KEY is not set, completions will fail");
        }

        tracing::info!(provider = %metadata.name, model = %metadata.model, "Completion provider ready");

        Self::new(
            Arc::new(HistoryStore::new(provider, config.store.admin_password.clone())),
            Arc::new(completion),
        )
    }
}

fn missing_api_key(metadata: &ProviderMetadata, config: &CompletionConfig) -> bool {
    metadata.requires_api_key && config.api_key.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(requires_api_key: bool) -> ProviderMetadata {
        ProviderMetadata {
            name: "openai".to_string(),
            model: "gpt-4".to_string(),
            requires_api_key,
        }
    }

    #[test]
    fn test_missing_api_key() {
        let mut config = CompletionConfig::default();
        assert!(missing_api_key(&metadata(true), &config));
        assert!(!missing_api_key(&metadata(false), &config));

        config.api_key = "sk-test".to_string();
        assert!(!missing_api_key(&metadata(true), &config));
    }
}
