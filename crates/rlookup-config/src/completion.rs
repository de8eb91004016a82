use serde::{Deserialize, Serialize};

use crate::{env_non_empty, env_parse};

fn default_api_url() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_model() -> String {
    "gpt-4".to_string()
}

fn default_max_tokens() -> u32 {
    500
}

fn default_temperature() -> f32 {
    0.1
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct CompletionConfig {
    #[serde(skip_serializing)]
    pub api_key: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: default_api_url(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }
}

impl CompletionConfig {
    pub fn new() -> Self {
        Self {
            api_key: env_non_empty("OPENAI_API_KEY").unwrap_or_default(),
            api_url: env_non_empty("OPENAI_API_URL").unwrap_or_else(default_api_url),
            model: env_non_empty("OPENAI_MODEL").unwrap_or_else(default_model),
            max_tokens: env_parse("COMPLETION_MAX_TOKENS", default_max_tokens()),
            temperature: env_parse("COMPLETION_TEMPERATURE", default_temperature()),
        }
    }
}
