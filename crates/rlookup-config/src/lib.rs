use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use self::completion::CompletionConfig;
use self::server::ServerConfig;
use self::store::StoreConfig;

pub mod completion;
pub mod server;
pub mod store;

#[derive(Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub completion: CompletionConfig,

    /// `json`, `text`, or unset to pick from whether stdout is a terminal
    pub log_format: Option<String>,
}

impl Config {
    /// Read the whole configuration from the process environment
    pub fn new() -> Self {
        let log_format = env::var("LOG_FORMAT")
            .ok()
            .map(|v| v.trim().to_lowercase())
            .filter(|v| !v.is_empty());

        Config {
            server: ServerConfig::new(),
            store: StoreConfig::new(),
            completion: CompletionConfig::new(),

            log_format,
        }
    }
}

/// Parse an environment variable, falling back when it is unset or malformed
pub(crate) fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Non-empty environment variable
pub(crate) fn env_non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
