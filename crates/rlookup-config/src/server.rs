use serde::{Deserialize, Serialize};

use crate::{env_non_empty, env_parse};

#[derive(Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Permissive CORS for every origin
    pub cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            cors: false,
        }
    }
}

impl ServerConfig {
    pub fn new() -> Self {
        let defaults = Self::default();

        Self {
            host: env_non_empty("HOST").unwrap_or(defaults.host),
            port: env_parse("PORT", defaults.port),
            cors: env_parse("CORS", defaults.cors),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
