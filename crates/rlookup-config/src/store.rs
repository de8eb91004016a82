use serde::{Deserialize, Serialize};

use crate::env_non_empty;

fn default_admin_password() -> String {
    "admin".to_string()
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Redis connection URL. History lives in process memory when unset
    pub redis_url: Option<String>,
    /// Secret gating the clear-all operation
    #[serde(skip_serializing, default = "default_admin_password")]
    pub admin_password: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            redis_url: None,
            admin_password: default_admin_password(),
        }
    }
}

impl StoreConfig {
    pub fn new() -> Self {
        Self {
            redis_url: env_non_empty("REDIS_URL"),
            admin_password: env_non_empty("ADMIN_PASSWORD").unwrap_or_else(default_admin_password),
        }
    }

    pub fn uses_default_password(&self) -> bool {
        self.admin_password == default_admin_password()
    }
}
