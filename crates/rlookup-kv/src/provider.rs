use std::sync::Arc;

use rlookup_core::{ClientProvider, KvClient, StoreError};

use crate::client::RedisKv;
use crate::flight::SingleFlight;

/// Connects to Redis on first use and shares the connection across requests
pub struct RedisProvider {
    url: Option<String>,
    flight: SingleFlight<Arc<RedisKv>>,
}

impl RedisProvider {
    pub fn new(url: Option<String>) -> Self {
        Self {
            url,
            flight: SingleFlight::new(),
        }
    }
}

#[async_trait::async_trait]
impl ClientProvider for RedisProvider {
    async fn client(&self) -> Result<Arc<dyn KvClient>, StoreError> {
        let Some(url) = self.url.clone() else {
            return Err(StoreError::NotConfigured("REDIS_URL is not defined".to_string()));
        };

        let client = self
            .flight
            .get_or_connect(
                |client| client.is_connected(),
                move || async move {
                    tracing::info!("Connecting to Redis");
                    let client = RedisKv::connect(&url)
                        .await
                        .inspect_err(|e| tracing::error!("Failed to connect to Redis: {e}"))?;
                    tracing::info!("Redis connection established");
                    Ok::<_, StoreError>(Arc::new(client))
                },
            )
            .await?;

        Ok(client)
    }
}
