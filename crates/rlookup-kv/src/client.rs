use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::{AsyncCommands, RedisError, RedisResult};
use rlookup_core::{KvClient, StoreError};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const RESPONSE_TIMEOUT: Duration = Duration::from_secs(5);

// Reconnect delay is factor * base^attempt milliseconds, capped
const RECONNECT_FACTOR_MS: u64 = 100;
const RECONNECT_EXPONENT_BASE: u64 = 2;
const RECONNECT_MAX_DELAY_MS: u64 = 5000;
const RECONNECT_RETRIES: usize = 6;

/// Whether the last command reached the server.
///
/// Starts connected. A connection-level failure flips it off so the provider
/// builds a fresh client; any later success flips it back.
#[derive(Debug)]
pub(crate) struct LinkState {
    connected: AtomicBool,
}

impl LinkState {
    pub(crate) fn new() -> Self {
        Self {
            connected: AtomicBool::new(true),
        }
    }

    pub(crate) fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Relaxed)
    }

    /// Convert a command result, marking the link down on transport failures
    pub(crate) fn track<T>(&self, result: RedisResult<T>) -> Result<T, StoreError> {
        match result {
            Ok(value) => {
                self.connected.store(true, Ordering::Relaxed);
                Ok(value)
            }
            Err(e) if is_connection_error(&e) => {
                tracing::warn!("Redis connection error: {e}");
                self.connected.store(false, Ordering::Relaxed);
                Err(StoreError::Connection(e.to_string()))
            }
            Err(e) => Err(StoreError::Command(e.to_string())),
        }
    }
}

fn is_connection_error(e: &RedisError) -> bool {
    e.is_io_error() || e.is_connection_dropped() || e.is_connection_refusal() || e.is_timeout()
}

/// Redis-backed key-value client. The connection manager reconnects with
/// backoff on its own.
pub struct RedisKv {
    manager: ConnectionManager,
    link: LinkState,
}

impl RedisKv {
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let client = redis::Client::open(url)
            .map_err(|e| StoreError::Connection(format!("Invalid Redis URL: {e}")))?;

        let config = ConnectionManagerConfig::new()
            .set_factor(RECONNECT_FACTOR_MS)
            .set_exponent_base(RECONNECT_EXPONENT_BASE)
            .set_max_delay(RECONNECT_MAX_DELAY_MS)
            .set_number_of_retries(RECONNECT_RETRIES)
            .set_connection_timeout(CONNECT_TIMEOUT)
            .set_response_timeout(RESPONSE_TIMEOUT);

        let manager = ConnectionManager::new_with_config(client, config)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        Ok(Self {
            manager,
            link: LinkState::new(),
        })
    }
}

#[async_trait::async_trait]
impl KvClient for RedisKv {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.manager.clone();
        let result: RedisResult<Option<String>> = conn.get(key).await;
        self.link.track(result)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut conn = self.manager.clone();
        let result: RedisResult<()> = conn.set(key, value).await;
        self.link.track(result)
    }

    async fn delete(&self, key: &str) -> Result<u64, StoreError> {
        let mut conn = self.manager.clone();
        let result: RedisResult<u64> = conn.del(key).await;
        self.link.track(result)
    }

    fn is_connected(&self) -> bool {
        self.link.is_connected()
    }
}
