/// Failures talking to the key-value store.
///
/// Cloneable so that a single connection attempt can report the same failure
/// to every caller waiting on it.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    #[error("Store not configured: {0}")]
    NotConfigured(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Command failed: {0}")]
    Command(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("Invalid admin password")]
    Unauthorized,

    #[error(transparent)]
    Store(#[from] StoreError),
}
