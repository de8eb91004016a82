//! Recency-ordered lookup history kept under a single store key.
//!
//! Every write reads the whole list, transforms it and writes it back. There is
//! no locking: two concurrent appends can interleave and the later write wins,
//! dropping the other entry.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use rlookup_types::{HistoryItem, NewHistoryItem};
use uuid::Uuid;

use crate::error::{HistoryError, StoreError};
use crate::kv::{ClientProvider, KvClient};

/// Key holding the serialized history list
pub const HISTORY_KEY: &str = "wordHistory";

/// Longest the list may be after a write
pub const MAX_HISTORY_ITEMS: usize = 20;

pub struct HistoryStore {
    provider: Arc<dyn ClientProvider>,
    admin_password: String,
}

impl HistoryStore {
    pub fn new(provider: Arc<dyn ClientProvider>, admin_password: impl Into<String>) -> Self {
        Self {
            provider,
            admin_password: admin_password.into(),
        }
    }

    /// Record a lookup at the front of the history.
    ///
    /// Returns `false` when the store could not be written; the error is logged.
    pub async fn append(&self, candidate: NewHistoryItem) -> bool {
        match self.try_append(candidate).await {
            Ok(item) => {
                tracing::debug!(id = %item.id, word = %item.word, "Saved history entry");
                true
            }
            Err(e) => {
                tracing::error!("Error saving to history: {e}");
                false
            }
        }
    }

    /// Stored history, most recent first. Empty on any failure
    pub async fn read_all(&self) -> Vec<HistoryItem> {
        match self.try_read_all().await {
            Ok(history) => history,
            Err(e) => {
                tracing::error!("Error getting history: {e}");
                Vec::new()
            }
        }
    }

    /// Delete the whole history if `password` matches the admin secret
    pub async fn clear_all(&self, password: &str) -> bool {
        match self.try_clear(password).await {
            Ok(()) => true,
            Err(HistoryError::Unauthorized) => {
                tracing::debug!("Rejected history clear: wrong password");
                false
            }
            Err(HistoryError::Store(e)) => {
                tracing::error!("Error clearing history: {e}");
                false
            }
        }
    }

    /// Like [`clear_all`](Self::clear_all) but tells a wrong password apart from a store failure.
    ///
    /// The store is not touched when the password does not match.
    pub async fn try_clear(&self, password: &str) -> Result<(), HistoryError> {
        if password != self.admin_password {
            return Err(HistoryError::Unauthorized);
        }

        let client = self.provider.client().await?;
        let removed = client.delete(HISTORY_KEY).await?;
        tracing::info!("History cleared ({removed} key removed)");
        Ok(())
    }

    async fn try_append(&self, candidate: NewHistoryItem) -> Result<HistoryItem, StoreError> {
        let client = self.provider.client().await?;
        let item = candidate.with_id(generate_id());

        let history = load(client.as_ref()).await.unwrap_or_else(|e| {
            tracing::warn!("Could not read existing history, starting fresh: {e}");
            Vec::new()
        });

        let updated = merge_entry(item.clone(), history);
        let raw = serde_json::to_string(&updated)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        client.set(HISTORY_KEY, &raw).await?;
        Ok(item)
    }

    async fn try_read_all(&self) -> Result<Vec<HistoryItem>, StoreError> {
        let client = self.provider.client().await?;
        load(client.as_ref()).await
    }
}

async fn load(client: &dyn KvClient) -> Result<Vec<HistoryItem>, StoreError> {
    match client.get(HISTORY_KEY).await? {
        Some(raw) => {
            serde_json::from_str(&raw).map_err(|e| StoreError::Serialization(e.to_string()))
        }
        None => Ok(Vec::new()),
    }
}

/// Put `item` in front of `history`, drop later entries for the same word and
/// language, and cap the result at [`MAX_HISTORY_ITEMS`].
pub fn merge_entry(item: HistoryItem, history: Vec<HistoryItem>) -> Vec<HistoryItem> {
    let mut merged: Vec<HistoryItem> = Vec::with_capacity(MAX_HISTORY_ITEMS);

    for entry in std::iter::once(item).chain(history) {
        if merged.len() == MAX_HISTORY_ITEMS {
            break;
        }
        if !merged.iter().any(|kept| kept.same_entry(&entry)) {
            merged.push(entry);
        }
    }

    merged
}

/// Milliseconds since the unix epoch
pub fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or_default()
}

/// `<millis>-<7 random chars>`
fn generate_id() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}-{}", now_millis(), &suffix[..7])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryKv, MemoryProvider};

    struct NoStore;

    #[async_trait::async_trait]
    impl ClientProvider for NoStore {
        async fn client(&self) -> Result<Arc<dyn KvClient>, StoreError> {
            Err(StoreError::NotConfigured("no store in this test".to_string()))
        }
    }

    fn setup() -> (Arc<MemoryKv>, HistoryStore) {
        let kv = Arc::new(MemoryKv::new());
        let store = HistoryStore::new(Arc::new(MemoryProvider::new(kv.clone())), "secret");
        (kv, store)
    }

    fn candidate(word: &str, language: &str, timestamp: i64) -> NewHistoryItem {
        NewHistoryItem {
            word: word.to_string(),
            description: format!("description of {word}"),
            language: language.to_string(),
            timestamp,
            pronunciation: None,
            completion: None,
        }
    }

    #[tokio::test]
    async fn test_append_to_empty_store() {
        let (kv, store) = setup();

        let saved = store
            .append(NewHistoryItem {
                word: "test".to_string(),
                description: "a test".to_string(),
                language: "English".to_string(),
                timestamp: 123456789,
                pronunciation: None,
                completion: None,
            })
            .await;
        assert!(saved);

        let history = store.read_all().await;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].word, "test");
        assert_eq!(history[0].description, "a test");
        assert_eq!(history[0].language, "English");
        assert_eq!(history[0].timestamp, 123456789);
        assert!(!history[0].id.is_empty());

        let raw = kv.peek(HISTORY_KEY).unwrap();
        assert!(raw.starts_with('['));
    }

    #[tokio::test]
    async fn test_newest_entry_goes_first() {
        let (_kv, store) = setup();
        assert!(store.append(candidate("existing", "English", 100000)).await);
        assert!(store.append(candidate("test", "English", 123456789)).await);

        let history = store.read_all().await;
        let words: Vec<_> = history.iter().map(|h| h.word.as_str()).collect();
        assert_eq!(words, ["test", "existing"]);
    }

    #[tokio::test]
    async fn test_duplicate_word_keeps_latest_only() {
        let (_kv, store) = setup();
        let mut first = candidate("Apple", "English", 1);
        first.completion = Some("old reply".to_string());
        let mut second = candidate("apple", "English", 2);
        second.completion = Some("new reply".to_string());

        assert!(store.append(first).await);
        assert!(store.append(candidate("pear", "English", 3)).await);
        assert!(store.append(second).await);

        let history = store.read_all().await;
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].word, "apple");
        assert_eq!(history[0].timestamp, 2);
        assert_eq!(history[0].completion.as_deref(), Some("new reply"));
        assert_eq!(history[1].word, "pear");
    }

    #[tokio::test]
    async fn test_same_word_different_language_both_kept() {
        let (_kv, store) = setup();
        assert!(store.append(candidate("pan", "Spanish", 1)).await);
        assert!(store.append(candidate("pan", "English", 2)).await);
        assert_eq!(store.read_all().await.len(), 2);
    }

    #[tokio::test]
    async fn test_history_capped_at_twenty_most_recent() {
        let (_kv, store) = setup();
        for i in 0..25 {
            assert!(store.append(candidate(&format!("word{i}"), "English", i)).await);
        }

        let history = store.read_all().await;
        assert_eq!(history.len(), MAX_HISTORY_ITEMS);
        assert_eq!(history[0].word, "word24");
        assert_eq!(history[19].word, "word5");
    }

    #[tokio::test]
    async fn test_append_without_store_returns_false() {
        let store = HistoryStore::new(Arc::new(NoStore), "secret");
        assert!(!store.append(candidate("test", "English", 1)).await);
        assert!(store.read_all().await.is_empty());
    }

    #[tokio::test]
    async fn test_append_fails_when_store_unreachable() {
        let (kv, store) = setup();
        kv.set_unreachable(true);
        assert!(!store.append(candidate("test", "English", 1)).await);
    }

    #[tokio::test]
    async fn test_corrupt_value_reads_as_empty() {
        let (kv, store) = setup();
        kv.set(HISTORY_KEY, "not json").await.unwrap();
        assert!(store.read_all().await.is_empty());

        // The next write replaces the unreadable value
        assert!(store.append(candidate("fresh", "English", 1)).await);
        assert_eq!(store.read_all().await.len(), 1);
    }

    #[tokio::test]
    async fn test_clear_with_wrong_password_leaves_store() {
        let (kv, store) = setup();
        assert!(store.append(candidate("test", "English", 1)).await);
        let before = kv.peek(HISTORY_KEY);

        assert!(!store.clear_all("wrong").await);
        assert!(matches!(store.try_clear("wrong").await, Err(HistoryError::Unauthorized)));
        assert_eq!(kv.peek(HISTORY_KEY), before);
        assert_eq!(store.read_all().await.len(), 1);
    }

    #[tokio::test]
    async fn test_wrong_password_never_contacts_store() {
        let store = HistoryStore::new(Arc::new(NoStore), "secret");
        assert!(matches!(store.try_clear("nope").await, Err(HistoryError::Unauthorized)));
        assert!(matches!(store.try_clear("secret").await, Err(HistoryError::Store(_))));
    }

    #[tokio::test]
    async fn test_clear_with_password_empties_history() {
        let (_kv, store) = setup();
        assert!(store.append(candidate("test", "English", 1)).await);

        assert!(store.clear_all("secret").await);
        assert!(store.read_all().await.is_empty());
    }

    #[tokio::test]
    async fn test_clear_fails_when_store_unreachable() {
        let (kv, store) = setup();
        kv.set_unreachable(true);
        assert!(!store.clear_all("secret").await);
    }

    #[test]
    fn test_merge_drops_stale_duplicates_beyond_first() {
        let existing = vec![
            candidate("a", "English", 3).with_id("3".to_string()),
            candidate("A", "English", 2).with_id("2".to_string()),
            candidate("b", "English", 1).with_id("1".to_string()),
        ];
        let merged = merge_entry(candidate("b", "English", 4).with_id("4".to_string()), existing);
        let ids: Vec<_> = merged.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, ["4", "3"]);
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = generate_id();
        let b = generate_id();
        assert_ne!(a, b);
        let (millis, suffix) = a.split_once('-').unwrap();
        assert!(millis.parse::<i64>().is_ok());
        assert_eq!(suffix.len(), 7);
    }
}
