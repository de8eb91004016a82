use serde::{Deserialize, Serialize};

/// One past lookup, as persisted in the history list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub id: String,
    pub word: String,
    /// Description the user typed
    pub description: String,
    pub language: String,
    /// Milliseconds since the unix epoch
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pronunciation: Option<String>,
    /// Full model reply, cached so a history entry can be shown again without a new call
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion: Option<String>,
}

/// A history entry before an id has been assigned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewHistoryItem {
    pub word: String,
    pub description: String,
    pub language: String,
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pronunciation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion: Option<String>,
}

impl NewHistoryItem {
    pub fn with_id(self, id: String) -> HistoryItem {
        HistoryItem {
            id,
            word: self.word,
            description: self.description,
            language: self.language,
            timestamp: self.timestamp,
            pronunciation: self.pronunciation,
            completion: self.completion,
        }
    }
}

impl HistoryItem {
    /// Two entries collide when they name the same word (ignoring case) in the same language
    pub fn same_entry(&self, other: &HistoryItem) -> bool {
        self.language == other.language && self.word.to_lowercase() == other.word.to_lowercase()
    }
}

/// Headword and optional pronunciation pulled out of a completion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordInfo {
    pub word: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pronunciation: Option<String>,
}
