pub mod error;
pub mod extract;
pub mod history;
pub mod kv;
pub mod memory;

pub use error::{HistoryError, StoreError};
pub use extract::extract_word_info;
pub use history::{HISTORY_KEY, HistoryStore, MAX_HISTORY_ITEMS};
pub use kv::{ClientProvider, KvClient};
pub use memory::{MemoryKv, MemoryProvider};
