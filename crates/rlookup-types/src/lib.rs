pub mod types;

pub use types::{HistoryItem, NewHistoryItem, WordInfo};
