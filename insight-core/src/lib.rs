pub mod blocks;
pub mod session;

// Re-export the main entry points so users can just use `insight_core::segment`
pub use blocks::{Block, Segmenter, segment};
pub use session::{ChatMessage, ChatSession, HistoryEntry, MessageId, PendingTurn, Role};
