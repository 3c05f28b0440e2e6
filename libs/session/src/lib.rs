//! First-contact tracking for the welcome greeting.
//!
//! The store answers one question: has this sender messaged the bot before?
//! It is injected into the gateway so greeting behavior stays explicit and
//! testable; the bundled implementation is in-memory and per-process.

use anyhow::Result;
use async_trait::async_trait;

mod memory;

pub use memory::MemoryContactStore;

/// Tracks which senders have already contacted the bot.
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Records the sender and returns `true` when this was the first contact.
    async fn first_contact(&self, sender_id: &str) -> Result<bool>;
}
