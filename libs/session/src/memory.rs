use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;

use crate::ContactStore;

#[derive(Default)]
pub struct MemoryContactStore {
    seen: DashMap<String, ()>,
}

impl MemoryContactStore {
    pub fn new() -> Self {
        Self {
            seen: DashMap::new(),
        }
    }
}

#[async_trait]
impl ContactStore for MemoryContactStore {
    async fn first_contact(&self, sender_id: &str) -> Result<bool> {
        Ok(self.seen.insert(sender_id.to_string(), ()).is_none())
    }
}
