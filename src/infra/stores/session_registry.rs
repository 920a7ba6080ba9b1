use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::memory_store::MemoryStore;
use crate::domain::ports::KeyValueStore;

/// Session-scoped stores keyed by browser session id. Nothing here is
/// persisted, so every session ends with the process.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, Arc<MemoryStore>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the store for `session_id`, creating an empty one on first use.
    pub async fn open(&self, session_id: &str) -> Arc<dyn KeyValueStore> {
        if let Some(store) = self.sessions.read().await.get(session_id) {
            return store.clone();
        }

        let mut sessions = self.sessions.write().await;
        sessions
            .entry(session_id.to_string())
            .or_insert_with(|| Arc::new(MemoryStore::new()))
            .clone()
    }
}
