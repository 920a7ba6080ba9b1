use crate::domain::ports::KeyValueStore;
use crate::error::AppError;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Volatile store. Backs browser sessions, and the whole data set when
/// `DATABASE_URL=memory`.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.entries.write().await.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), AppError> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_get_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get("currentUserId").await.unwrap(), None);

        store.set("currentUserId", "4").await.unwrap();
        store.set("currentUserId", "5").await.unwrap();
        assert_eq!(store.get("currentUserId").await.unwrap().as_deref(), Some("5"));

        store.remove("currentUserId").await.unwrap();
        assert_eq!(store.get("currentUserId").await.unwrap(), None);
    }
}
