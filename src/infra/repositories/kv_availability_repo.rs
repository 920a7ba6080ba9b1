use crate::domain::{
    models::availability::Availability,
    ports::{AvailabilityRepository, KeyValueStore},
};
use crate::error::AppError;
use super::{load_collection, save_collection, AVAILABILITY_KEY};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Availability records keyed by the professional id rendered as a string.
type AvailabilityMap = HashMap<String, Availability>;

pub struct KvAvailabilityRepo {
    store: Arc<dyn KeyValueStore>,
    write_lock: Mutex<()>,
}

impl KvAvailabilityRepo {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store, write_lock: Mutex::new(()) }
    }
}

#[async_trait]
impl AvailabilityRepository for KvAvailabilityRepo {
    async fn get(&self, professional_id: i64) -> Result<Availability, AppError> {
        let all: AvailabilityMap = load_collection(self.store.as_ref(), AVAILABILITY_KEY).await?;
        Ok(all.get(&professional_id.to_string()).copied().unwrap_or_default())
    }

    async fn set(&self, professional_id: i64, availability: &Availability) -> Result<(), AppError> {
        availability.validate()?;

        let _guard = self.write_lock.lock().await;
        let mut all: AvailabilityMap = load_collection(self.store.as_ref(), AVAILABILITY_KEY).await?;
        all.insert(professional_id.to_string(), *availability);
        save_collection(self.store.as_ref(), AVAILABILITY_KEY, &all).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::stores::memory_store::MemoryStore;
    use chrono::NaiveTime;

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[tokio::test]
    async fn missing_record_falls_back_to_default() {
        let repo = KvAvailabilityRepo::new(Arc::new(MemoryStore::new()));
        assert_eq!(repo.get(2).await.unwrap(), Availability::default());
    }

    #[tokio::test]
    async fn set_replaces_whole_record_under_string_key() {
        let store = Arc::new(MemoryStore::new());
        let repo = KvAvailabilityRepo::new(store.clone());

        repo.set(2, &Availability::new(at(9, 0), at(12, 0), 30).unwrap()).await.unwrap();
        let replacement = Availability::new(at(13, 0), at(17, 30), 45).unwrap();
        repo.set(2, &replacement).await.unwrap();

        assert_eq!(repo.get(2).await.unwrap(), replacement);
        let raw = store.get(AVAILABILITY_KEY).await.unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["2"]["startTime"], "13:00");
        assert_eq!(json["2"]["interval"], 45);
    }

    #[tokio::test]
    async fn invalid_window_is_not_stored() {
        let repo = KvAvailabilityRepo::new(Arc::new(MemoryStore::new()));
        let bad = Availability { start_time: at(9, 0), end_time: at(12, 0), interval: 0 };

        assert!(matches!(repo.set(2, &bad).await, Err(AppError::InvalidInterval)));
        assert_eq!(repo.get(2).await.unwrap(), Availability::default());
    }
}
