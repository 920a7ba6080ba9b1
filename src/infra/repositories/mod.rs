pub mod kv_availability_repo;
pub mod kv_booking_repo;
pub mod kv_user_repo;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{error, info};

use crate::domain::models::user::User;
use crate::domain::ports::KeyValueStore;
use crate::domain::services::defaults::demo_users;
use crate::error::AppError;

pub const USERS_KEY: &str = "users";
pub const BOOKINGS_KEY: &str = "bookings";
pub const AVAILABILITY_KEY: &str = "availability";

/// Last id handed out for each collection.
pub const USERS_SEQ_KEY: &str = "users:last_id";
pub const BOOKINGS_SEQ_KEY: &str = "bookings:last_id";

/// Reads a JSON collection. A missing key is an empty collection; malformed
/// content is an error.
pub(crate) async fn load_collection<T>(store: &dyn KeyValueStore, key: &str) -> Result<T, AppError>
where
    T: DeserializeOwned + Default,
{
    match store.get(key).await? {
        Some(raw) => serde_json::from_str(&raw).map_err(|e| {
            error!(key, "Stored collection is malformed: {}", e);
            AppError::Serialization(e)
        }),
        None => Ok(T::default()),
    }
}

pub(crate) async fn save_collection<T>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<(), AppError>
where
    T: Serialize + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw).await
}

/// Next id for a collection: one past both the persisted sequence and the
/// largest id already present, so data written without a sequence stays valid.
pub(crate) async fn next_id(store: &dyn KeyValueStore, seq_key: &str, max_existing: i64) -> Result<i64, AppError> {
    let last = match store.get(seq_key).await? {
        Some(raw) => raw.trim().parse::<i64>().map_err(|_| {
            AppError::InternalWithMsg(format!("Id sequence '{}' holds a non-numeric value", seq_key))
        })?,
        None => 0,
    };
    Ok(last.max(max_existing).max(0) + 1)
}

pub(crate) async fn commit_id(store: &dyn KeyValueStore, seq_key: &str, id: i64) -> Result<(), AppError> {
    store.set(seq_key, &id.to_string()).await
}

/// First-run bootstrap: demo accounts plus empty booking and availability collections.
pub async fn seed_defaults(store: &dyn KeyValueStore) -> Result<(), AppError> {
    if store.get(USERS_KEY).await?.is_none() {
        let users: Vec<User> = demo_users()
            .into_iter()
            .zip(1..)
            .map(|(data, id)| User::new(id, data))
            .collect();
        save_collection(store, USERS_KEY, &users).await?;
        commit_id(store, USERS_SEQ_KEY, users.len() as i64).await?;
        info!("Seeded {} demo accounts", users.len());
    }
    if store.get(BOOKINGS_KEY).await?.is_none() {
        store.set(BOOKINGS_KEY, "[]").await?;
    }
    if store.get(AVAILABILITY_KEY).await?.is_none() {
        store.set(AVAILABILITY_KEY, "{}").await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::stores::memory_store::MemoryStore;

    #[tokio::test]
    async fn seeds_once_and_keeps_existing_data() {
        let store = MemoryStore::new();
        seed_defaults(&store).await.unwrap();

        let users: Vec<User> = load_collection(&store, USERS_KEY).await.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(store.get(BOOKINGS_KEY).await.unwrap().as_deref(), Some("[]"));
        assert_eq!(store.get(AVAILABILITY_KEY).await.unwrap().as_deref(), Some("{}"));

        store.set(BOOKINGS_KEY, "[{\"marker\":1}]").await.unwrap();
        seed_defaults(&store).await.unwrap();
        assert_eq!(store.get(BOOKINGS_KEY).await.unwrap().as_deref(), Some("[{\"marker\":1}]"));
    }

    #[tokio::test]
    async fn next_id_never_falls_behind_existing_data() {
        let store = MemoryStore::new();
        assert_eq!(next_id(&store, USERS_SEQ_KEY, 0).await.unwrap(), 1);
        assert_eq!(next_id(&store, USERS_SEQ_KEY, 7).await.unwrap(), 8);

        commit_id(&store, USERS_SEQ_KEY, 20).await.unwrap();
        assert_eq!(next_id(&store, USERS_SEQ_KEY, 7).await.unwrap(), 21);
    }

    #[tokio::test]
    async fn malformed_collection_is_reported() {
        let store = MemoryStore::new();
        store.set(USERS_KEY, "{not json").await.unwrap();

        let result: Result<Vec<User>, AppError> = load_collection(&store, USERS_KEY).await;
        assert!(matches!(result, Err(AppError::Serialization(_))));
    }
}
