use crate::domain::{
    models::user::{NewUser, User},
    ports::{KeyValueStore, UserRepository},
};
use crate::error::AppError;
use super::{commit_id, load_collection, next_id, save_collection, USERS_KEY, USERS_SEQ_KEY};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

pub struct KvUserRepo {
    store: Arc<dyn KeyValueStore>,
    write_lock: Mutex<()>,
}

impl KvUserRepo {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store, write_lock: Mutex::new(()) }
    }

    async fn load(&self) -> Result<Vec<User>, AppError> {
        load_collection(self.store.as_ref(), USERS_KEY).await
    }
}

#[async_trait]
impl UserRepository for KvUserRepo {
    async fn list(&self) -> Result<Vec<User>, AppError> {
        self.load().await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self.load().await?.into_iter().find(|u| u.email == email))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self.load().await?.into_iter().find(|u| u.id == id))
    }

    async fn list_professionals(&self) -> Result<Vec<User>, AppError> {
        Ok(self.load().await?.into_iter().filter(User::is_professional).collect())
    }

    async fn create(&self, data: NewUser) -> Result<User, AppError> {
        let _guard = self.write_lock.lock().await;

        let mut users = self.load().await?;
        if users.iter().any(|u| u.email == data.email) {
            return Err(AppError::DuplicateEmail);
        }

        let max_existing = users.iter().map(|u| u.id).max().unwrap_or(0);
        let id = next_id(self.store.as_ref(), USERS_SEQ_KEY, max_existing).await?;

        let user = User::new(id, data);
        users.push(user.clone());

        save_collection(self.store.as_ref(), USERS_KEY, &users).await?;
        commit_id(self.store.as_ref(), USERS_SEQ_KEY, id).await?;
        Ok(user)
    }
}
