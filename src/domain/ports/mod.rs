use crate::domain::models::{
    availability::Availability,
    booking::{Booking, NewBookingParams},
    user::{NewUser, User},
};
use crate::error::AppError;
use async_trait::async_trait;

/// String key-value storage substrate. Both the durable store and the
/// per-session store sit behind this port.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), AppError>;
    async fn remove(&self, key: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<User>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;
    async fn list_professionals(&self) -> Result<Vec<User>, AppError>;
    /// Assigns the id and creation stamp. Fails with `DuplicateEmail` when the
    /// address is taken, checked under the same lock as the insert.
    async fn create(&self, user: NewUser) -> Result<User, AppError>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Booking>, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Booking>, AppError>;
    async fn create(&self, params: NewBookingParams) -> Result<Booking, AppError>;
    /// Marks the booking cancelled and persists; `None` when the id is unknown.
    async fn cancel(&self, id: i64) -> Result<Option<Booking>, AppError>;
    async fn list_by_client(&self, client_id: i64) -> Result<Vec<Booking>, AppError>;
    async fn list_by_professional(&self, professional_id: i64) -> Result<Vec<Booking>, AppError>;
}

#[async_trait]
pub trait AvailabilityRepository: Send + Sync {
    /// Stored window, or the default one when the professional never set it.
    async fn get(&self, professional_id: i64) -> Result<Availability, AppError>;
    async fn set(&self, professional_id: i64, availability: &Availability) -> Result<(), AppError>;
}
