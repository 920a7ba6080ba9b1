use crate::domain::{
    models::booking::{Booking, BookingStatus, NewBookingParams},
    ports::{BookingRepository, KeyValueStore},
};
use crate::error::AppError;
use super::{commit_id, load_collection, next_id, save_collection, BOOKINGS_KEY, BOOKINGS_SEQ_KEY};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

pub struct KvBookingRepo {
    store: Arc<dyn KeyValueStore>,
    write_lock: Mutex<()>,
}

impl KvBookingRepo {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store, write_lock: Mutex::new(()) }
    }

    async fn load(&self) -> Result<Vec<Booking>, AppError> {
        load_collection(self.store.as_ref(), BOOKINGS_KEY).await
    }

    async fn save(&self, bookings: &[Booking]) -> Result<(), AppError> {
        save_collection(self.store.as_ref(), BOOKINGS_KEY, bookings).await
    }
}

#[async_trait]
impl BookingRepository for KvBookingRepo {
    async fn list(&self) -> Result<Vec<Booking>, AppError> {
        self.load().await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Booking>, AppError> {
        Ok(self.load().await?.into_iter().find(|b| b.id == id))
    }

    async fn create(&self, params: NewBookingParams) -> Result<Booking, AppError> {
        let _guard = self.write_lock.lock().await;

        let mut bookings = self.load().await?;
        let max_existing = bookings.iter().map(|b| b.id).max().unwrap_or(0);
        let id = next_id(self.store.as_ref(), BOOKINGS_SEQ_KEY, max_existing).await?;

        let booking = Booking::new(id, params);
        bookings.push(booking.clone());

        self.save(&bookings).await?;
        commit_id(self.store.as_ref(), BOOKINGS_SEQ_KEY, id).await?;
        Ok(booking)
    }

    async fn cancel(&self, id: i64) -> Result<Option<Booking>, AppError> {
        let _guard = self.write_lock.lock().await;

        let mut bookings = self.load().await?;
        let cancelled = match bookings.iter_mut().find(|b| b.id == id) {
            Some(booking) => {
                booking.status = BookingStatus::Cancelled;
                booking.clone()
            }
            None => return Ok(None),
        };

        self.save(&bookings).await?;
        Ok(Some(cancelled))
    }

    async fn list_by_client(&self, client_id: i64) -> Result<Vec<Booking>, AppError> {
        Ok(self.load().await?
            .into_iter()
            .filter(|b| b.client_id == Some(client_id) && b.is_active())
            .collect())
    }

    async fn list_by_professional(&self, professional_id: i64) -> Result<Vec<Booking>, AppError> {
        Ok(self.load().await?
            .into_iter()
            .filter(|b| b.professional_id == professional_id && b.is_active())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::stores::memory_store::MemoryStore;
    use chrono::{NaiveDate, NaiveTime};

    fn params(client_id: Option<i64>, professional_id: i64, hour: u32) -> NewBookingParams {
        NewBookingParams {
            client_id,
            client_name: "Fabio".to_string(),
            client_phone: "555-0103".to_string(),
            client_email: None,
            professional_id,
            professional_name: "Gina".to_string(),
            date: NaiveDate::from_ymd_opt(2099, 1, 15).unwrap(),
            time: NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
            notes: None,
        }
    }

    fn repo() -> KvBookingRepo {
        KvBookingRepo::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn create_assigns_sequential_ids_and_confirms() {
        let repo = repo();
        let a = repo.create(params(Some(1), 2, 9)).await.unwrap();
        let b = repo.create(params(None, 2, 10)).await.unwrap();

        assert_eq!((a.id, b.id), (1, 2));
        assert_eq!(a.status, BookingStatus::Confirmed);
        assert!(b.is_guest);
    }

    #[tokio::test]
    async fn cancel_twice_keeps_cancelled_status() {
        let repo = repo();
        let booking = repo.create(params(Some(1), 2, 9)).await.unwrap();

        let first = repo.cancel(booking.id).await.unwrap().unwrap();
        let second = repo.cancel(booking.id).await.unwrap().unwrap();

        assert_eq!(first.status, BookingStatus::Cancelled);
        assert_eq!(second.status, BookingStatus::Cancelled);
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn cancel_unknown_booking_returns_none() {
        assert_eq!(repo().cancel(42).await.unwrap(), None);
    }

    #[tokio::test]
    async fn client_and_professional_lists_skip_cancelled() {
        let repo = repo();
        let kept = repo.create(params(Some(1), 2, 9)).await.unwrap();
        let dropped = repo.create(params(Some(1), 2, 10)).await.unwrap();
        repo.create(params(Some(5), 3, 9)).await.unwrap();
        repo.cancel(dropped.id).await.unwrap();

        assert_eq!(repo.list_by_client(1).await.unwrap(), vec![kept.clone()]);
        assert_eq!(repo.list_by_professional(2).await.unwrap(), vec![kept]);
        assert_eq!(repo.list().await.unwrap().len(), 3);
    }
}
