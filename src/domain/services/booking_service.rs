use chrono::{Local, NaiveDate, NaiveTime};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::domain::{
    models::{
        availability::Availability,
        booking::{Booking, NewBookingParams},
        user::{non_empty, User, UserType},
    },
    ports::{AvailabilityRepository, BookingRepository, UserRepository},
    services::slots::{self, AvailabilitySummary, Slot},
};
use crate::error::AppError;

/// The slot a booking asks for.
#[derive(Debug, Clone)]
pub struct SlotRequest {
    pub professional_id: i64,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub notes: Option<String>,
}

/// Contact details for a booking made without an account.
#[derive(Debug, Clone)]
pub struct GuestDetails {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
}

pub struct BookingService {
    users: Arc<dyn UserRepository>,
    bookings: Arc<dyn BookingRepository>,
    availability: Arc<dyn AvailabilityRepository>,
    // Held across the conflict check and the insert.
    booking_lock: Mutex<()>,
}

impl BookingService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        bookings: Arc<dyn BookingRepository>,
        availability: Arc<dyn AvailabilityRepository>,
    ) -> Self {
        Self { users, bookings, availability, booking_lock: Mutex::new(()) }
    }

    pub async fn find_professional(&self, professional_id: i64) -> Result<User, AppError> {
        self.users.find_by_id(professional_id).await?
            .filter(User::is_professional)
            .ok_or(AppError::NotFound("Professional not found".into()))
    }

    pub async fn availability_for(&self, professional_id: i64) -> Result<Availability, AppError> {
        self.find_professional(professional_id).await?;
        self.availability.get(professional_id).await
    }

    pub async fn set_availability(&self, professional: &User, availability: Availability) -> Result<Availability, AppError> {
        require_type(professional, UserType::Professional)?;
        self.availability.set(professional.id, &availability).await?;
        info!("Availability updated for professional {}", professional.id);
        Ok(availability)
    }

    pub async fn availability_summary(&self, professional_id: i64) -> Result<AvailabilitySummary, AppError> {
        let availability = self.availability_for(professional_id).await?;
        slots::summarize(&availability)
    }

    /// Every slot of the professional's window on `date`, flagged by whether it is still free.
    pub async fn available_slots(&self, professional_id: i64, date: NaiveDate) -> Result<Vec<Slot>, AppError> {
        let availability = self.availability_for(professional_id).await?;
        let generated = slots::slots_for(&availability)?;
        let bookings = self.bookings.list_by_professional(professional_id).await?;
        Ok(slots::mark_booked(&generated, &slots::booked_times(&bookings, date)))
    }

    pub async fn book_for_client(&self, client: &User, request: SlotRequest) -> Result<Booking, AppError> {
        require_type(client, UserType::Client)?;

        self.create_checked(request, |professional, slot| NewBookingParams {
            client_id: Some(client.id),
            client_name: client.name.clone(),
            client_phone: client.phone.clone(),
            client_email: None,
            professional_id: professional.id,
            professional_name: professional.name.clone(),
            date: slot.date,
            time: slot.time,
            notes: non_empty(slot.notes.clone()),
        }).await
    }

    pub async fn book_as_guest(&self, guest: GuestDetails, request: SlotRequest) -> Result<Booking, AppError> {
        let name = guest.name.trim().to_string();
        let phone = guest.phone.trim().to_string();
        if name.is_empty() || phone.is_empty() {
            return Err(AppError::Validation("Name and phone are required for guest bookings".into()));
        }

        self.create_checked(request, |professional, slot| NewBookingParams {
            client_id: None,
            client_name: name,
            client_phone: phone,
            client_email: non_empty(guest.email),
            professional_id: professional.id,
            professional_name: professional.name.clone(),
            date: slot.date,
            time: slot.time,
            notes: non_empty(slot.notes.clone()),
        }).await
    }

    async fn create_checked<F>(&self, request: SlotRequest, build: F) -> Result<Booking, AppError>
    where
        F: FnOnce(&User, &SlotRequest) -> NewBookingParams,
    {
        if request.date < Local::now().date_naive() {
            return Err(AppError::Validation("Cannot book in the past".into()));
        }

        let professional = self.find_professional(request.professional_id).await?;
        let availability = self.availability.get(professional.id).await?;
        if !slots::slots_for(&availability)?.contains(&request.time) {
            return Err(AppError::Validation("Selected time is outside the professional's working hours".into()));
        }

        let _guard = self.booking_lock.lock().await;

        let taken = self.bookings.list_by_professional(professional.id).await?
            .iter()
            .any(|b| b.occupies(professional.id, request.date, request.time));
        if taken {
            warn!(
                "Booking rejected: {} {} already taken for professional {}",
                request.date, request.time, professional.id
            );
            return Err(AppError::SlotAlreadyBooked);
        }

        let created = self.bookings.create(build(&professional, &request)).await?;
        info!("Booking confirmed: {} with professional {}", created.id, professional.id);
        Ok(created)
    }

    /// Cancels on behalf of the booking's client or professional.
    pub async fn cancel(&self, actor: &User, booking_id: i64) -> Result<Booking, AppError> {
        let booking = self.bookings.find_by_id(booking_id).await?
            .ok_or(AppError::NotFound("Booking not found".into()))?;

        if !booking.involves(actor.id) {
            return Err(AppError::Forbidden("Booking belongs to another account".into()));
        }

        let cancelled = self.bookings.cancel(booking_id).await?
            .ok_or(AppError::NotFound("Booking not found".into()))?;
        info!("Booking cancelled: {} by user {}", booking_id, actor.id);
        Ok(cancelled)
    }

    pub async fn client_bookings(&self, client: &User) -> Result<Vec<Booking>, AppError> {
        require_type(client, UserType::Client)?;
        self.bookings.list_by_client(client.id).await
    }

    /// Active bookings for a professional, optionally for one day, earliest first.
    pub async fn agenda(&self, professional: &User, date: Option<NaiveDate>) -> Result<Vec<Booking>, AppError> {
        require_type(professional, UserType::Professional)?;

        let mut bookings: Vec<Booking> = self.bookings.list_by_professional(professional.id).await?
            .into_iter()
            .filter(|b| date.is_none_or(|d| b.date == d))
            .collect();
        bookings.sort_by_key(|b| (b.date, b.time));
        Ok(bookings)
    }

    /// Every booking with the professional, cancelled ones included.
    pub async fn professional_history(&self, professional: &User) -> Result<Vec<Booking>, AppError> {
        require_type(professional, UserType::Professional)?;
        Ok(self.bookings.list().await?
            .into_iter()
            .filter(|b| b.professional_id == professional.id)
            .collect())
    }

    pub async fn booking_summary(&self, actor: &User, booking_id: i64) -> Result<String, AppError> {
        let booking = self.bookings.find_by_id(booking_id).await?
            .filter(|b| b.involves(actor.id))
            .ok_or(AppError::NotFound("Booking not found".into()))?;
        Ok(booking.summary())
    }
}

fn require_type(user: &User, expected: UserType) -> Result<(), AppError> {
    if user.user_type != expected {
        return Err(AppError::Forbidden(format!("Only {} accounts can do this", expected)));
    }
    Ok(())
}
