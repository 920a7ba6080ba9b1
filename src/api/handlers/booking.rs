use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use crate::state::AppState;
use crate::api::dtos::requests::{AgendaQuery, CreateBookingRequest, GuestBookingRequest};
use crate::api::extractors::{auth::AuthUser, session::BrowserSession};
use crate::domain::models::user::UserType;
use crate::domain::services::booking_service::{GuestDetails, SlotRequest};
use crate::domain::services::slots::{parse_date, parse_date_filter, parse_time};
use crate::domain::services::session_manager::SessionManager;
use crate::error::AppError;
use std::sync::Arc;

/// Falls back to the professional picked earlier in this browser session.
async fn resolve_professional(explicit: Option<i64>, manager: &SessionManager) -> Result<i64, AppError> {
    match explicit {
        Some(id) => Ok(id),
        None => manager.selected_professional().await?
            .ok_or(AppError::Validation("Select a professional first".into())),
    }
}

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    AuthUser { user, session }: AuthUser,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let professional_id = resolve_professional(payload.professional_id, &session.manager).await?;

    let request = SlotRequest {
        professional_id,
        date: parse_date(&payload.date)?,
        time: parse_time(&payload.time)?,
        notes: payload.notes,
    };

    let booking = state.booking_service.book_for_client(&user, request).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

pub async fn create_guest_booking(
    State(state): State<Arc<AppState>>,
    session: BrowserSession,
    Json(payload): Json<GuestBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let professional_id = resolve_professional(payload.professional_id, &session.manager).await?;

    let guest = GuestDetails {
        name: payload.name,
        phone: payload.phone,
        email: payload.email,
    };
    let request = SlotRequest {
        professional_id,
        date: parse_date(&payload.date)?,
        time: parse_time(&payload.time)?,
        notes: payload.notes,
    };

    let booking = state.booking_service.book_as_guest(guest, request).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// Clients get their own bookings; professionals get their agenda.
pub async fn my_bookings(
    State(state): State<Arc<AppState>>,
    AuthUser { user, .. }: AuthUser,
    Query(params): Query<AgendaQuery>,
) -> Result<impl IntoResponse, AppError> {
    let bookings = match user.user_type {
        UserType::Client => state.booking_service.client_bookings(&user).await?,
        UserType::Professional => {
            let date = parse_date_filter(params.date.as_deref())?;
            state.booking_service.agenda(&user, date).await?
        }
    };
    Ok(Json(bookings))
}

pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    AuthUser { user, .. }: AuthUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.booking_service.cancel(&user, id).await?;
    Ok(Json(booking))
}

pub async fn booking_summary(
    State(state): State<Arc<AppState>>,
    AuthUser { user, .. }: AuthUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let text = state.booking_service.booking_summary(&user, id).await?;
    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], text))
}
