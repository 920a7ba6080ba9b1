use axum::{extract::State, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::AvailabilityRequest;
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::availability::Availability;
use crate::domain::services::slots::parse_time;
use crate::error::AppError;
use std::sync::Arc;

pub async fn update_availability(
    State(state): State<Arc<AppState>>,
    AuthUser { user, .. }: AuthUser,
    Json(payload): Json<AvailabilityRequest>,
) -> Result<impl IntoResponse, AppError> {
    let availability = Availability::new(
        parse_time(&payload.start_time)?,
        parse_time(&payload.end_time)?,
        payload.interval,
    )?;

    let saved = state.booking_service.set_availability(&user, availability).await?;
    Ok(Json(saved))
}

pub async fn availability_summary(
    State(state): State<Arc<AppState>>,
    AuthUser { user, .. }: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    if !user.is_professional() {
        return Err(AppError::Forbidden("Only professional accounts have working hours".into()));
    }
    Ok(Json(state.booking_service.availability_summary(user.id).await?))
}
