use axum::{extract::{Path, Query, State}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::SlotsQuery;
use crate::api::dtos::responses::{ProfessionalCard, SlotsResponse};
use crate::api::extractors::session::BrowserSession;
use crate::domain::services::slots::parse_date;
use crate::error::AppError;
use std::sync::Arc;

pub async fn list_professionals(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let cards: Vec<ProfessionalCard> = state.user_repo.list_professionals().await?
        .into_iter()
        .map(ProfessionalCard::from)
        .collect();
    Ok(Json(cards))
}

pub async fn get_professional(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let professional = state.booking_service.find_professional(id).await?;
    Ok(Json(ProfessionalCard::from(professional)))
}

pub async fn select_professional(
    session: BrowserSession,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let professional = session.manager.select_professional(id).await?;
    Ok(Json(ProfessionalCard::from(professional)))
}

pub async fn selected_professional(
    State(state): State<Arc<AppState>>,
    session: BrowserSession,
) -> Result<impl IntoResponse, AppError> {
    let id = session.manager.selected_professional().await?
        .ok_or(AppError::NotFound("No professional selected".into()))?;
    let professional = state.booking_service.find_professional(id).await?;
    Ok(Json(ProfessionalCard::from(professional)))
}

pub async fn get_availability(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.booking_service.availability_for(id).await?))
}

pub async fn get_slots(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Query(params): Query<SlotsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let raw_date = params.date.ok_or(AppError::Validation("Date required".into()))?;
    let date = parse_date(&raw_date)?;

    let slots = state.booking_service.available_slots(id, date).await?;
    Ok(Json(SlotsResponse { date: date.format("%Y-%m-%d").to_string(), slots }))
}
