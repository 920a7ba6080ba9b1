use axum::{extract::{Query, State}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::ReportQuery;
use crate::api::dtos::responses::ReportResponse;
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::report::DateRange;
use crate::domain::services::reporting::{calculate_metrics, report_rows};
use crate::domain::services::slots::parse_date_filter;
use crate::error::AppError;
use std::sync::Arc;

pub async fn get_report(
    State(state): State<Arc<AppState>>,
    AuthUser { user, .. }: AuthUser,
    Query(params): Query<ReportQuery>,
) -> Result<impl IntoResponse, AppError> {
    // A half-open or cleared range is ignored; the report then covers everything.
    let start = parse_date_filter(params.start.as_deref())?;
    let end = parse_date_filter(params.end.as_deref())?;
    let range = match (start, end) {
        (Some(start), Some(end)) => Some(DateRange { start, end }),
        _ => None,
    };

    let history = state.booking_service.professional_history(&user).await?;
    let base_price = state.config.base_price;

    Ok(Json(ReportResponse {
        metrics: calculate_metrics(&history, range, base_price),
        rows: report_rows(&history, range, base_price),
    }))
}
