use axum::{
    body::Body,
    extract::Request,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{auth, availability, booking, health, professional, report};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tower_cookies::CookieManagerLayer;
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/health", get(health::health_check))

        // Session
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/signup", post(auth::signup))
        .route("/api/v1/auth/logout", post(auth::logout))
        .route("/api/v1/auth/me", get(auth::me))
        .route("/api/v1/session/selected-professional", get(professional::selected_professional))

        // Professionals (public)
        .route("/api/v1/professionals", get(professional::list_professionals))
        .route("/api/v1/professionals/{id}", get(professional::get_professional))
        .route("/api/v1/professionals/{id}/select", post(professional::select_professional))
        .route("/api/v1/professionals/{id}/availability", get(professional::get_availability))
        .route("/api/v1/professionals/{id}/slots", get(professional::get_slots))

        // Bookings
        .route("/api/v1/bookings", post(booking::create_booking))
        .route("/api/v1/bookings/guest", post(booking::create_guest_booking))
        .route("/api/v1/bookings/{id}/summary", get(booking::booking_summary))
        .route("/api/v1/bookings/{id}/cancel", post(booking::cancel_booking))

        // Own account
        .route("/api/v1/me/bookings", get(booking::my_bookings))
        .route("/api/v1/me/availability", put(availability::update_availability))
        .route("/api/v1/me/availability/summary", get(availability::availability_summary))
        .route("/api/v1/me/reports", get(report::get_report))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        session_id = tracing::field::Empty,
                        user_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(CookieManagerLayer::new())
        .with_state(state)
}
