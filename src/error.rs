use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Stored data is malformed: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Invalid email, password or account type")]
    InvalidCredentials,
    #[error("Email already registered")]
    DuplicateEmail,
    #[error("Password must have at least 6 characters")]
    WeakPassword,
    #[error("This time slot is already booked")]
    SlotAlreadyBooked,
    #[error("Slot interval must be a positive number of minutes")]
    InvalidInterval,
    #[error("Resource not found: {0}")]
    NotFound(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Internal server error: {0}")]
    InternalWithMsg(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Database(e) => {
                error!("Database error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            AppError::Serialization(e) => {
                error!("Stored data could not be decoded: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, self.to_string()),
            AppError::DuplicateEmail => (StatusCode::CONFLICT, self.to_string()),
            AppError::WeakPassword => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::SlotAlreadyBooked => (StatusCode::CONFLICT, self.to_string()),
            AppError::InvalidInterval => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::InternalWithMsg(msg) => {
                error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_string())
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
