use axum::{response::IntoResponse, Json, http::StatusCode};
use crate::api::dtos::requests::{LoginRequest, SignupRequest};
use crate::api::dtos::responses::UserProfile;
use crate::api::extractors::{auth::AuthUser, session::BrowserSession};
use crate::domain::models::user::{NewUser, UserType};
use crate::error::AppError;

pub async fn login(
    session: BrowserSession,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user_type: UserType = payload.user_type.parse()?;
    let user = session.manager.login(&payload.email, &payload.password, user_type).await?;
    Ok(Json(UserProfile::from(user)))
}

pub async fn signup(
    session: BrowserSession,
    Json(payload): Json<SignupRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user_type: UserType = payload.user_type.parse()?;

    let user = session.manager.signup(NewUser {
        name: payload.name,
        email: payload.email,
        phone: payload.phone,
        password: payload.password,
        user_type,
        profession: payload.profession,
        bio: payload.bio,
    }).await?;

    Ok((StatusCode::CREATED, Json(UserProfile::from(user))))
}

pub async fn logout(session: BrowserSession) -> Result<impl IntoResponse, AppError> {
    session.manager.logout().await?;
    Ok(StatusCode::OK)
}

pub async fn me(AuthUser { user, .. }: AuthUser) -> impl IntoResponse {
    Json(UserProfile::from(user))
}
