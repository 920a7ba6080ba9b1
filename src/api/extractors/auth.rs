use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use crate::state::AppState;
use crate::api::extractors::session::BrowserSession;
use crate::domain::models::user::User;
use std::sync::Arc;
use tracing::{error, Span};

/// A logged-in user resolved from the browser session.
pub struct AuthUser {
    pub user: User,
    pub session: BrowserSession,
}

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let session = BrowserSession::from_request_parts(parts, state).await?;

        let user = session.manager.current_user().await
            .map_err(|e| {
                error!("Session lookup failed: {:?}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            })?
            .ok_or(StatusCode::UNAUTHORIZED)?;

        Span::current().record("user_id", user.id);

        Ok(AuthUser { user, session })
    }
}
