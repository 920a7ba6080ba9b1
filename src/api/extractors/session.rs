use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use crate::state::AppState;
use crate::domain::services::session_manager::SessionManager;
use std::sync::Arc;
use tower_cookies::{Cookie, Cookies};
use tower_cookies::cookie::SameSite;
use tracing::Span;
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "booking_session";

/// The caller's browser session. The cookie carries no max-age, so the
/// browser drops it (and with it the login) when the session ends.
pub struct BrowserSession {
    pub manager: SessionManager,
}

impl FromRequestParts<Arc<AppState>> for BrowserSession {
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let cookies = parts.extensions.get::<Cookies>()
            .cloned()
            .ok_or(StatusCode::INTERNAL_SERVER_ERROR)?;

        let existing = cookies.get(SESSION_COOKIE)
            .map(|c| c.value().to_string())
            .filter(|id| Uuid::parse_str(id).is_ok());

        let id = match existing {
            Some(id) => id,
            None => {
                let id = Uuid::new_v4().to_string();
                let mut cookie = Cookie::new(SESSION_COOKIE, id.clone());
                cookie.set_http_only(true);
                cookie.set_same_site(SameSite::Strict);
                cookie.set_path("/");
                cookies.add(cookie);
                id
            }
        };

        Span::current().record("session_id", id.as_str());

        let store = state.sessions.open(&id).await;
        Ok(BrowserSession {
            manager: SessionManager::new(state.user_repo.clone(), store),
        })
    }
}
