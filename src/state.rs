use std::sync::Arc;
use crate::config::Config;
use crate::domain::ports::UserRepository;
use crate::domain::services::booking_service::BookingService;
use crate::infra::stores::session_registry::SessionRegistry;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub user_repo: Arc<dyn UserRepository>,
    pub booking_service: Arc<BookingService>,
    pub sessions: Arc<SessionRegistry>,
}
