use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::{
    models::user::{non_empty, NewUser, User, UserType},
    ports::{KeyValueStore, UserRepository},
};
use crate::error::AppError;

pub const CURRENT_USER_KEY: &str = "currentUserId";
pub const SELECTED_PROFESSIONAL_KEY: &str = "selectedProfessionalId";
pub const MIN_PASSWORD_LEN: usize = 6;

/// Login state for one browser session.
///
/// Account data comes from the user repository; the only thing kept in the
/// session store is the logged-in user's id and the professional picked for
/// the next booking.
pub struct SessionManager {
    users: Arc<dyn UserRepository>,
    session: Arc<dyn KeyValueStore>,
}

impl SessionManager {
    pub fn new(users: Arc<dyn UserRepository>, session: Arc<dyn KeyValueStore>) -> Self {
        Self { users, session }
    }

    /// The logged-in user, or `None` when nobody is logged in or the stored id no longer resolves.
    pub async fn current_user(&self) -> Result<Option<User>, AppError> {
        match self.read_id(CURRENT_USER_KEY).await? {
            Some(id) => self.users.find_by_id(id).await,
            None => Ok(None),
        }
    }

    pub async fn is_logged_in(&self) -> Result<bool, AppError> {
        Ok(self.current_user().await?.is_some())
    }

    pub async fn login(&self, email: &str, password: &str, user_type: UserType) -> Result<User, AppError> {
        let user = self.users.find_by_email(email.trim()).await?
            .ok_or(AppError::InvalidCredentials)?;

        // A correct password for the other account type is still a failed login.
        if user.password != password || user.user_type != user_type {
            warn!("Rejected login for {}", email.trim());
            return Err(AppError::InvalidCredentials);
        }

        self.session.set(CURRENT_USER_KEY, &user.id.to_string()).await?;
        info!("User logged in: {}", user.id);
        Ok(user)
    }

    pub async fn logout(&self) -> Result<(), AppError> {
        self.session.remove(CURRENT_USER_KEY).await?;
        info!("User logged out");
        Ok(())
    }

    pub async fn signup(&self, mut data: NewUser) -> Result<User, AppError> {
        data.name = data.name.trim().to_string();
        data.email = data.email.trim().to_string();

        if data.name.is_empty() || data.email.is_empty() {
            return Err(AppError::Validation("Name and email are required".into()));
        }
        if self.users.find_by_email(&data.email).await?.is_some() {
            return Err(AppError::DuplicateEmail);
        }
        if data.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::WeakPassword);
        }
        if data.user_type == UserType::Professional && non_empty(data.profession.clone()).is_none() {
            return Err(AppError::Validation("Profession is required for professional accounts".into()));
        }

        let user = self.users.create(data).await?;
        self.session.set(CURRENT_USER_KEY, &user.id.to_string()).await?;

        info!("Account created: {} ({})", user.id, user.user_type);
        Ok(user)
    }

    /// Remembers which professional the client is booking with.
    pub async fn select_professional(&self, professional_id: i64) -> Result<User, AppError> {
        let professional = self.users.find_by_id(professional_id).await?
            .filter(User::is_professional)
            .ok_or(AppError::NotFound("Professional not found".into()))?;

        self.session.set(SELECTED_PROFESSIONAL_KEY, &professional.id.to_string()).await?;
        Ok(professional)
    }

    pub async fn selected_professional(&self) -> Result<Option<i64>, AppError> {
        self.read_id(SELECTED_PROFESSIONAL_KEY).await
    }

    async fn read_id(&self, key: &str) -> Result<Option<i64>, AppError> {
        // An unparsable value counts as unset.
        Ok(self.session.get(key).await?.and_then(|raw| raw.trim().parse().ok()))
    }
}
