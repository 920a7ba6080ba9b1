use serde::Serialize;

use crate::domain::models::{
    report::{Metrics, ReportRow},
    user::{User, UserType},
};
use crate::domain::services::{defaults::DEFAULT_PROFESSION_LABEL, slots::Slot};

/// Account view without the stored password.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(rename = "type")]
    pub user_type: UserType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profession: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            phone: user.phone,
            user_type: user.user_type,
            profession: user.profession,
            bio: user.bio,
        }
    }
}

/// Professional card shown to clients.
#[derive(Serialize)]
pub struct ProfessionalCard {
    pub id: i64,
    pub name: String,
    pub profession: String,
    pub bio: String,
    pub phone: String,
}

impl From<User> for ProfessionalCard {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            profession: user.profession.unwrap_or_else(|| DEFAULT_PROFESSION_LABEL.to_string()),
            bio: user.bio.unwrap_or_default(),
            phone: user.phone,
        }
    }
}

#[derive(Serialize)]
pub struct SlotsResponse {
    pub date: String,
    pub slots: Vec<Slot>,
}

#[derive(Serialize)]
pub struct ReportResponse {
    pub metrics: Metrics,
    pub rows: Vec<ReportRow>,
}
