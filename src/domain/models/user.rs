use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Client,
    Professional,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Client => "client",
            UserType::Professional => "professional",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "client" => Ok(UserType::Client),
            "professional" => Ok(UserType::Professional),
            other => Err(AppError::Validation(format!("Unknown account type: {}", other))),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    #[serde(rename = "type")]
    pub user_type: UserType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profession: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Signup payload before an id has been assigned.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub user_type: UserType,
    pub profession: Option<String>,
    pub bio: Option<String>,
}

impl User {
    pub fn new(id: i64, data: NewUser) -> Self {
        // Only professionals carry a public profile.
        let (profession, bio) = match data.user_type {
            UserType::Professional => (non_empty(data.profession), non_empty(data.bio)),
            UserType::Client => (None, None),
        };

        Self {
            id,
            name: data.name,
            email: data.email,
            phone: data.phone,
            password: data.password,
            user_type: data.user_type,
            profession,
            bio,
            created_at: Utc::now(),
        }
    }

    pub fn is_professional(&self) -> bool {
        self.user_type == UserType::Professional
    }
}

pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
