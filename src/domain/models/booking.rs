use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use super::hhmm;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: i64,
    pub client_id: Option<i64>,
    pub client_name: String,
    pub client_phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_email: Option<String>,
    pub professional_id: i64,
    pub professional_name: String,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub status: BookingStatus,
    pub is_guest: bool,
    pub created_at: DateTime<Utc>,
}

pub struct NewBookingParams {
    pub client_id: Option<i64>,
    pub client_name: String,
    pub client_phone: String,
    pub client_email: Option<String>,
    pub professional_id: i64,
    pub professional_name: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub notes: Option<String>,
}

impl Booking {
    pub fn new(id: i64, params: NewBookingParams) -> Self {
        Self {
            id,
            is_guest: params.client_id.is_none(),
            client_id: params.client_id,
            client_name: params.client_name,
            client_phone: params.client_phone,
            client_email: params.client_email,
            professional_id: params.professional_id,
            professional_name: params.professional_name,
            date: params.date,
            time: params.time,
            notes: params.notes,
            status: BookingStatus::Confirmed,
            created_at: Utc::now(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.status != BookingStatus::Cancelled
    }

    /// True when this booking still holds the given professional's slot.
    pub fn occupies(&self, professional_id: i64, date: NaiveDate, time: NaiveTime) -> bool {
        self.is_active() && self.professional_id == professional_id && self.date == date && self.time == time
    }

    pub fn involves(&self, user_id: i64) -> bool {
        self.client_id == Some(user_id) || self.professional_id == user_id
    }

    /// Plain-text card used for copy-to-clipboard.
    pub fn summary(&self) -> String {
        let mut lines = vec![
            format!("Booking #{}", self.id),
            format!("Client: {}", self.client_name),
            format!("Phone: {}", self.client_phone),
            format!("Date: {}", self.date.format("%Y-%m-%d")),
            format!("Time: {}", hhmm::format(&self.time)),
        ];
        if let Some(notes) = &self.notes {
            lines.push(format!("Notes: {}", notes));
        }
        lines.join("\n")
    }
}
