use serde::{Deserialize, Serialize};
use chrono::NaiveTime;

use super::hhmm;
use crate::error::AppError;

/// A professional's bookable window and slot length.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub interval: i32,
}

impl Default for Availability {
    fn default() -> Self {
        Self {
            start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap_or_default(),
            end_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap_or_default(),
            interval: 50,
        }
    }
}

impl Availability {
    pub fn new(start_time: NaiveTime, end_time: NaiveTime, interval: i32) -> Result<Self, AppError> {
        let availability = Self { start_time, end_time, interval };
        availability.validate()?;
        Ok(availability)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.interval <= 0 {
            return Err(AppError::InvalidInterval);
        }
        if self.start_time >= self.end_time {
            return Err(AppError::Validation("End time must be after start time".into()));
        }
        Ok(())
    }
}
