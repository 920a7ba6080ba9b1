use serde::Serialize;
use chrono::NaiveDate;

use super::booking::BookingStatus;

/// Inclusive calendar-date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Report KPIs. Revenue figures are simulated from a fixed per-booking price.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub completed: usize,
    pub cancelled: usize,
    pub total: usize,
    pub completion_rate: u32,
    pub potential_revenue: f64,
    pub avg_revenue: f64,
    pub monthly_revenue: f64,
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    pub booking_id: i64,
    pub date: NaiveDate,
    pub time: String,
    pub client_name: String,
    pub client_phone: String,
    pub status: BookingStatus,
    pub simulated_value: Option<f64>,
}
