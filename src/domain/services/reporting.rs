//! Report figures for a professional's bookings.
//!
//! Revenue is simulated: every confirmed booking is worth a fixed base price.
//! There is no price field anywhere in the data model.

use chrono::Datelike;

use crate::domain::models::{
    booking::{Booking, BookingStatus},
    hhmm,
    report::{DateRange, Metrics, ReportRow},
};

pub const DEFAULT_BASE_PRICE: f64 = 75.0;

pub fn calculate_metrics(bookings: &[Booking], range: Option<DateRange>, base_price: f64) -> Metrics {
    let filtered = filter_range(bookings, range);

    let completed = filtered.iter().filter(|b| b.status == BookingStatus::Confirmed).count();
    let cancelled = filtered.iter().filter(|b| b.status == BookingStatus::Cancelled).count();
    let total = filtered.len();

    let completion_rate = if total > 0 {
        (completed as f64 / total as f64 * 100.0).round() as u32
    } else {
        0
    };

    let potential_revenue = completed as f64 * base_price;
    let avg_revenue = if completed > 0 { potential_revenue / completed as f64 } else { 0.0 };

    let monthly_revenue = match month_span(&filtered) {
        Some(months) if months > 0 => potential_revenue / months as f64,
        _ => potential_revenue,
    };

    Metrics {
        completed,
        cancelled,
        total,
        completion_rate,
        potential_revenue,
        avg_revenue,
        monthly_revenue,
    }
}

/// Table rows, most recent first.
pub fn report_rows(bookings: &[Booking], range: Option<DateRange>, base_price: f64) -> Vec<ReportRow> {
    let mut filtered = filter_range(bookings, range);
    filtered.sort_by_key(|b| std::cmp::Reverse((b.date, b.time)));

    filtered
        .into_iter()
        .map(|b| ReportRow {
            booking_id: b.id,
            date: b.date,
            time: hhmm::format(&b.time),
            client_name: b.client_name.clone(),
            client_phone: b.client_phone.clone(),
            status: b.status,
            simulated_value: (b.status == BookingStatus::Confirmed).then_some(base_price),
        })
        .collect()
}

fn filter_range(bookings: &[Booking], range: Option<DateRange>) -> Vec<&Booking> {
    bookings
        .iter()
        .filter(|b| range.is_none_or(|r| r.contains(b.date)))
        .collect()
}

/// Inclusive number of calendar months between the earliest and latest booking.
fn month_span(bookings: &[&Booking]) -> Option<i32> {
    let earliest = bookings.iter().map(|b| b.date).min()?;
    let latest = bookings.iter().map(|b| b.date).max()?;
    Some((latest.year() - earliest.year()) * 12 + (latest.month() as i32 - earliest.month() as i32) + 1)
}
