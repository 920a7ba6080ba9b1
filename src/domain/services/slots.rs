use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::Serialize;
use std::collections::HashSet;

use crate::domain::models::{availability::Availability, booking::Booking, hhmm};
use crate::error::AppError;

const PREVIEW_LEN: usize = 5;

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct Slot {
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    pub available: bool,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilitySummary {
    pub availability: Availability,
    pub slots_per_day: usize,
    pub preview: Vec<String>,
}

/// Every slot start from `start` (inclusive) to `end` (exclusive), `interval_min` apart.
pub fn generate_time_slots(start: NaiveTime, end: NaiveTime, interval_min: i32) -> Result<Vec<NaiveTime>, AppError> {
    if interval_min <= 0 {
        return Err(AppError::InvalidInterval);
    }

    let start_idx = minute_of_day(start);
    let end_idx = minute_of_day(end);

    Ok((start_idx..end_idx)
        .step_by(interval_min as usize)
        .filter_map(|cursor| NaiveTime::from_hms_opt(cursor / 60, cursor % 60, 0))
        .collect())
}

pub fn slots_for(availability: &Availability) -> Result<Vec<NaiveTime>, AppError> {
    generate_time_slots(availability.start_time, availability.end_time, availability.interval)
}

/// Times held by active bookings on `date`.
pub fn booked_times(bookings: &[Booking], date: NaiveDate) -> HashSet<NaiveTime> {
    bookings
        .iter()
        .filter(|b| b.is_active() && b.date == date)
        .map(|b| b.time)
        .collect()
}

pub fn mark_booked(slots: &[NaiveTime], booked: &HashSet<NaiveTime>) -> Vec<Slot> {
    slots
        .iter()
        .map(|&time| Slot { time, available: !booked.contains(&time) })
        .collect()
}

pub fn summarize(availability: &Availability) -> Result<AvailabilitySummary, AppError> {
    let slots = slots_for(availability)?;
    Ok(AvailabilitySummary {
        availability: *availability,
        slots_per_day: slots.len(),
        preview: slots.iter().take(PREVIEW_LEN).map(hhmm::format).collect(),
    })
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid date format (YYYY-MM-DD)".into()))
}

/// Optional date filter from a query string. Missing or blank means no filter.
pub fn parse_date_filter(raw: Option<&str>) -> Result<Option<NaiveDate>, AppError> {
    raw.filter(|s| !s.trim().is_empty()).map(parse_date).transpose()
}

pub fn parse_time(raw: &str) -> Result<NaiveTime, AppError> {
    hhmm::parse(raw).map_err(|_| AppError::Validation("Invalid time format (HH:MM)".into()))
}

fn minute_of_day(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::booking::{BookingStatus, NewBookingParams};

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn labels(slots: &[NaiveTime]) -> Vec<String> {
        slots.iter().map(hhmm::format).collect()
    }

    fn booking(date: NaiveDate, time: NaiveTime, status: BookingStatus) -> Booking {
        let mut b = Booking::new(1, NewBookingParams {
            client_id: Some(1),
            client_name: "Hugo".to_string(),
            client_phone: "555-0104".to_string(),
            client_email: None,
            professional_id: 2,
            professional_name: "Iris".to_string(),
            date,
            time,
            notes: None,
        });
        b.status = status;
        b
    }

    #[test]
    fn default_window_yields_twelve_slots() {
        let slots = generate_time_slots(at(8, 0), at(18, 0), 50).unwrap();
        assert_eq!(slots.len(), 12);
        assert_eq!(hhmm::format(&slots[0]), "08:00");
        assert_eq!(hhmm::format(&slots[11]), "17:50");
    }

    #[test]
    fn end_time_itself_is_excluded() {
        let slots = generate_time_slots(at(9, 0), at(10, 0), 30).unwrap();
        assert_eq!(labels(&slots), vec!["09:00", "09:30"]);
    }

    #[test]
    fn spacing_and_count_hold_across_windows() {
        let cases = [(at(7, 15), at(12, 40), 25), (at(0, 0), at(23, 59), 60), (at(13, 5), at(13, 6), 90)];

        for (start, end, interval) in cases {
            let slots = generate_time_slots(start, end, interval).unwrap();
            let span = (minute_of_day(end) - minute_of_day(start)) as usize;
            assert_eq!(slots.len(), span.div_ceil(interval as usize));
            assert_eq!(slots[0], start);
            assert!(slots.iter().all(|&s| s >= start && s < end));
            for pair in slots.windows(2) {
                assert_eq!(minute_of_day(pair[1]) - minute_of_day(pair[0]), interval as u32);
            }
        }
    }

    #[test]
    fn non_positive_interval_is_rejected() {
        assert!(matches!(generate_time_slots(at(8, 0), at(9, 0), 0), Err(AppError::InvalidInterval)));
        assert!(matches!(generate_time_slots(at(8, 0), at(9, 0), -5), Err(AppError::InvalidInterval)));
    }

    #[test]
    fn inverted_window_is_empty() {
        assert!(generate_time_slots(at(18, 0), at(8, 0), 30).unwrap().is_empty());
    }

    #[test]
    fn only_active_bookings_on_the_date_block_slots() {
        let day = NaiveDate::from_ymd_opt(2099, 5, 1).unwrap();
        let other_day = NaiveDate::from_ymd_opt(2099, 5, 2).unwrap();
        let bookings = vec![
            booking(day, at(9, 0), BookingStatus::Confirmed),
            booking(day, at(9, 30), BookingStatus::Cancelled),
            booking(other_day, at(10, 0), BookingStatus::Confirmed),
        ];

        let slots = generate_time_slots(at(9, 0), at(10, 30), 30).unwrap();
        let marked = mark_booked(&slots, &booked_times(&bookings, day));

        let availability: Vec<(String, bool)> = marked.iter().map(|s| (hhmm::format(&s.time), s.available)).collect();
        assert_eq!(availability, vec![
            ("09:00".to_string(), false),
            ("09:30".to_string(), true),
            ("10:00".to_string(), true),
        ]);
    }

    #[test]
    fn summary_previews_first_five_slots() {
        let summary = summarize(&Availability::default()).unwrap();
        assert_eq!(summary.slots_per_day, 12);
        assert_eq!(summary.preview, vec!["08:00", "08:50", "09:40", "10:30", "11:20"]);
    }

    #[test]
    fn parses_form_input() {
        assert_eq!(parse_time(" 09:05 ").unwrap(), at(9, 5));
        assert!(matches!(parse_time("9h"), Err(AppError::Validation(_))));
        assert!(matches!(parse_date("15/01/2099"), Err(AppError::Validation(_))));
    }

    #[test]
    fn blank_date_filter_means_no_filter() {
        assert_eq!(parse_date_filter(None).unwrap(), None);
        assert_eq!(parse_date_filter(Some("")).unwrap(), None);
        assert_eq!(parse_date_filter(Some("  ")).unwrap(), None);
        assert_eq!(parse_date_filter(Some("2099-01-15")).unwrap(), NaiveDate::from_ymd_opt(2099, 1, 15));
        assert!(parse_date_filter(Some("soon")).is_err());
    }
}
