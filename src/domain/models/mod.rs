pub mod availability;
pub mod booking;
pub mod hhmm;
pub mod report;
pub mod user;
