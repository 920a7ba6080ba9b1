pub mod booking_service;
pub mod defaults;
pub mod reporting;
pub mod session_manager;
pub mod slots;
