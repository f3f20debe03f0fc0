pub mod analytics;
pub mod booking;
