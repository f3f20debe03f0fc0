pub mod period;
pub use period::Period;
pub mod analytics_service;
pub use analytics_service::AnalyticsService;
pub mod booking_service;
pub use booking_service::BookingService;
