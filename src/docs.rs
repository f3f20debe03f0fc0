// src/docs.rs

use utoipa::OpenApi;
use crate::handlers;
use crate::models;
use crate::services;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Analytics ---
        handlers::analytics::get_analytics,
        handlers::analytics::post_analytics,

        // --- Bookings ---
        handlers::bookings::list_bookings,
        handlers::bookings::search_bookings,
        handlers::bookings::get_calendar,
        handlers::bookings::update_booking_status,
    ),
    components(
        schemas(
            // --- Analytics ---
            models::analytics::AnalyticsRequest,
            models::analytics::AnalyticsPayload,
            models::analytics::BookingList,
            models::analytics::CompletionStats,
            models::analytics::ServiceDemand,
            models::analytics::LocationStats,
            models::analytics::Demographics,
            models::analytics::AgeGroups,
            models::analytics::LocationBreakdown,
            models::analytics::TrendPoint,
            services::period::Period,

            // --- Bookings ---
            models::booking::Booking,
            models::booking::BookingStatus,
            models::booking::ServiceLocation,
            models::booking::ServiceSummary,
            models::booking::CalendarEvent,
            handlers::bookings::UpdateStatusPayload,
        )
    ),
    tags(
        (name = "Analytics", description = "Resumos calculados sobre os agendamentos"),
        (name = "Bookings", description = "Consulta e atualização de agendamentos")
    )
)]
pub struct ApiDoc;
