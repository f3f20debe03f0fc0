// src/handlers/bookings.rs

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, RawQuery, State,
    },
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Local;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::first_query_param,
    models::booking::{Booking, CalendarEvent},
    services::Period,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateStatusPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "completed")]
    pub status: String,
}

// GET /api/bookings
#[utoipa::path(
    get,
    path = "/api/bookings",
    tag = "Bookings",
    responses(
        (
            status = 200,
            description = "Todos os agendamentos, mais recentes primeiro",
            body = Vec<Booking>
        )
    )
)]
pub async fn list_bookings(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let bookings = app_state.booking_service.list().await?;
    Ok((StatusCode::OK, Json(bookings)))
}

// GET /api/bookings/search?q=
#[utoipa::path(
    get,
    path = "/api/bookings/search",
    tag = "Bookings",
    params(
        (
            "q" = Option<String>,
            Query,
            description = "Trecho do nome ou telefone do cliente",
            example = "maria"
        )
    ),
    responses(
        (
            status = 200,
            description = "Agendamentos cujo nome ou telefone contém o termo",
            body = Vec<Booking>
        )
    )
)]
pub async fn search_bookings(
    State(app_state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<impl IntoResponse, AppError> {
    let term = first_query_param(query.as_deref(), "q").unwrap_or_default();
    let bookings = app_state.booking_service.search(&term).await?;
    Ok((StatusCode::OK, Json(bookings)))
}

// GET /api/bookings/calendar
#[utoipa::path(
    get,
    path = "/api/bookings/calendar",
    tag = "Bookings",
    params(
        (
            "period" = Option<String>,
            Query,
            description = "day | week | month | quarter | year (sem período: tudo)",
            example = "week"
        )
    ),
    responses(
        (status = 200, description = "Eventos de calendário (1h cada)", body = Vec<CalendarEvent>)
    )
)]
pub async fn get_calendar(
    State(app_state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<impl IntoResponse, AppError> {
    // Sem período: calendário completo
    let period = first_query_param(query.as_deref(), "period")
        .map(|p| Period::parse(Some(p.as_str())));
    let events = app_state
        .booking_service
        .calendar(period, Local::now().date_naive())
        .await?;
    Ok((StatusCode::OK, Json(events)))
}

// PATCH /api/bookings/{booking_id}/status
#[utoipa::path(
    patch,
    path = "/api/bookings/{booking_id}/status",
    tag = "Bookings",
    request_body = UpdateStatusPayload,
    params(
        ("booking_id" = Uuid, Path, description = "ID do agendamento")
    ),
    responses(
        (status = 200, description = "Agendamento atualizado", body = Booking),
        (status = 400, description = "Status, ID ou corpo inválido"),
        (status = 404, description = "Agendamento não encontrado")
    )
)]
pub async fn update_booking_status(
    State(app_state): State<AppState>,
    booking_id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateStatusPayload>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(booking_id) = booking_id?;
    let Json(payload) = payload?;
    payload.validate()?;

    let booking = app_state
        .booking_service
        .update_status(booking_id, &payload.status)
        .await?;

    // O painel precisa refazer as consultas em cache depois da mutação
    Ok((
        StatusCode::OK,
        [(header::CACHE_CONTROL, "no-store")],
        Json(booking),
    ))
}
