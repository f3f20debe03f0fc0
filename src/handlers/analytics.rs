// src/handlers/analytics.rs

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, RawQuery, State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Local;

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::first_query_param,
    models::analytics::{AnalyticsEndpoint, AnalyticsPayload, AnalyticsRequest},
    services::Period,
};

// GET /api/analytics/{endpoint}
#[utoipa::path(
    get,
    path = "/api/analytics/{endpoint}",
    tag = "Analytics",
    params(
        (
            "endpoint" = String,
            Path,
            description = "bookings, completion, service-demand, location, demographics ou trends"
        ),
        (
            "period" = Option<String>,
            Query,
            description = "day | week | month | quarter | year (padrão: month)",
            example = "week"
        )
    ),
    responses(
        (status = 200, description = "Resumo calculado para o endpoint", body = AnalyticsPayload),
        (status = 404, description = "Endpoint desconhecido"),
        (status = 500, description = "Falha ao consultar o banco")
    )
)]
pub async fn get_analytics(
    State(app_state): State<AppState>,
    endpoint: Result<Path<String>, PathRejection>,
    RawQuery(query): RawQuery,
) -> Result<Response, AppError> {
    let Path(endpoint) = endpoint?;
    // Período repetido ou ilegível cai no padrão, nunca em 400
    let period = first_query_param(query.as_deref(), "period");
    respond(&app_state, &endpoint, period.as_deref()).await
}

// POST /api/analytics
#[utoipa::path(
    post,
    path = "/api/analytics",
    tag = "Analytics",
    request_body = AnalyticsRequest,
    responses(
        (status = 200, description = "Resumo calculado para o endpoint", body = AnalyticsPayload),
        (status = 400, description = "Corpo JSON inválido"),
        (status = 404, description = "Endpoint desconhecido"),
        (status = 500, description = "Falha ao consultar o banco")
    )
)]
pub async fn post_analytics(
    State(app_state): State<AppState>,
    request: Result<Json<AnalyticsRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = request?;
    let (endpoint, period) = resolve_request(request);
    respond(&app_state, &endpoint, period.as_deref()).await
}

/// `path` ("bookings?period=week") tem prioridade sobre `endpoint` + `period`.
fn resolve_request(request: AnalyticsRequest) -> (String, Option<String>) {
    match request.path {
        Some(path) => {
            let (endpoint, query) = match path.split_once('?') {
                Some((endpoint, query)) => (endpoint.to_string(), Some(query)),
                None => (path.clone(), None),
            };
            (endpoint, first_query_param(query, "period"))
        }
        None => (request.endpoint.unwrap_or_default(), request.period),
    }
}

async fn respond(
    app_state: &AppState,
    endpoint: &str,
    period: Option<&str>,
) -> Result<Response, AppError> {
    let selector = AnalyticsEndpoint::parse(endpoint)
        .ok_or_else(|| AppError::EndpointNotFound(endpoint.to_string()))?;
    let period = Period::parse(period);
    let today = Local::now().date_naive();

    let payload = app_state
        .analytics_service
        .run(selector, period, today)
        .await?;

    let cache_control = format!("private, max-age={}", selector.max_age_secs());
    Ok((
        StatusCode::OK,
        [(header::CACHE_CONTROL, cache_control)],
        Json(payload),
    )
        .into_response())
}
