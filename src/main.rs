//src/main.rs

use std::sync::Arc;

use anyhow::Context;
use axum::{
    http::{header, HeaderName, Method},
    routing::{get, patch, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod models;
mod services;

use crate::config::{AppState, Config};
use crate::db::{BookingRepository, BookingStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    // Se a configuração falhar, a aplicação não deve iniciar.
    let config = Config::from_env()?;
    let db_pool = config::connect_database(&config).await?;

    if config.run_migrations {
        sqlx::migrate!()
            .run(&db_pool)
            .await
            .context("Falha ao rodar as migrações do banco de dados.")?;
        tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");
    }

    let store: Arc<dyn BookingStore> = Arc::new(BookingRepository::new(db_pool));
    let app = build_router(AppState::with_store(store, config.service_demand_limit));

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Falha ao iniciar o listener TCP em {}", config.bind_addr))?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("Erro no servidor Axum")?;
    Ok(())
}

pub(crate) fn build_router(app_state: AppState) -> Router {
    // CORS aberto: o painel chama de qualquer origem e faz preflight
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
        ]);

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        // Analytics
        .route("/api/analytics", post(handlers::analytics::post_analytics))
        .route("/api/analytics/{endpoint}", get(handlers::analytics::get_analytics))
        // Agendamentos
        .route("/api/bookings", get(handlers::bookings::list_bookings))
        .route("/api/bookings/search", get(handlers::bookings::search_bookings))
        .route("/api/bookings/calendar", get(handlers::bookings::get_calendar))
        .route(
            "/api/bookings/{booking_id}/status",
            patch(handlers::bookings::update_booking_status),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}
