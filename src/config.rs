// src/config.rs

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, str::FromStr, sync::Arc, time::Duration};

use crate::{
    db::BookingStore,
    services::{
        analytics_service::DEFAULT_SERVICE_DEMAND_LIMIT, AnalyticsService, BookingService,
    },
};

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub database_max_connections: u32,
    pub run_migrations: bool,
    pub service_demand_limit: usize,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL deve ser definida")?;

        Ok(Self {
            database_url,
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            database_max_connections: parse_var("DATABASE_MAX_CONNECTIONS", 5)?,
            run_migrations: parse_var("RUN_MIGRATIONS", true)?,
            service_demand_limit: parse_var("SERVICE_DEMAND_LIMIT", DEFAULT_SERVICE_DEMAND_LIMIT)?,
        })
    }
}

fn parse_var<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    parse_value(name, env::var(name).ok(), default)
}

// Variável ausente usa o padrão; presente mas inválida é erro de inicialização.
fn parse_value<T>(name: &str, raw: Option<String>, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{} inválida: '{}'", name, raw)),
        None => Ok(default),
    }
}

pub async fn connect_database(config: &Config) -> anyhow::Result<PgPool> {
    let db_pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .acquire_timeout(Duration::from_secs(3))
        .connect(&config.database_url)
        .await
        .context("Falha ao conectar ao banco de dados")?;

    tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");
    Ok(db_pool)
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub analytics_service: AnalyticsService,
    pub booking_service: BookingService,
}

impl AppState {
    /// Monta o gráfico de dependências a partir do handle de acesso aos dados.
    pub fn with_store(store: Arc<dyn BookingStore>, service_demand_limit: usize) -> Self {
        Self {
            analytics_service: AnalyticsService::new(store.clone(), service_demand_limit),
            booking_service: BookingService::new(store),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::parse_value;

    #[test]
    fn missing_value_uses_default() {
        let value: u32 = parse_value("DATABASE_MAX_CONNECTIONS", None, 7).unwrap();
        assert_eq!(value, 7);
    }

    #[test]
    fn present_value_is_trimmed_and_parsed() {
        let value: usize = parse_value("SERVICE_DEMAND_LIMIT", Some(" 25 ".into()), 10).unwrap();
        assert_eq!(value, 25);

        let value: bool = parse_value("RUN_MIGRATIONS", Some("false".into()), true).unwrap();
        assert!(!value);
    }

    #[test]
    fn garbage_value_is_an_error() {
        let result: anyhow::Result<usize> =
            parse_value("SERVICE_DEMAND_LIMIT", Some("muitos".into()), 10);
        let message = result.unwrap_err().to_string();
        assert!(message.contains("SERVICE_DEMAND_LIMIT"));
    }
}
