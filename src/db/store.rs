// src/db/store.rs

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        analytics::CompletionStats,
        booking::{Booking, BookingStatus},
    },
};

/// Acesso aos agendamentos. Os serviços recebem o handle explicitamente (via AppState).
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Todos os agendamentos com o serviço vinculado, `booking_date` decrescente.
    async fn list_bookings(&self) -> Result<Vec<Booking>, AppError>;

    /// Busca por nome ou telefone (substring, sem diferenciar maiúsculas).
    async fn search_bookings(&self, term: &str) -> Result<Vec<Booking>, AppError>;

    /// Agregado pré-calculado. `Ok(None)` quando a função não retorna linha.
    async fn completion_aggregate(&self) -> Result<Option<CompletionStats>, AppError>;

    async fn list_statuses(&self) -> Result<Vec<String>, AppError>;

    async fn count_bookings(&self) -> Result<i64, AppError>;

    /// `Ok(None)` quando o id não existe.
    async fn update_status(
        &self,
        id: Uuid,
        status: BookingStatus,
    ) -> Result<Option<Booking>, AppError>;
}
