// src/db/memory_store.rs
//
// Store em memória usado pelos testes de serviço e de rota.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::store::BookingStore,
    models::{
        analytics::CompletionStats,
        booking::{Booking, BookingStatus},
    },
};

#[derive(Default)]
pub struct InMemoryBookingStore {
    bookings: RwLock<Vec<Booking>>,
    // Simula a ausência da função get_completion_stats()
    aggregate_unavailable: AtomicBool,
    // Simula a função devolvendo zero linhas
    aggregate_empty: AtomicBool,
    // Simula o banco fora do ar
    offline: AtomicBool,
}

impl InMemoryBookingStore {
    pub fn with_bookings(bookings: Vec<Booking>) -> Self {
        Self {
            bookings: RwLock::new(bookings),
            ..Default::default()
        }
    }

    pub fn without_aggregate(self) -> Self {
        self.aggregate_unavailable.store(true, Ordering::SeqCst);
        self
    }

    pub fn without_aggregate_row(self) -> Self {
        self.aggregate_empty.store(true, Ordering::SeqCst);
        self
    }

    pub fn offline(self) -> Self {
        self.offline.store(true, Ordering::SeqCst);
        self
    }

    fn check_online(&self) -> Result<(), AppError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(AppError::DatabaseError(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }

    async fn sorted(&self) -> Vec<Booking> {
        let mut bookings = self.bookings.read().await.clone();
        bookings.sort_by(|a, b| b.booking_date.cmp(&a.booking_date));
        bookings
    }
}

#[async_trait]
impl BookingStore for InMemoryBookingStore {
    async fn list_bookings(&self) -> Result<Vec<Booking>, AppError> {
        self.check_online()?;
        Ok(self.sorted().await)
    }

    async fn search_bookings(&self, term: &str) -> Result<Vec<Booking>, AppError> {
        self.check_online()?;
        let needle = term.to_lowercase();
        Ok(self
            .sorted()
            .await
            .into_iter()
            .filter(|b| {
                b.customer_name.to_lowercase().contains(&needle)
                    || b.customer_phone.to_lowercase().contains(&needle)
            })
            .collect())
    }

    async fn completion_aggregate(&self) -> Result<Option<CompletionStats>, AppError> {
        self.check_online()?;
        if self.aggregate_unavailable.load(Ordering::SeqCst) {
            return Err(AppError::DatabaseError(sqlx::Error::Protocol(
                "function get_completion_stats() does not exist".into(),
            )));
        }
        if self.aggregate_empty.load(Ordering::SeqCst) {
            return Ok(None);
        }
        let bookings = self.bookings.read().await;
        Ok(Some(CompletionStats::from_statuses(
            bookings.iter().map(|b| b.status.as_str()),
        )))
    }

    async fn list_statuses(&self) -> Result<Vec<String>, AppError> {
        self.check_online()?;
        let bookings = self.bookings.read().await;
        Ok(bookings.iter().map(|b| b.status.clone()).collect())
    }

    async fn count_bookings(&self) -> Result<i64, AppError> {
        self.check_online()?;
        Ok(self.bookings.read().await.len() as i64)
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: BookingStatus,
    ) -> Result<Option<Booking>, AppError> {
        self.check_online()?;
        let mut bookings = self.bookings.write().await;
        let Some(booking) = bookings.iter_mut().find(|b| b.id == id) else {
            return Ok(None);
        };
        booking.status = status.as_str().to_string();
        booking.updated_at = Utc::now();
        Ok(Some(booking.clone()))
    }
}
