// src/services/booking_service.rs

use std::sync::Arc;

use chrono::{NaiveDate, TimeDelta};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::BookingStore,
    models::booking::{Booking, BookingStatus, CalendarEvent},
    services::{analytics_service::filter_by_window, period::Period},
};

#[derive(Clone)]
pub struct BookingService {
    store: Arc<dyn BookingStore>,
}

impl BookingService {
    pub fn new(store: Arc<dyn BookingStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Booking>, AppError> {
        self.store.list_bookings().await
    }

    /// Termo vazio devolve lista vazia, nunca "todos". O termo não é aparado.
    pub async fn search(&self, term: &str) -> Result<Vec<Booking>, AppError> {
        if term.trim().is_empty() {
            return Ok(Vec::new());
        }
        self.store.search_bookings(term).await
    }

    pub async fn update_status(&self, id: Uuid, status: &str) -> Result<Booking, AppError> {
        let new_status = BookingStatus::parse(status.trim())
            .ok_or_else(|| AppError::InvalidStatus(status.to_string()))?;

        let booking = self
            .store
            .update_status(id, new_status)
            .await?
            .ok_or(AppError::BookingNotFound)?;

        tracing::info!(
            booking_id = %id,
            status = new_status.as_str(),
            "status do agendamento atualizado"
        );

        Ok(booking)
    }

    pub async fn calendar(
        &self,
        period: Option<Period>,
        today: NaiveDate,
    ) -> Result<Vec<CalendarEvent>, AppError> {
        let mut bookings = self.store.list_bookings().await?;
        if let Some(period) = period {
            bookings = filter_by_window(bookings, &period.window(today));
        }
        Ok(bookings.iter().map(calendar_event).collect())
    }
}

/// Evento de 1 hora a partir do horário marcado.
pub fn calendar_event(booking: &Booking) -> CalendarEvent {
    let start = booking.scheduled_at();
    let status = booking.normalized_status();

    CalendarEvent {
        id: booking.id,
        title: format!(
            "{} - {}",
            booking.customer_name,
            booking.service_name().unwrap_or("Service")
        ),
        start,
        end: start + TimeDelta::hours(1),
        status,
        status_label: status.label().to_string(),
        color: status.calendar_color().to_string(),
        reference: booking.reference(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::memory_store::InMemoryBookingStore,
        models::booking::fixtures::{booking, booking_with_service, service},
        services::analytics_service::AnalyticsService,
    };

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn empty_search_returns_nothing() {
        let today = date(2025, 3, 14);
        let service = BookingService::new(Arc::new(InMemoryBookingStore::with_bookings(vec![
            booking(today, "pending"),
        ])));

        assert!(service.search("").await.unwrap().is_empty());
        assert!(service.search("   ").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn search_matches_name_or_phone_case_insensitively() {
        let mut ana = booking(date(2025, 3, 10), "pending");
        ana.customer_name = "Ana Souza".into();
        ana.customer_phone = "11 99999-0000".into();
        let mut bia = booking(date(2025, 3, 12), "pending");
        bia.customer_name = "Beatriz Lima".into();
        bia.customer_phone = "21 98888-7777".into();

        let service = BookingService::new(Arc::new(InMemoryBookingStore::with_bookings(vec![
            ana.clone(),
            bia.clone(),
        ])));

        let found = service.search("ANA").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, ana.id);

        let found = service.search("98888").await.unwrap();
        assert_eq!(found[0].id, bia.id);

        // Espaços fazem parte do termo
        let found = service.search("Ana ").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, ana.id);
        assert!(service.search("Souza ").await.unwrap().is_empty());

        let found = service.search("a").await.unwrap();
        let ids: Vec<Uuid> = found.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![bia.id, ana.id]);
    }

    #[tokio::test]
    async fn status_update_is_reflected_in_completion() {
        let today = date(2025, 3, 14);
        let target = booking(today, "pending");
        let store: Arc<dyn BookingStore> = Arc::new(InMemoryBookingStore::with_bookings(vec![
            target.clone(),
            booking(today, "pending"),
        ]));
        let bookings = BookingService::new(store.clone());
        let analytics = AnalyticsService::new(store, 10);

        let updated = bookings.update_status(target.id, "completed").await.unwrap();
        assert_eq!(updated.status, "completed");

        let stats = analytics.completion().await.unwrap();
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.pending, 1);
    }

    #[tokio::test]
    async fn status_update_rejects_unknown_status_and_id() {
        let today = date(2025, 3, 14);
        let target = booking(today, "pending");
        let service = BookingService::new(Arc::new(InMemoryBookingStore::with_bookings(vec![
            target.clone(),
        ])));

        let err = service.update_status(target.id, "done").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidStatus(ref s) if s == "done"));

        let err = service.update_status(Uuid::new_v4(), "completed").await.unwrap_err();
        assert!(matches!(err, AppError::BookingNotFound));

        // Nada foi alterado
        let all = service.list().await.unwrap();
        assert_eq!(all[0].status, "pending");
    }

    #[test]
    fn calendar_event_lasts_one_hour_and_normalizes_status() {
        let svc = service("Escova");
        let mut b = booking_with_service(date(2025, 3, 14), "archived", &svc);
        b.booking_time = "14:30".into();

        let event = calendar_event(&b);
        assert_eq!(event.title, "Maria da Silva - Escova");
        assert_eq!(event.start, date(2025, 3, 14).and_hms_opt(14, 30, 0).unwrap());
        assert_eq!(event.end - event.start, TimeDelta::hours(1));
        assert_eq!(event.status, BookingStatus::Pending);
        assert_eq!(event.status_label, "New");
        assert_eq!(event.color, "#fef3c7");
    }

    #[test]
    fn calendar_event_without_service_uses_generic_title() {
        let b = booking(date(2025, 3, 14), "cancelled");
        let event = calendar_event(&b);
        assert_eq!(event.title, "Maria da Silva - Service");
        assert_eq!(event.color, "#fee2e2");
        assert!(event.reference.starts_with("Booking "));
    }

    #[tokio::test]
    async fn calendar_can_be_narrowed_by_period() {
        let today = date(2025, 3, 14);
        let service = BookingService::new(Arc::new(InMemoryBookingStore::with_bookings(vec![
            booking(today, "pending"),
            booking(date(2025, 2, 1), "pending"),
        ])));

        assert_eq!(service.calendar(None, today).await.unwrap().len(), 2);
        assert_eq!(service.calendar(Some(Period::Day), today).await.unwrap().len(), 1);
    }
}
