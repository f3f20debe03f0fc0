// src/db/booking_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::store::BookingStore,
    models::{
        analytics::CompletionStats,
        booking::{Booking, BookingRow, BookingStatus},
    },
};

// Colunas do agendamento + serviço do LEFT JOIN (prefixadas para não colidir)
const BOOKING_COLUMNS: &str = r#"
    b.id, b.customer_name, b.customer_email, b.customer_phone, b.service_id,
    b.booking_date, b.booking_time, b.service_location, b.notes, b.status,
    b.order_number, b.created_at, b.updated_at,
    s.id AS joined_service_id,
    s.name AS service_name,
    s.description AS service_description,
    s.price AS service_price,
    s.duration AS service_duration
"#;

#[derive(Clone)]
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Escapa os curingas do LIKE para que o termo seja comparado literalmente.
fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

#[async_trait]
impl BookingStore for BookingRepository {
    async fn list_bookings(&self) -> Result<Vec<Booking>, AppError> {
        let sql = format!(
            r#"
            SELECT {BOOKING_COLUMNS}
            FROM bookings b
            LEFT JOIN services s ON s.id = b.service_id
            ORDER BY b.booking_date DESC
            "#
        );

        let rows = sqlx::query_as::<_, BookingRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Booking::from).collect())
    }

    async fn search_bookings(&self, term: &str) -> Result<Vec<Booking>, AppError> {
        let sql = format!(
            r#"
            SELECT {BOOKING_COLUMNS}
            FROM bookings b
            LEFT JOIN services s ON s.id = b.service_id
            WHERE b.customer_name ILIKE $1
               OR b.customer_phone ILIKE $1
            ORDER BY b.booking_date DESC
            "#
        );

        let rows = sqlx::query_as::<_, BookingRow>(&sql)
            .bind(like_pattern(term))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Booking::from).collect())
    }

    async fn completion_aggregate(&self) -> Result<Option<CompletionStats>, AppError> {
        let stats = sqlx::query_as::<_, CompletionStats>(
            "SELECT completed, pending, in_progress, cancelled FROM get_completion_stats()",
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(stats)
    }

    async fn list_statuses(&self) -> Result<Vec<String>, AppError> {
        let statuses = sqlx::query_scalar::<_, String>("SELECT status FROM bookings")
            .fetch_all(&self.pool)
            .await?;

        Ok(statuses)
    }

    async fn count_bookings(&self) -> Result<i64, AppError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM bookings")
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: BookingStatus,
    ) -> Result<Option<Booking>, AppError> {
        // Um único statement: atualiza e devolve o registro já com o JOIN
        let sql = format!(
            r#"
            WITH b AS (
                UPDATE bookings
                SET status = $1, updated_at = NOW()
                WHERE id = $2
                RETURNING *
            )
            SELECT {BOOKING_COLUMNS}
            FROM b
            LEFT JOIN services s ON s.id = b.service_id
            "#
        );

        let row = sqlx::query_as::<_, BookingRow>(&sql)
            .bind(status.as_str())
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Booking::from))
    }
}
