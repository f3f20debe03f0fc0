// src/models/booking.rs

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Enums ---

// O banco guarda o status como TEXT; o enum só é usado para escrita e exibição.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum BookingStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 4] = [
        BookingStatus::Pending,
        BookingStatus::InProgress,
        BookingStatus::Completed,
        BookingStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::InProgress => "in-progress",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == value)
    }

    /// Status desconhecido é exibido como "New" (pending).
    pub fn normalize(value: &str) -> Self {
        Self::parse(value).unwrap_or(BookingStatus::Pending)
    }

    pub fn label(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "New",
            BookingStatus::InProgress => "In Progress",
            BookingStatus::Completed => "Completed",
            BookingStatus::Cancelled => "Cancelled",
        }
    }

    // Cor de fundo do evento no calendário
    pub fn calendar_color(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "#fef3c7",
            BookingStatus::InProgress => "#dbeafe",
            BookingStatus::Completed => "#d1fae5",
            BookingStatus::Cancelled => "#fee2e2",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceLocation {
    InSalon,
    AtHome,
}

impl ServiceLocation {
    /// Só aceita o valor exato gravado pelo fluxo de agendamento.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "in-salon" => Some(ServiceLocation::InSalon),
            "at-home" => Some(ServiceLocation::AtHome),
            _ => None,
        }
    }
}

// --- Serviço (sub-registro do JOIN) ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ServiceSummary {
    pub id: Uuid,
    #[schema(example = "Corte Feminino")]
    pub name: String,
    pub description: String,
    #[schema(value_type = f64, example = 80.0)]
    pub price: Decimal,
    // Minutos
    #[schema(example = 60)]
    pub duration: i32,
}

// --- Linha crua do banco (bookings LEFT JOIN services) ---

#[derive(Debug, Clone, FromRow)]
pub struct BookingRow {
    pub id: Uuid,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub service_id: Option<Uuid>,
    pub booking_date: NaiveDate,
    pub booking_time: String,
    pub service_location: String,
    pub notes: Option<String>,
    pub status: String,
    pub order_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    // Colunas do JOIN: todas nulas quando o serviço não existe
    pub joined_service_id: Option<Uuid>,
    pub service_name: Option<String>,
    pub service_description: Option<String>,
    pub service_price: Option<Decimal>,
    pub service_duration: Option<i32>,
}

// --- Agendamento ---

// Mantém os nomes de coluna (snake_case) que o painel já consome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Booking {
    pub id: Uuid,
    #[schema(example = "Maria da Silva")]
    pub customer_name: String,
    #[schema(example = "maria@email.com")]
    pub customer_email: String,
    #[schema(example = "+55 11 91234-5678")]
    pub customer_phone: String,
    pub service_id: Option<Uuid>,
    #[schema(value_type = String, format = Date, example = "2025-03-14")]
    pub booking_date: NaiveDate,
    #[schema(example = "14:30")]
    pub booking_time: String,
    #[schema(example = "in-salon")]
    pub service_location: String,
    pub notes: Option<String>,
    #[schema(example = "pending")]
    pub status: String,
    #[schema(example = "ORD-20250314-001")]
    pub order_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub services: Option<ServiceSummary>,
}

impl From<BookingRow> for Booking {
    fn from(row: BookingRow) -> Self {
        let services = match (row.joined_service_id, row.service_name) {
            (Some(id), Some(name)) => Some(ServiceSummary {
                id,
                name,
                description: row.service_description.unwrap_or_default(),
                price: row.service_price.unwrap_or(Decimal::ZERO),
                duration: row.service_duration.unwrap_or_default(),
            }),
            _ => None,
        };

        Self {
            id: row.id,
            customer_name: row.customer_name,
            customer_email: row.customer_email,
            customer_phone: row.customer_phone,
            service_id: row.service_id,
            booking_date: row.booking_date,
            booking_time: row.booking_time,
            service_location: row.service_location,
            notes: row.notes,
            status: row.status,
            order_number: row.order_number,
            created_at: row.created_at,
            updated_at: row.updated_at,
            services,
        }
    }
}

impl Booking {
    /// Data + hora marcada. Hora ilegível conta como meia-noite.
    pub fn scheduled_at(&self) -> NaiveDateTime {
        let time = parse_booking_time(&self.booking_time).unwrap_or(NaiveTime::MIN);
        self.booking_date.and_time(time)
    }

    pub fn normalized_status(&self) -> BookingStatus {
        BookingStatus::normalize(&self.status)
    }

    pub fn service_name(&self) -> Option<&str> {
        self.services.as_ref().map(|s| s.name.as_str())
    }

    /// Número do pedido ou, na falta dele, "Booking " + 8 primeiros caracteres do id.
    pub fn reference(&self) -> String {
        match self.order_number.as_deref() {
            Some(number) if !number.trim().is_empty() => number.to_string(),
            _ => {
                let id = self.id.to_string();
                format!("Booking {}", &id[..8])
            }
        }
    }
}

fn parse_booking_time(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .ok()
}

// --- Calendário ---

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: Uuid,
    #[schema(example = "Maria da Silva - Corte Feminino")]
    pub title: String,
    #[schema(value_type = String, example = "2025-03-14T14:30:00")]
    pub start: NaiveDateTime,
    #[schema(value_type = String, example = "2025-03-14T15:30:00")]
    pub end: NaiveDateTime,
    pub status: BookingStatus,
    #[schema(example = "New")]
    pub status_label: String,
    #[schema(example = "#fef3c7")]
    pub color: String,
    #[schema(example = "ORD-20250314-001")]
    pub reference: String,
}
