// src/models/analytics.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::models::booking::{Booking, BookingStatus};

// --- Seletor do endpoint ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyticsEndpoint {
    Bookings,
    Completion,
    ServiceDemand,
    Location,
    Demographics,
    Trends,
}

impl AnalyticsEndpoint {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().trim_matches('/') {
            "bookings" => Some(AnalyticsEndpoint::Bookings),
            "completion" => Some(AnalyticsEndpoint::Completion),
            "service-demand" => Some(AnalyticsEndpoint::ServiceDemand),
            "location" => Some(AnalyticsEndpoint::Location),
            "demographics" => Some(AnalyticsEndpoint::Demographics),
            "trends" => Some(AnalyticsEndpoint::Trends),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AnalyticsEndpoint::Bookings => "bookings",
            AnalyticsEndpoint::Completion => "completion",
            AnalyticsEndpoint::ServiceDemand => "service-demand",
            AnalyticsEndpoint::Location => "location",
            AnalyticsEndpoint::Demographics => "demographics",
            AnalyticsEndpoint::Trends => "trends",
        }
    }

    /// Janela de validade (segundos) anunciada ao painel via Cache-Control.
    pub fn max_age_secs(&self) -> u64 {
        match self {
            AnalyticsEndpoint::Bookings | AnalyticsEndpoint::Trends => 180,
            _ => 300,
        }
    }
}

// --- Parâmetros de entrada ---

/// Corpo do POST: `{ "path": "bookings?period=week" }` ou
/// `{ "endpoint": "bookings", "period": "week" }`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct AnalyticsRequest {
    #[schema(example = "bookings?period=week")]
    pub path: Option<String>,
    #[schema(example = "bookings")]
    pub endpoint: Option<String>,
    #[schema(example = "week")]
    pub period: Option<String>,
}

// --- Respostas ---

#[derive(Debug, Serialize, ToSchema)]
pub struct BookingList {
    pub data: Vec<Booking>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompletionStats {
    pub completed: i64,
    pub pending: i64,
    pub in_progress: i64,
    pub cancelled: i64,
}

impl CompletionStats {
    /// Contagem manual por status; valores fora do conjunto são ignorados.
    pub fn from_statuses<I, S>(statuses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut stats = CompletionStats::default();
        for status in statuses {
            match BookingStatus::parse(status.as_ref()) {
                Some(BookingStatus::Completed) => stats.completed += 1,
                Some(BookingStatus::Pending) => stats.pending += 1,
                Some(BookingStatus::InProgress) => stats.in_progress += 1,
                Some(BookingStatus::Cancelled) => stats.cancelled += 1,
                None => {}
            }
        }
        stats
    }

    pub fn total(&self) -> i64 {
        self.completed + self.pending + self.in_progress + self.cancelled
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ServiceDemand {
    #[schema(example = "Corte Feminino")]
    pub name: String,
    #[schema(example = 42)]
    pub count: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct LocationStats {
    #[serde(rename = "In Salon")]
    pub in_salon: i64,
    #[serde(rename = "At Home")]
    pub at_home: i64,
}

// Placeholder: o banco não tem idade nem bairro do cliente.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Demographics {
    /// Sempre `true`: distribuição fixa, não vem de dados reais.
    pub synthetic: bool,
    pub age_groups: AgeGroups,
    pub locations: LocationBreakdown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct AgeGroups {
    #[serde(rename = "18-25")]
    pub age_18_25: i64,
    #[serde(rename = "26-35")]
    pub age_26_35: i64,
    #[serde(rename = "36-45")]
    pub age_36_45: i64,
    #[serde(rename = "45+")]
    pub age_45_plus: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct LocationBreakdown {
    pub downtown: i64,
    pub suburbs: i64,
    pub uptown: i64,
    pub other: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct TrendPoint {
    #[schema(value_type = String, format = Date, example = "2025-03-01")]
    pub bucket: NaiveDate,
    #[schema(example = "Mar 01")]
    pub label: String,
    #[schema(example = 12)]
    pub bookings: i64,
}

/// Qualquer uma das respostas do endpoint de analytics.
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum AnalyticsPayload {
    Bookings(BookingList),
    Completion(CompletionStats),
    ServiceDemand(Vec<ServiceDemand>),
    Location(LocationStats),
    Demographics(Demographics),
    Trends(Vec<TrendPoint>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_selectors_only() {
        assert_eq!(
            AnalyticsEndpoint::parse("service-demand"),
            Some(AnalyticsEndpoint::ServiceDemand)
        );
        assert_eq!(AnalyticsEndpoint::parse("/completion"), Some(AnalyticsEndpoint::Completion));
        assert_eq!(AnalyticsEndpoint::parse("revenue"), None);
        assert_eq!(AnalyticsEndpoint::parse(""), None);
        assert_eq!(AnalyticsEndpoint::Location.as_str(), "location");
    }

    #[test]
    fn completion_counts_only_known_statuses() {
        let stats = CompletionStats::from_statuses([
            "pending",
            "pending",
            "completed",
            "archived",
            "in-progress",
        ]);
        assert_eq!(
            stats,
            CompletionStats {
                completed: 1,
                pending: 2,
                in_progress: 1,
                cancelled: 0,
            }
        );
        assert_eq!(stats.total(), 4);
    }

    #[test]
    fn completion_serializes_in_progress_as_camel_case() {
        let stats = CompletionStats {
            in_progress: 3,
            ..Default::default()
        };
        let json = serde_json::to_value(stats).unwrap();
        assert_eq!(json["inProgress"], 3);
        assert!(json.get("in_progress").is_none());
    }

    #[test]
    fn location_and_demographics_use_display_keys() {
        let json = serde_json::to_value(LocationStats {
            in_salon: 2,
            at_home: 1,
        })
        .unwrap();
        assert_eq!(json["In Salon"], 2);
        assert_eq!(json["At Home"], 1);

        let demo = Demographics {
            synthetic: true,
            age_groups: AgeGroups {
                age_18_25: 3,
                age_26_35: 4,
                age_36_45: 2,
                age_45_plus: 1,
            },
            locations: LocationBreakdown {
                downtown: 4,
                suburbs: 3,
                uptown: 2,
                other: 1,
            },
        };
        let json = serde_json::to_value(demo).unwrap();
        assert_eq!(json["ageGroups"]["45+"], 1);
        assert_eq!(json["locations"]["Downtown"], 4);
        assert_eq!(json["synthetic"], true);
    }
}
