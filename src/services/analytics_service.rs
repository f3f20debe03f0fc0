// src/services/analytics_service.rs

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::NaiveDate;

use crate::{
    common::error::AppError,
    db::BookingStore,
    models::{
        analytics::{
            AgeGroups, AnalyticsEndpoint, AnalyticsPayload, BookingList, CompletionStats,
            Demographics, LocationBreakdown, LocationStats, ServiceDemand, TrendPoint,
        },
        booking::{Booking, ServiceLocation},
    },
    services::period::{Period, PeriodWindow},
};

pub const UNKNOWN_SERVICE: &str = "Unknown Service";
pub const DEFAULT_SERVICE_DEMAND_LIMIT: usize = 10;

#[derive(Clone)]
pub struct AnalyticsService {
    store: Arc<dyn BookingStore>,
    service_demand_limit: usize,
}

impl AnalyticsService {
    pub fn new(store: Arc<dyn BookingStore>, service_demand_limit: usize) -> Self {
        Self {
            store,
            service_demand_limit,
        }
    }

    /// Despacha o seletor para o cálculo correspondente.
    pub async fn run(
        &self,
        endpoint: AnalyticsEndpoint,
        period: Period,
        today: NaiveDate,
    ) -> Result<AnalyticsPayload, AppError> {
        tracing::debug!(endpoint = endpoint.as_str(), ?period, "calculando analytics");

        let payload = match endpoint {
            AnalyticsEndpoint::Bookings => {
                AnalyticsPayload::Bookings(self.bookings(period, today).await?)
            }
            AnalyticsEndpoint::Completion => AnalyticsPayload::Completion(self.completion().await?),
            AnalyticsEndpoint::ServiceDemand => {
                AnalyticsPayload::ServiceDemand(self.service_demand().await?)
            }
            AnalyticsEndpoint::Location => AnalyticsPayload::Location(self.location().await?),
            AnalyticsEndpoint::Demographics => {
                AnalyticsPayload::Demographics(self.demographics().await?)
            }
            AnalyticsEndpoint::Trends => {
                AnalyticsPayload::Trends(self.trends(period, today).await?)
            }
        };

        Ok(payload)
    }

    pub async fn bookings(
        &self,
        period: Period,
        today: NaiveDate,
    ) -> Result<BookingList, AppError> {
        let bookings = self.store.list_bookings().await?;
        let data = filter_by_window(bookings, &period.window(today));
        Ok(BookingList { data })
    }

    pub async fn completion(&self) -> Result<CompletionStats, AppError> {
        match self.store.completion_aggregate().await {
            // Agregado sem linha: tudo zero
            Ok(stats) => Ok(stats.unwrap_or_default()),
            Err(e) => {
                // Sem o agregado no banco: conta na mão a partir da coluna status
                tracing::warn!(
                    "get_completion_stats indisponível, usando contagem manual: {}",
                    e
                );
                let statuses = self.store.list_statuses().await?;
                Ok(CompletionStats::from_statuses(statuses))
            }
        }
    }

    pub async fn service_demand(&self) -> Result<Vec<ServiceDemand>, AppError> {
        let bookings = self.store.list_bookings().await?;
        Ok(rank_service_demand(&bookings, self.service_demand_limit))
    }

    pub async fn location(&self) -> Result<LocationStats, AppError> {
        let bookings = self.store.list_bookings().await?;
        Ok(count_locations(bookings.iter().map(|b| b.service_location.as_str())))
    }

    pub async fn demographics(&self) -> Result<Demographics, AppError> {
        let total = self.store.count_bookings().await?;
        tracing::debug!(total, "demographics é uma distribuição fixa (placeholder)");
        Ok(synthetic_demographics(total))
    }

    pub async fn trends(
        &self,
        period: Period,
        today: NaiveDate,
    ) -> Result<Vec<TrendPoint>, AppError> {
        let BookingList { data } = self.bookings(period, today).await?;
        Ok(bucket_trends(&data, period))
    }
}

/// Mantém a ordem `booking_date` decrescente; empates preservam a ordem do banco.
pub fn filter_by_window(bookings: Vec<Booking>, window: &PeriodWindow) -> Vec<Booking> {
    let mut kept: Vec<Booking> = bookings
        .into_iter()
        .filter(|b| window.contains(b.scheduled_at()))
        .collect();
    kept.sort_by(|a, b| b.booking_date.cmp(&a.booking_date));
    kept
}

pub fn rank_service_demand(bookings: &[Booking], limit: usize) -> Vec<ServiceDemand> {
    let mut ranking: Vec<ServiceDemand> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for booking in bookings {
        let name = booking.service_name().unwrap_or(UNKNOWN_SERVICE);
        match index.get(name) {
            Some(&pos) => ranking[pos].count += 1,
            None => {
                index.insert(name.to_string(), ranking.len());
                ranking.push(ServiceDemand {
                    name: name.to_string(),
                    count: 1,
                });
            }
        }
    }

    // sort_by é estável: empates ficam na ordem em que apareceram
    ranking.sort_by(|a, b| b.count.cmp(&a.count));
    ranking.truncate(limit);
    ranking
}

pub fn count_locations<'a>(locations: impl IntoIterator<Item = &'a str>) -> LocationStats {
    let mut stats = LocationStats::default();
    for location in locations {
        match ServiceLocation::parse(location) {
            Some(ServiceLocation::InSalon) => stats.in_salon += 1,
            Some(ServiceLocation::AtHome) => stats.at_home += 1,
            None => {}
        }
    }
    stats
}

// Percentual inteiro com piso (sem ponto flutuante)
fn share(total: i64, percent: i64) -> i64 {
    total * percent / 100
}

pub fn synthetic_demographics(total: i64) -> Demographics {
    Demographics {
        synthetic: true,
        age_groups: AgeGroups {
            age_18_25: share(total, 30),
            age_26_35: share(total, 40),
            age_36_45: share(total, 20),
            age_45_plus: share(total, 10),
        },
        locations: LocationBreakdown {
            downtown: share(total, 40),
            suburbs: share(total, 30),
            uptown: share(total, 20),
            other: share(total, 10),
        },
    }
}

pub fn bucket_trends(bookings: &[Booking], period: Period) -> Vec<TrendPoint> {
    let mut buckets: BTreeMap<NaiveDate, i64> = BTreeMap::new();
    for booking in bookings {
        *buckets.entry(period.bucket_start(booking.booking_date)).or_insert(0) += 1;
    }

    buckets
        .into_iter()
        .map(|(bucket, count)| TrendPoint {
            bucket,
            label: period.bucket_label(bucket),
            bookings: count,
        })
        .collect()
}
