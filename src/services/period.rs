// src/services/period.rs

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Day,
    Week,
    #[default]
    Month,
    Quarter,
    Year,
}

/// Intervalo fechado `[start, end]` em horário local.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl PeriodWindow {
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        at >= self.start && at <= self.end
    }

    /// Quantidade de dias de calendário cobertos pela janela.
    pub fn calendar_days(&self) -> i64 {
        (self.end.date() - self.start.date()).num_days() + 1
    }
}

impl Period {
    /// Período ausente ou desconhecido vira `Month`. Só aceita o valor exato.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("day") => Period::Day,
            Some("week") => Period::Week,
            Some("month") => Period::Month,
            Some("quarter") => Period::Quarter,
            Some("year") => Period::Year,
            _ => Period::default(),
        }
    }

    pub fn window(self, today: NaiveDate) -> PeriodWindow {
        let start_date = match self {
            Period::Day => today,
            Period::Week => today - TimeDelta::days(6),
            Period::Month => start_of_month(today),
            Period::Quarter => start_of_quarter(today),
            Period::Year => start_of_year(today),
        };

        // Fim do dia: 23:59:59.999
        let end =
            today.and_time(NaiveTime::MIN) + TimeDelta::days(1) - TimeDelta::milliseconds(1);

        PeriodWindow {
            start: start_date.and_time(NaiveTime::MIN),
            end,
        }
    }

    /// Início do balde de agrupamento para o gráfico de tendência.
    /// Como a janela começa no início do período, `month`, `quarter` e `year`
    /// sempre caem num único balde.
    pub fn bucket_start(self, date: NaiveDate) -> NaiveDate {
        match self {
            Period::Day => date,
            // Semana começa no domingo
            Period::Week => {
                date - TimeDelta::days(date.weekday().num_days_from_sunday() as i64)
            }
            Period::Month => start_of_month(date),
            Period::Quarter => start_of_quarter(date),
            Period::Year => start_of_year(date),
        }
    }

    pub fn bucket_label(self, bucket: NaiveDate) -> String {
        let pattern = match self {
            Period::Day => "%H:%M",
            Period::Week => "%a",
            Period::Month => "%b %d",
            Period::Quarter | Period::Year => "%b",
        };
        bucket.and_time(NaiveTime::MIN).format(pattern).to_string()
    }
}

fn start_of_month(date: NaiveDate) -> NaiveDate {
    date - TimeDelta::days(date.day0() as i64)
}

fn start_of_quarter(date: NaiveDate) -> NaiveDate {
    let quarter_month = (date.month0() / 3) * 3 + 1;
    NaiveDate::from_ymd_opt(date.year(), quarter_month, 1).unwrap_or_else(|| start_of_month(date))
}

fn start_of_year(date: NaiveDate) -> NaiveDate {
    date - TimeDelta::days(date.ordinal0() as i64)
}
