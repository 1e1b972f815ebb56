use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use thiserror::Error;

use crate::models::holiday::{Holiday, HolidayRow};

#[derive(Debug, Error)]
pub enum HolidaySourceError {
    #[error("holiday query failed: {0}")]
    Database(#[from] sqlx::Error),
    #[error("holiday lookup did not answer within {0:?}")]
    Timeout(Duration),
    #[error("invalid holiday window: {start} is after {end}")]
    InvalidWindow { start: NaiveDate, end: NaiveDate },
    #[error("holiday source unavailable: {0}")]
    Unavailable(String),
}

/// Read-only lookup of holidays in an inclusive date range.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HolidaySource: Send + Sync {
    async fn fetch_holidays(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Holiday>, HolidaySourceError>;
}

fn ensure_valid_window(start: NaiveDate, end: NaiveDate) -> Result<(), HolidaySourceError> {
    if start > end {
        Err(HolidaySourceError::InvalidWindow { start, end })
    } else {
        Ok(())
    }
}

/// Converts raw rows, dropping (and logging) the ones that fail validation.
pub fn validate_rows(rows: impl IntoIterator<Item = HolidayRow>) -> Vec<Holiday> {
    let mut holidays: Vec<Holiday> = rows
        .into_iter()
        .filter_map(|row| match Holiday::try_from(row) {
            Ok(holiday) => Some(holiday),
            Err(err) => {
                tracing::warn!(error = %err, "Skipping invalid holiday row");
                None
            }
        })
        .collect();
    holidays.sort_by(|a, b| a.date.cmp(&b.date));
    holidays
}

#[derive(Clone)]
pub struct PgHolidaySource {
    pool: PgPool,
}

impl PgHolidaySource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HolidaySource for PgHolidaySource {
    async fn fetch_holidays(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Holiday>, HolidaySourceError> {
        ensure_valid_window(start, end)?;

        // Dates are compared as ISO strings so malformed rows still come back
        // and get reported by `validate_rows`.
        let rows = sqlx::query_as::<_, HolidayRow>(
            r#"
            SELECT holiday_date, name, kind
            FROM holidays
            WHERE holiday_date >= $1
              AND holiday_date <= $2
            ORDER BY holiday_date
            "#,
        )
        .bind(start.format("%Y-%m-%d").to_string())
        .bind(end.format("%Y-%m-%d").to_string())
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!(%start, %end, rows = rows.len(), "Fetched holiday rows");
        Ok(validate_rows(rows))
    }
}

/// Fixed in-memory holiday list, optionally slowed down or forced to fail.
#[derive(Clone, Default)]
pub struct StaticHolidaySource {
    holidays: Arc<Vec<Holiday>>,
    delay: Option<Duration>,
    failure: Option<String>,
}

impl StaticHolidaySource {
    pub fn new(holidays: impl IntoIterator<Item = Holiday>) -> Self {
        let mut holidays: Vec<Holiday> = holidays.into_iter().collect();
        holidays.sort_by(|a, b| a.date.cmp(&b.date));
        Self {
            holidays: Arc::new(holidays),
            delay: None,
            failure: None,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }
}

#[async_trait]
impl HolidaySource for StaticHolidaySource {
    async fn fetch_holidays(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Holiday>, HolidaySourceError> {
        ensure_valid_window(start, end)?;

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(message) = &self.failure {
            return Err(HolidaySourceError::Unavailable(message.clone()));
        }

        Ok(self
            .holidays
            .iter()
            .filter(|h| h.date >= start && h.date <= end)
            .cloned()
            .collect())
    }
}
