use std::{collections::HashMap, sync::Arc, time::Duration};

use chrono::{NaiveDate, Utc};
use tokio::{sync::RwLock, time::Instant};

use super::{fallback_suggestions, suggest_vacations, ScoringWeights, DEFAULT_SUGGESTION_LIMIT};
use crate::{
    config::Config,
    models::{holiday::Holiday, vacation::SuggestionSet},
    services::holiday_source::{HolidaySource, HolidaySourceError},
};

const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_millis(200);

#[derive(Debug, Clone)]
pub struct SuggestionOptions {
    pub fetch_timeout: Duration,
    pub retries: u32,
    /// Delay before the first retry; doubled on every further attempt.
    pub retry_backoff: Duration,
    pub cache_ttl: Duration,
    pub limit: usize,
    pub weights: ScoringWeights,
}

impl Default for SuggestionOptions {
    fn default() -> Self {
        Self {
            fetch_timeout: Duration::from_secs(10),
            retries: 2,
            retry_backoff: DEFAULT_RETRY_BACKOFF,
            cache_ttl: Duration::from_secs(300),
            limit: DEFAULT_SUGGESTION_LIMIT,
            weights: ScoringWeights::default(),
        }
    }
}

impl SuggestionOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            fetch_timeout: config.holiday_fetch_timeout(),
            retries: config.suggestion_fetch_retries,
            retry_backoff: DEFAULT_RETRY_BACKOFF,
            cache_ttl: config.suggestion_cache_ttl(),
            limit: config.suggestion_limit,
            weights: config.scoring,
        }
    }
}

struct CachedSet {
    stored_at: Instant,
    set: SuggestionSet,
}

/// Serves vacation suggestions for a year. Never fails: any upstream problem
/// degrades the answer to the static fallback.
pub struct VacationSuggestionService {
    source: Arc<dyn HolidaySource>,
    options: SuggestionOptions,
    cache: RwLock<HashMap<(i32, NaiveDate), CachedSet>>,
}

impl VacationSuggestionService {
    pub fn new(source: Arc<dyn HolidaySource>, options: SuggestionOptions) -> Self {
        Self {
            source,
            options,
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn options(&self) -> &SuggestionOptions {
        &self.options
    }

    pub async fn suggestions(&self, year: i32, today: NaiveDate) -> SuggestionSet {
        if let Some(cached) = self.cached(year, today).await {
            tracing::debug!(year, "Serving vacation suggestions from cache");
            return cached;
        }

        let set = match self.fetch_year(year).await {
            Ok(holidays) => self.generate(year, today, &holidays),
            Err(err) => {
                tracing::warn!(year, error = %err, "Holiday fetch failed, using fallback suggestions");
                self.degraded(year)
            }
        };

        if !set.degraded {
            let mut cache = self.cache.write().await;
            let ttl = self.options.cache_ttl;
            cache.retain(|(_, cached_today), entry| {
                *cached_today == today && entry.stored_at.elapsed() < ttl
            });
            cache.insert(
                (year, today),
                CachedSet {
                    stored_at: Instant::now(),
                    set: set.clone(),
                },
            );
        }

        set
    }

    /// Drops cached answers for `year`.
    pub async fn invalidate(&self, year: i32) {
        self.cache.write().await.retain(|(cached_year, _), _| *cached_year != year);
    }

    async fn cached(&self, year: i32, today: NaiveDate) -> Option<SuggestionSet> {
        let cache = self.cache.read().await;
        cache
            .get(&(year, today))
            .filter(|entry| entry.stored_at.elapsed() < self.options.cache_ttl)
            .map(|entry| entry.set.clone())
    }

    fn generate(&self, year: i32, today: NaiveDate, holidays: &[Holiday]) -> SuggestionSet {
        match suggest_vacations(
            holidays,
            year,
            today,
            &self.options.weights,
            self.options.limit,
        ) {
            Ok(suggestions) => SuggestionSet {
                year,
                suggestions,
                degraded: false,
                generated_at: Utc::now(),
            },
            Err(err) => {
                tracing::warn!(year, error = %err, "Vacation suggestion generation failed");
                self.degraded(year)
            }
        }
    }

    fn degraded(&self, year: i32) -> SuggestionSet {
        let mut suggestions = fallback_suggestions(year);
        suggestions.truncate(self.options.limit);
        SuggestionSet {
            year,
            suggestions,
            degraded: true,
            generated_at: Utc::now(),
        }
    }

    /// Loads the year's holidays, each attempt bounded by the fetch timeout.
    /// Source errors are retried; an expired deadline is final.
    async fn fetch_year(&self, year: i32) -> Result<Vec<Holiday>, HolidaySourceError> {
        let (start, end) = match (
            NaiveDate::from_ymd_opt(year, 1, 1),
            NaiveDate::from_ymd_opt(year, 12, 31),
        ) {
            (Some(start), Some(end)) => (start, end),
            _ => {
                return Err(HolidaySourceError::Unavailable(format!(
                    "year {} out of range",
                    year
                )))
            }
        };

        let mut attempt: u32 = 0;
        loop {
            let fetch = self.source.fetch_holidays(start, end);
            match tokio::time::timeout(self.options.fetch_timeout, fetch).await {
                Ok(Ok(holidays)) => return Ok(holidays),
                Ok(Err(err)) if attempt < self.options.retries => {
                    let backoff = self
                        .options
                        .retry_backoff
                        .saturating_mul(2u32.saturating_pow(attempt));
                    attempt += 1;
                    tracing::warn!(year, attempt, ?backoff, error = %err, "Retrying holiday fetch");
                    tokio::time::sleep(backoff).await;
                }
                Ok(Err(err)) => return Err(err),
                Err(_) => return Err(HolidaySourceError::Timeout(self.options.fetch_timeout)),
            }
        }
    }
}
