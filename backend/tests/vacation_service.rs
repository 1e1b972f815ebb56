mod support;

use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use async_trait::async_trait;
use chrono::NaiveDate;
use napje_backend::{
    models::holiday::Holiday,
    services::{
        holiday_source::{HolidaySource, HolidaySourceError, StaticHolidaySource},
        vacation::{SuggestionOptions, VacationSuggestionService},
    },
};
use support::{national, ymd};

struct CountingSource {
    calls: AtomicUsize,
    inner: StaticHolidaySource,
}

#[async_trait]
impl HolidaySource for CountingSource {
    async fn fetch_holidays(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Holiday>, HolidaySourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch_holidays(start, end).await
    }
}

fn christmas() -> Vec<Holiday> {
    vec![national(ymd(2025, 12, 25), "Christmas")]
}

#[tokio::test(start_paused = true)]
async fn slow_source_times_out_into_fallback() {
    let source = StaticHolidaySource::new(christmas()).with_delay(Duration::from_secs(11));
    let service = VacationSuggestionService::new(Arc::new(source), SuggestionOptions::default());

    let set = service.suggestions(2025, ymd(2025, 1, 1)).await;

    assert!(set.degraded);
    let ids: Vec<_> = set.suggestions.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["basic-january", "basic-may"]);
}

#[tokio::test(start_paused = true)]
async fn source_within_deadline_is_used() {
    let source = StaticHolidaySource::new(christmas()).with_delay(Duration::from_secs(9));
    let service = VacationSuggestionService::new(Arc::new(source), SuggestionOptions::default());

    let set = service.suggestions(2025, ymd(2025, 1, 1)).await;

    assert!(!set.degraded);
    assert_eq!(set.suggestions[0].id, "after-2025-12-25");
}

#[tokio::test]
async fn unavailable_source_degrades() {
    let service = VacationSuggestionService::new(
        Arc::new(StaticHolidaySource::failing("calendar offline")),
        SuggestionOptions {
            retries: 0,
            ..SuggestionOptions::default()
        },
    );

    let set = service.suggestions(2025, ymd(2025, 1, 1)).await;
    assert!(set.degraded);
    assert_eq!(set.year, 2025);
}

#[tokio::test(start_paused = true)]
async fn cache_expires_after_ttl() {
    let source = Arc::new(CountingSource {
        calls: AtomicUsize::new(0),
        inner: StaticHolidaySource::new(christmas()),
    });
    let service = VacationSuggestionService::new(
        source.clone(),
        SuggestionOptions {
            cache_ttl: Duration::from_secs(60),
            ..SuggestionOptions::default()
        },
    );

    service.suggestions(2025, ymd(2025, 1, 1)).await;
    service.suggestions(2025, ymd(2025, 1, 1)).await;
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);

    tokio::time::advance(Duration::from_secs(61)).await;
    service.suggestions(2025, ymd(2025, 1, 1)).await;
    assert_eq!(source.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn cache_is_keyed_by_reference_date() {
    let source = Arc::new(CountingSource {
        calls: AtomicUsize::new(0),
        inner: StaticHolidaySource::new(christmas()),
    });
    let service = VacationSuggestionService::new(source.clone(), SuggestionOptions::default());

    let early = service.suggestions(2025, ymd(2025, 1, 1)).await;
    let late = service.suggestions(2025, ymd(2025, 12, 26)).await;

    assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    assert!(!early.degraded);
    assert_eq!(late.suggestions[0].id, "basic-january");
}
