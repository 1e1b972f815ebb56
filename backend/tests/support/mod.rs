#![allow(dead_code)]
use std::sync::Arc;

use chrono::NaiveDate;
use napje_backend::{
    config::Config,
    models::holiday::{Holiday, HolidayKind},
    services::{holiday_source::StaticHolidaySource, vacation::ScoringWeights},
    state::AppState,
    storage::InMemoryStore,
};

pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub fn national(date: NaiveDate, label: &str) -> Holiday {
    Holiday::new(date, label, HolidayKind::National)
}

/// National holidays observed in Brazil during 2025.
pub fn brazil_2025() -> Vec<Holiday> {
    vec![
        national(ymd(2025, 1, 1), "New Year"),
        national(ymd(2025, 3, 3), "Carnival Monday"),
        national(ymd(2025, 3, 4), "Carnival Tuesday"),
        national(ymd(2025, 4, 18), "Good Friday"),
        national(ymd(2025, 4, 21), "Tiradentes"),
        national(ymd(2025, 5, 1), "Labour Day"),
        national(ymd(2025, 6, 19), "Corpus Christi"),
        national(ymd(2025, 9, 7), "Independence Day"),
        national(ymd(2025, 10, 12), "Our Lady of Aparecida"),
        national(ymd(2025, 11, 2), "All Souls' Day"),
        national(ymd(2025, 11, 15), "Republic Day"),
        national(ymd(2025, 11, 20), "Black Consciousness Day"),
        national(ymd(2025, 12, 25), "Christmas"),
    ]
}

pub fn test_config() -> Config {
    Config {
        database_url: "postgres://localhost/napje_test".into(),
        bind_addr: "127.0.0.1:0".into(),
        time_zone: chrono_tz::America::Sao_Paulo,
        holiday_fetch_timeout_secs: 2,
        suggestion_cache_ttl_secs: 60,
        suggestion_fetch_retries: 1,
        suggestion_limit: 6,
        search_result_limit: 20,
        search_provider_timeout_secs: 2,
        scoring: ScoringWeights::default(),
    }
}

pub fn test_state(holidays: Vec<Holiday>) -> AppState {
    AppState::new(
        test_config(),
        Arc::new(StaticHolidaySource::new(holidays)),
        Arc::new(InMemoryStore::new()),
        Vec::new(),
    )
}
