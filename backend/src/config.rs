use anyhow::anyhow;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::{env, str::FromStr, time::Duration};

use crate::services::vacation::ScoringWeights;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub time_zone: Tz,
    pub holiday_fetch_timeout_secs: u64,
    pub suggestion_cache_ttl_secs: u64,
    pub suggestion_fetch_retries: u32,
    pub suggestion_limit: usize,
    pub search_result_limit: usize,
    pub search_provider_timeout_secs: u64,
    pub scoring: ScoringWeights,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "postgres://localhost/napje".to_string());

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let time_zone_name =
            env::var("APP_TIMEZONE").unwrap_or_else(|_| "America/Sao_Paulo".to_string());
        let time_zone: Tz = time_zone_name
            .parse()
            .map_err(|_| anyhow!("Invalid APP_TIMEZONE value: {}", time_zone_name))?;

        let defaults = ScoringWeights::default();
        let scoring = ScoringWeights {
            base: env_or("SCORE_BASE", defaults.base),
            per_holiday: env_or("SCORE_PER_HOLIDAY", defaults.per_holiday),
            after_bonus: env_or("SCORE_AFTER_BONUS", defaults.after_bonus),
            dec_jan_bonus: env_or("SCORE_DEC_JAN_BONUS", defaults.dec_jan_bonus),
            jun_aug_bonus: env_or("SCORE_JUN_AUG_BONUS", defaults.jun_aug_bonus),
            mar_may_bonus: env_or("SCORE_MAR_MAY_BONUS", defaults.mar_may_bonus),
            february_penalty: env_or("SCORE_FEBRUARY_PENALTY", defaults.february_penalty),
        };

        Ok(Config {
            database_url,
            bind_addr,
            time_zone,
            holiday_fetch_timeout_secs: env_or("HOLIDAY_FETCH_TIMEOUT_SECS", 10),
            suggestion_cache_ttl_secs: env_or("SUGGESTION_CACHE_TTL_SECS", 300),
            suggestion_fetch_retries: env_or("SUGGESTION_FETCH_RETRIES", 2),
            suggestion_limit: env_or("SUGGESTION_LIMIT", 6),
            search_result_limit: env_or("SEARCH_RESULT_LIMIT", 20),
            search_provider_timeout_secs: env_or("SEARCH_PROVIDER_TIMEOUT_SECS", 5),
            scoring,
        })
    }

    pub fn holiday_fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.holiday_fetch_timeout_secs)
    }

    pub fn suggestion_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.suggestion_cache_ttl_secs)
    }

    pub fn search_provider_timeout(&self) -> Duration {
        Duration::from_secs(self.search_provider_timeout_secs)
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}
