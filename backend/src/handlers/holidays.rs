use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use validator::Validate;

use crate::{
    error::AppError,
    models::holiday::HolidayResponse,
    state::AppState,
    utils::time::today_local,
};

#[derive(Debug, Deserialize, Validate)]
pub struct YearQuery {
    #[validate(range(min = 1900, max = 9999))]
    pub year: Option<i32>,
}

impl YearQuery {
    /// Requested year, or the current one in the configured timezone.
    pub fn resolve(&self, state: &AppState) -> i32 {
        self.year
            .unwrap_or_else(|| today_local(&state.config.time_zone).year())
    }
}

pub async fn list_holidays(
    State(state): State<AppState>,
    Query(params): Query<YearQuery>,
) -> Result<Json<Vec<HolidayResponse>>, AppError> {
    params.validate()?;
    let year = params.resolve(&state);
    let (start, end) = match (
        NaiveDate::from_ymd_opt(year, 1, 1),
        NaiveDate::from_ymd_opt(year, 12, 31),
    ) {
        (Some(start), Some(end)) => (start, end),
        _ => return Err(AppError::BadRequest(format!("Invalid year: {}", year))),
    };

    let fetch = state.holidays.fetch_holidays(start, end);
    let holidays = tokio::time::timeout(state.config.holiday_fetch_timeout(), fetch)
        .await
        .map_err(|_| {
            AppError::InternalServerError(anyhow::anyhow!(
                "Holiday fetch timed out for {}",
                year
            ))
        })?
        .map_err(|e| AppError::InternalServerError(e.into()))?;

    Ok(Json(
        holidays
            .into_iter()
            .map(HolidayResponse::from)
            .collect::<Vec<_>>(),
    ))
}
