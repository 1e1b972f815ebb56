use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{Datelike, NaiveDate};
use serde::Deserialize;

use crate::{
    error::AppError, models::weekly::WeeklyPlan, state::AppState, utils::time::today_local,
};

const MIN_PLAN_YEAR: i32 = 1900;
const MAX_PLAN_YEAR: i32 = 9999;

#[derive(Debug, Deserialize)]
pub struct WeekQuery {
    pub date: Option<NaiveDate>,
}

pub async fn get_week_plan(
    State(state): State<AppState>,
    Query(params): Query<WeekQuery>,
) -> Result<Json<WeeklyPlan>, AppError> {
    let date = params
        .date
        .unwrap_or_else(|| today_local(&state.config.time_zone));
    if !(MIN_PLAN_YEAR..=MAX_PLAN_YEAR).contains(&date.year()) {
        return Err(AppError::BadRequest(format!(
            "date must fall between years {} and {}",
            MIN_PLAN_YEAR, MAX_PLAN_YEAR
        )));
    }
    Ok(Json(state.planning.plan(date).await?))
}
