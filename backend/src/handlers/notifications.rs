use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppError,
    models::weekly::{NotificationSettings, WeeklyReminder},
    state::AppState,
    utils::time::now_local_naive,
};

pub async fn get_due_reminders(
    State(state): State<AppState>,
) -> Result<Json<Vec<WeeklyReminder>>, AppError> {
    let now = now_local_naive(&state.config.time_zone);
    Ok(Json(state.reminders.due(now).await?))
}

pub async fn dismiss_reminder(
    State(state): State<AppState>,
    Path(rule_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let now = now_local_naive(&state.config.time_zone);
    state.reminders.dismiss(&rule_id, now).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_settings(
    State(state): State<AppState>,
) -> Result<Json<NotificationSettings>, AppError> {
    Ok(Json(state.reminders.settings().await?))
}

pub async fn update_settings(
    State(state): State<AppState>,
    Json(payload): Json<NotificationSettings>,
) -> Result<Json<NotificationSettings>, AppError> {
    Ok(Json(state.reminders.update_settings(payload).await?))
}
