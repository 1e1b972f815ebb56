use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub mod config;
pub mod holidays;
pub mod notifications;
pub mod planning;
pub mod search;
pub mod vacations;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/health", get(config::health))
        .route("/api/config/timezone", get(config::get_time_zone))
        .route("/api/holidays", get(holidays::list_holidays))
        .route("/api/vacations/suggestions", get(vacations::get_suggestions))
        .route("/api/planning/week", get(planning::get_week_plan))
        .route(
            "/api/notifications/weekly",
            get(notifications::get_due_reminders),
        )
        .route(
            "/api/notifications/weekly/{id}/dismiss",
            post(notifications::dismiss_reminder),
        )
        .route(
            "/api/notifications/settings",
            get(notifications::get_settings).put(notifications::update_settings),
        )
        .route("/api/search", get(search::search))
        .route(
            "/api/search/history",
            get(search::get_history).delete(search::clear_history),
        )
}
