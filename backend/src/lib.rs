use axum::{middleware as axum_middleware, Router};

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod services;
pub mod state;
pub mod storage;
pub mod utils;

use state::AppState;

/// Application router with request-id and error logging middleware applied.
pub fn app(state: AppState) -> Router {
    handlers::routes()
        .layer(axum_middleware::from_fn(middleware::log_error_responses))
        .layer(axum_middleware::from_fn(middleware::request_id))
        .with_state(state)
}
