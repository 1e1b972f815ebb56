use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use validator::Validate;

use crate::{
    error::AppError,
    models::search::SearchResponse,
    services::search::MAX_SEARCH_LIMIT,
    state::AppState,
};

#[derive(Debug, Deserialize, Validate)]
pub struct SearchParams {
    #[validate(length(min = 1, max = 200))]
    pub q: String,
    #[validate(range(min = 1, max = 50))]
    pub limit: Option<usize>,
}

pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, AppError> {
    params.validate()?;
    let limit = params
        .limit
        .unwrap_or(state.config.search_result_limit)
        .min(MAX_SEARCH_LIMIT);

    let response = state.search.search(&params.q, limit).await;
    if let Err(err) = state.history.record(&params.q).await {
        tracing::warn!(error = %err, "Failed to record search history");
    }
    Ok(Json(response))
}

pub async fn get_history(State(state): State<AppState>) -> Result<Json<Vec<String>>, AppError> {
    Ok(Json(state.history.list().await?))
}

pub async fn clear_history(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.history.clear().await?;
    Ok(StatusCode::NO_CONTENT)
}
