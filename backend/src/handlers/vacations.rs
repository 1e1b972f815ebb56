use axum::{
    extract::{Query, State},
    Json,
};
use validator::Validate;

use crate::{
    error::AppError,
    handlers::holidays::YearQuery,
    models::vacation::SuggestionSet,
    state::AppState,
    utils::time::today_local,
};

/// Ranked vacation windows for the requested year. Upstream failures never
/// surface here; the set is flagged as degraded instead.
pub async fn get_suggestions(
    State(state): State<AppState>,
    Query(params): Query<YearQuery>,
) -> Result<Json<SuggestionSet>, AppError> {
    params.validate()?;
    let year = params.resolve(&state);
    let today = today_local(&state.config.time_zone);

    let set = state.suggestions.suggestions(year, today).await;
    tracing::debug!(
        year,
        count = set.suggestions.len(),
        degraded = set.degraded,
        "Served vacation suggestions"
    );
    Ok(Json(set))
}
