use std::collections::HashSet;

use crate::models::vacation::VacationSuggestion;

/// Default number of suggestions handed back to callers.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 6;

/// Drops incomplete candidates, orders by score (stable, so generation order
/// breaks ties), removes repeated date ranges and truncates to `limit`.
pub fn aggregate(candidates: Vec<VacationSuggestion>, limit: usize) -> Vec<VacationSuggestion> {
    let mut complete: Vec<VacationSuggestion> = candidates
        .into_iter()
        .filter(|candidate| {
            let ok = candidate.is_complete();
            if !ok {
                tracing::debug!(id = %candidate.id, "Discarding incomplete vacation suggestion");
            }
            ok
        })
        .collect();

    complete.sort_by(|a, b| b.score.cmp(&a.score));

    let mut seen_ranges = HashSet::new();
    complete
        .into_iter()
        .filter(|candidate| seen_ranges.insert((candidate.start_date, candidate.end_date)))
        .take(limit)
        .collect()
}
