//! Vacation suggestion engine.
//!
//! Pure functions turn a holiday snapshot into a short, ranked list of
//! vacation windows: holidays are clustered into groups, each group yields a
//! window right before and right after it, every window gets a heuristic
//! score, and a few fixed seasonal windows are mixed in. [`service`] wraps the
//! engine with a bounded holiday fetch, retries and a short-lived cache.

pub mod aggregate;
pub mod grouping;
pub mod proposals;
pub mod scoring;
pub mod service;
pub mod window;

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

use crate::models::{holiday::Holiday, vacation::VacationSuggestion};

pub use aggregate::{aggregate, DEFAULT_SUGGESTION_LIMIT};
pub use grouping::{group_holidays, HolidayGroup};
pub use proposals::fallback_suggestions;
pub use scoring::ScoringWeights;
pub use service::{SuggestionOptions, VacationSuggestionService};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SuggestionError {
    #[error("year {0} is outside the supported calendar range")]
    InvalidYear(i32),
}

/// Holidays of `year` that fall on or after `today`, sorted and unique per date.
pub fn upcoming_holidays(holidays: &[Holiday], year: i32, today: NaiveDate) -> Vec<Holiday> {
    let mut upcoming: Vec<Holiday> = holidays
        .iter()
        .filter(|h| h.date.year() == year && h.date >= today)
        .cloned()
        .collect();
    upcoming.sort_by(|a, b| a.date.cmp(&b.date));
    upcoming.dedup_by(|a, b| a.date == b.date);
    upcoming
}

/// Ranked vacation suggestions for `year` given a holiday snapshot.
///
/// With no usable holiday left after filtering, the fixed fallback pair is
/// returned. A group whose windows cannot be computed is logged and skipped.
pub fn suggest_vacations(
    holidays: &[Holiday],
    year: i32,
    today: NaiveDate,
    weights: &ScoringWeights,
    limit: usize,
) -> Result<Vec<VacationSuggestion>, SuggestionError> {
    let upcoming = upcoming_holidays(holidays, year, today);
    if upcoming.is_empty() {
        tracing::debug!(year, %today, "No upcoming holidays, using fallback suggestions");
        return Ok(aggregate(fallback_suggestions(year), limit));
    }

    let groups = group_holidays(&upcoming);
    tracing::debug!(year, holidays = upcoming.len(), groups = groups.len(), "Grouped holidays");

    let mut candidates = group_suggestions(&groups, year, weights);
    candidates.extend(proposals::strategic_suggestions(year)?);
    candidates.push(proposals::year_end_suggestion(year)?);

    Ok(aggregate(candidates, limit))
}

/// Suggestions of every group; a group whose windows cannot be computed is
/// logged and skipped without affecting the others.
fn group_suggestions(
    groups: &[HolidayGroup],
    year: i32,
    weights: &ScoringWeights,
) -> Vec<VacationSuggestion> {
    let mut candidates = Vec::new();
    for group in groups {
        match proposals::holiday_suggestions(group, year, weights) {
            Ok(mut suggestions) => candidates.append(&mut suggestions),
            Err(err) => {
                tracing::warn!(
                    year,
                    first = %group.first_date(),
                    error = %err,
                    "Skipping holiday group"
                );
            }
        }
    }
    candidates
}
