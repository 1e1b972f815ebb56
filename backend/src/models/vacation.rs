use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Where a suggested window sits relative to the data it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SuggestionPeriod {
    Before,
    After,
    Strategic,
    YearEnd,
    Fallback,
}

impl SuggestionPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionPeriod::Before => "before",
            SuggestionPeriod::After => "after",
            SuggestionPeriod::Strategic => "strategic",
            SuggestionPeriod::YearEnd => "year-end",
            SuggestionPeriod::Fallback => "fallback",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VacationSuggestion {
    pub id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_days: u32,
    pub work_days: u32,
    pub score: u8,
    pub reason: String,
    pub holidays: Vec<String>,
    pub benefits: Vec<String>,
    pub period: SuggestionPeriod,
}

impl VacationSuggestion {
    /// True when every required field is present and the range invariants hold.
    pub fn is_complete(&self) -> bool {
        !self.id.trim().is_empty()
            && !self.reason.trim().is_empty()
            && self.start_date <= self.end_date
            && self.total_days > 0
            && self.work_days <= self.total_days
            && self.score <= 100
    }
}

/// Result of one suggestion request. `degraded` marks answers built from the
/// static fallback because live holiday data was unavailable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionSet {
    pub year: i32,
    pub suggestions: Vec<VacationSuggestion>,
    pub degraded: bool,
    pub generated_at: DateTime<Utc>,
}
