use chrono::NaiveDate;

use super::{
    grouping::HolidayGroup,
    scoring::ScoringWeights,
    window::{propose_windows, CandidateWindow, WindowError, WindowPosition},
    SuggestionError,
};
use crate::{
    models::vacation::{SuggestionPeriod, VacationSuggestion},
    utils::dates::{add_working_days, count_working_days, inclusive_days, shift_forward_to_weekday},
};

pub const STRATEGIC_WORKING_DAYS: u32 = 10;
pub const STRATEGIC_JANUARY_SCORE: u8 = 70;
pub const STRATEGIC_MAY_SCORE: u8 = 65;
pub const YEAR_END_SCORE: u8 = 90;
pub const BASIC_JANUARY_SCORE: u8 = 60;
pub const BASIC_MAY_SCORE: u8 = 55;

struct Draft {
    id: String,
    start: NaiveDate,
    end: NaiveDate,
    score: u8,
    reason: String,
    holidays: Vec<String>,
    benefits: Vec<String>,
    period: SuggestionPeriod,
}

impl Draft {
    fn build(self) -> VacationSuggestion {
        VacationSuggestion {
            id: self.id,
            start_date: self.start,
            end_date: self.end,
            total_days: inclusive_days(self.start, self.end),
            work_days: count_working_days(self.start, self.end),
            score: self.score.min(100),
            reason: self.reason,
            holidays: self.holidays,
            benefits: self.benefits,
            period: self.period,
        }
    }
}

fn join_labels(labels: &[String]) -> String {
    match labels {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}

/// Suggestions that abut one holiday group.
pub fn holiday_suggestions(
    group: &HolidayGroup,
    year: i32,
    weights: &ScoringWeights,
) -> Result<Vec<VacationSuggestion>, WindowError> {
    let windows = propose_windows(group, year)?;
    Ok(windows
        .into_iter()
        .map(|window| holiday_window_suggestion(group, window, weights))
        .collect())
}

fn holiday_window_suggestion(
    group: &HolidayGroup,
    window: CandidateWindow,
    weights: &ScoringWeights,
) -> VacationSuggestion {
    let labels = group.labels();
    let names = join_labels(&labels);
    let work_days = count_working_days(window.start, window.end);

    // Stretch away from work, counting the holidays and weekends the window touches.
    let (streak, reason, period) = match window.position {
        WindowPosition::Before => (
            inclusive_days(window.start, group.last_date()),
            format!("Leave right before {}", names),
            SuggestionPeriod::Before,
        ),
        WindowPosition::After => (
            inclusive_days(group.first_date(), window.end),
            format!("Leave right after {}", names),
            SuggestionPeriod::After,
        ),
    };

    let mut benefits = vec![
        format!("Up to {} consecutive days away from work", streak),
        format!("Uses {} working days of vacation", work_days),
    ];
    if group.len() > 1 {
        benefits.push(format!("Joins {} holidays into one break", group.len()));
    }

    Draft {
        id: format!("{}-{}", window.position.as_str(), group.first_date()),
        start: window.start,
        end: window.end,
        score: weights.score(window.start, group.len(), window.position),
        reason,
        holidays: labels,
        benefits,
        period,
    }
    .build()
}

fn ymd(year: i32, month: u32, day: u32) -> Result<NaiveDate, SuggestionError> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or(SuggestionError::InvalidYear(year))
}

fn strategic_window(
    year: i32,
    month: u32,
    day: u32,
) -> Result<(NaiveDate, NaiveDate), SuggestionError> {
    let start = shift_forward_to_weekday(ymd(year, month, day)?)
        .ok_or(SuggestionError::InvalidYear(year))?;
    let end = add_working_days(start, STRATEGIC_WORKING_DAYS)
        .ok_or(SuggestionError::InvalidYear(year))?;
    Ok((start, end))
}

/// Fixed windows independent of holiday data: early January and mid May.
pub fn strategic_suggestions(year: i32) -> Result<Vec<VacationSuggestion>, SuggestionError> {
    let (jan_start, jan_end) = strategic_window(year, 1, 7)?;
    let (may_start, may_end) = strategic_window(year, 5, 12)?;

    Ok(vec![
        Draft {
            id: "strategic-january".into(),
            start: jan_start,
            end: jan_end,
            score: STRATEGIC_JANUARY_SCORE,
            reason: "Early January, while demand is still low after the recess".into(),
            holidays: vec![],
            benefits: vec![
                "Quiet period for the support queue".into(),
                "Two full working weeks off".into(),
            ],
            period: SuggestionPeriod::Strategic,
        }
        .build(),
        Draft {
            id: "strategic-may".into(),
            start: may_start,
            end: may_end,
            score: STRATEGIC_MAY_SCORE,
            reason: "Mid May, between the first-semester peaks".into(),
            holidays: vec![],
            benefits: vec![
                "Mild weather and off-season prices".into(),
                "Two full working weeks off".into(),
            ],
            period: SuggestionPeriod::Strategic,
        }
        .build(),
    ])
}

/// The longest contiguous break: December 20th through January 10th.
pub fn year_end_suggestion(year: i32) -> Result<VacationSuggestion, SuggestionError> {
    let next_year = year.checked_add(1).ok_or(SuggestionError::InvalidYear(year))?;
    let start = ymd(year, 12, 20)?;
    let end = ymd(next_year, 1, 10)?;

    Ok(Draft {
        id: "year-end".into(),
        start,
        end,
        score: YEAR_END_SCORE,
        reason: "Year-end break across the holiday season".into(),
        holidays: vec!["Christmas".into(), "New Year".into()],
        benefits: vec![
            format!("{} consecutive days away from work", inclusive_days(start, end)),
            "Overlaps the judiciary recess".into(),
        ],
        period: SuggestionPeriod::YearEnd,
    }
    .build())
}

/// Degraded answer used when holiday data is unavailable.
pub fn fallback_suggestions(year: i32) -> Vec<VacationSuggestion> {
    let windows = [
        (
            "basic-january",
            (1, 10),
            (1, 24),
            BASIC_JANUARY_SCORE,
            "January vacation at the start of the year",
        ),
        (
            "basic-may",
            (5, 15),
            (5, 29),
            BASIC_MAY_SCORE,
            "May vacation in the middle of the semester",
        ),
    ];

    windows
        .into_iter()
        .filter_map(|(id, (sm, sd), (em, ed), score, reason)| {
            let start = NaiveDate::from_ymd_opt(year, sm, sd)?;
            let end = NaiveDate::from_ymd_opt(year, em, ed)?;
            Some(
                Draft {
                    id: id.into(),
                    start,
                    end,
                    score,
                    reason: reason.into(),
                    holidays: vec![],
                    benefits: vec![format!(
                        "{} consecutive days away from work",
                        inclusive_days(start, end)
                    )],
                    period: SuggestionPeriod::Fallback,
                }
                .build(),
            )
        })
        .collect()
}
