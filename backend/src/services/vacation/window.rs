use chrono::{Datelike, Duration, NaiveDate};
use thiserror::Error;

use super::grouping::HolidayGroup;
use crate::utils::dates::{add_working_days, shift_back_to_weekday, shift_forward_to_weekday};

/// Calendar days between the start and the end of a before-window.
pub const BEFORE_WINDOW_SPAN_DAYS: i64 = 9;
/// Working days covered by an after-window.
pub const AFTER_WINDOW_WORKING_DAYS: u32 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowPosition {
    Before,
    After,
}

impl WindowPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            WindowPosition::Before => "before",
            WindowPosition::After => "after",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub position: WindowPosition,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WindowError {
    #[error("{position:?} window around {anchor} leaves the supported calendar range")]
    OutOfRange {
        anchor: NaiveDate,
        position: WindowPosition,
    },
}

/// Window that ends on the last weekday before the group starts.
pub fn before_window(group: &HolidayGroup) -> Result<CandidateWindow, WindowError> {
    let anchor = group.first_date();
    let out_of_range = || WindowError::OutOfRange {
        anchor,
        position: WindowPosition::Before,
    };

    let end = anchor
        .pred_opt()
        .and_then(shift_back_to_weekday)
        .ok_or_else(out_of_range)?;
    let start = end
        .checked_sub_signed(Duration::days(BEFORE_WINDOW_SPAN_DAYS))
        .and_then(shift_back_to_weekday)
        .ok_or_else(out_of_range)?;

    Ok(CandidateWindow {
        start,
        end,
        position: WindowPosition::Before,
    })
}

/// Window that starts on the first weekday after the group ends.
pub fn after_window(group: &HolidayGroup) -> Result<CandidateWindow, WindowError> {
    let anchor = group.last_date();
    let out_of_range = || WindowError::OutOfRange {
        anchor,
        position: WindowPosition::After,
    };

    let start = anchor
        .succ_opt()
        .and_then(shift_forward_to_weekday)
        .ok_or_else(out_of_range)?;
    let end = add_working_days(start, AFTER_WINDOW_WORKING_DAYS)
        .and_then(shift_back_to_weekday)
        .ok_or_else(out_of_range)?;

    Ok(CandidateWindow {
        start,
        end,
        position: WindowPosition::After,
    })
}

/// Before and after windows for a group, keeping only those that start in `year`.
pub fn propose_windows(
    group: &HolidayGroup,
    year: i32,
) -> Result<Vec<CandidateWindow>, WindowError> {
    let windows = [before_window(group)?, after_window(group)?];
    Ok(windows
        .into_iter()
        .filter(|window| window.start.year() == year && window.start <= window.end)
        .collect())
}
