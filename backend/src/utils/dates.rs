//! Calendar helpers for working-day arithmetic.
//!
//! A working day is any Monday to Friday; holidays are not taken into account
//! here. Functions that walk the calendar return `None` instead of panicking
//! when they would leave chrono's supported range.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

pub fn is_working_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Moves a weekend date back onto the preceding Friday. Weekdays are returned unchanged.
pub fn shift_back_to_weekday(date: NaiveDate) -> Option<NaiveDate> {
    let mut cursor = date;
    while !is_working_day(cursor) {
        cursor = cursor.pred_opt()?;
    }
    Some(cursor)
}

/// Moves a weekend date forward onto the following Monday. Weekdays are returned unchanged.
pub fn shift_forward_to_weekday(date: NaiveDate) -> Option<NaiveDate> {
    let mut cursor = date;
    while !is_working_day(cursor) {
        cursor = cursor.succ_opt()?;
    }
    Some(cursor)
}

/// Counts working days in the inclusive range `[start, end]`.
pub fn count_working_days(start: NaiveDate, end: NaiveDate) -> u32 {
    if start > end {
        return 0;
    }
    start
        .iter_days()
        .take_while(|day| *day <= end)
        .filter(|day| is_working_day(*day))
        .count() as u32
}

/// Walks forward from `start` (inclusive) and returns the date on which the
/// `count`-th working day falls.
pub fn add_working_days(start: NaiveDate, count: u32) -> Option<NaiveDate> {
    if count == 0 {
        return None;
    }
    let mut seen = 0;
    let mut cursor = start;
    loop {
        if is_working_day(cursor) {
            seen += 1;
            if seen == count {
                return Some(cursor);
            }
        }
        cursor = cursor.succ_opt()?;
    }
}

/// Inclusive number of calendar days covered by `[start, end]`.
pub fn inclusive_days(start: NaiveDate, end: NaiveDate) -> u32 {
    ((end - start).num_days() + 1).max(0) as u32
}

/// Monday of the ISO week containing `date`, `None` when it precedes the
/// supported calendar range.
pub fn week_start(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_sub_signed(Duration::days(
        date.weekday().num_days_from_monday() as i64,
    ))
}
