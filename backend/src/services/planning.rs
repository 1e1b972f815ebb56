use std::{sync::Arc, time::Duration};

use chrono::{Duration as ChronoDuration, NaiveDate};
use thiserror::Error;

use crate::{
    models::{holiday::Holiday, weekly::WeeklyPlan},
    services::holiday_source::HolidaySource,
    utils::dates::{is_working_day, week_start},
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanningError {
    #[error("the two weeks around {0} leave the supported calendar range")]
    OutOfRange(NaiveDate),
}

/// Monday of the week of `today` and the Sunday of the following week.
fn planning_range(today: NaiveDate) -> Result<(NaiveDate, NaiveDate), PlanningError> {
    let start = week_start(today).ok_or(PlanningError::OutOfRange(today))?;
    let end = start
        .checked_add_signed(ChronoDuration::days(13))
        .ok_or(PlanningError::OutOfRange(today))?;
    Ok((start, end))
}

/// Summary of the week containing `today` plus the holidays of the week after.
pub fn plan_week(today: NaiveDate, holidays: &[Holiday]) -> Result<WeeklyPlan, PlanningError> {
    let (start, next_end) = planning_range(today)?;
    let end = start + ChronoDuration::days(6);
    let next_start = start + ChronoDuration::days(7);

    let in_range = |from: NaiveDate, to: NaiveDate| -> Vec<Holiday> {
        let mut found: Vec<Holiday> = holidays
            .iter()
            .filter(|h| h.date >= from && h.date <= to)
            .cloned()
            .collect();
        found.sort_by(|a, b| a.date.cmp(&b.date));
        found
    };

    let this_week = in_range(start, end);
    let working_days = start
        .iter_days()
        .take(7)
        .filter(|day| is_working_day(*day) && !this_week.iter().any(|h| h.date == *day))
        .count() as u32;

    Ok(WeeklyPlan {
        week_start: start,
        week_end: end,
        working_days,
        holidays: this_week,
        next_week_holidays: in_range(next_start, next_end),
        degraded: false,
    })
}

pub struct WeeklyPlanningService {
    source: Arc<dyn HolidaySource>,
    fetch_timeout: Duration,
}

impl WeeklyPlanningService {
    pub fn new(source: Arc<dyn HolidaySource>, fetch_timeout: Duration) -> Self {
        Self {
            source,
            fetch_timeout,
        }
    }

    /// Builds the plan from live holiday data; on error or timeout the plan
    /// is returned without holidays and flagged as degraded.
    pub async fn plan(&self, today: NaiveDate) -> Result<WeeklyPlan, PlanningError> {
        let (start, end) = planning_range(today)?;

        let fetched =
            tokio::time::timeout(self.fetch_timeout, self.source.fetch_holidays(start, end)).await;
        match fetched {
            Ok(Ok(holidays)) => plan_week(today, &holidays),
            Ok(Err(err)) => {
                tracing::warn!(%today, error = %err, "Holiday fetch failed for weekly plan");
                Ok(WeeklyPlan {
                    degraded: true,
                    ..plan_week(today, &[])?
                })
            }
            Err(_) => {
                tracing::warn!(%today, timeout = ?self.fetch_timeout, "Holiday fetch timed out for weekly plan");
                Ok(WeeklyPlan {
                    degraded: true,
                    ..plan_week(today, &[])?
                })
            }
        }
    }
}
