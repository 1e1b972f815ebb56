use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::window::WindowPosition;

/// Hand-tuned weights of the desirability score. The defaults reproduce the
/// portal's historical ranking; deployments may override them via config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub base: i32,
    pub per_holiday: i32,
    pub after_bonus: i32,
    pub dec_jan_bonus: i32,
    pub jun_aug_bonus: i32,
    pub mar_may_bonus: i32,
    pub february_penalty: i32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            base: 50,
            per_holiday: 15,
            after_bonus: 10,
            dec_jan_bonus: 20,
            jun_aug_bonus: 15,
            mar_may_bonus: 10,
            february_penalty: 5,
        }
    }
}

impl ScoringWeights {
    /// Bonus (or penalty) for a window starting on `start`.
    pub fn seasonal_adjustment(&self, start: NaiveDate) -> i32 {
        match start.month() {
            12 | 1 => self.dec_jan_bonus,
            6..=8 => self.jun_aug_bonus,
            3..=5 => self.mar_may_bonus,
            2 => -self.february_penalty,
            _ => 0,
        }
    }

    pub fn score(&self, start: NaiveDate, holiday_count: usize, position: WindowPosition) -> u8 {
        let holiday_points = self
            .per_holiday
            .saturating_mul(i32::try_from(holiday_count).unwrap_or(i32::MAX));
        let position_points = match position {
            WindowPosition::After => self.after_bonus,
            WindowPosition::Before => 0,
        };

        let raw = self
            .base
            .saturating_add(holiday_points)
            .saturating_add(position_points)
            .saturating_add(self.seasonal_adjustment(start));

        raw.clamp(0, 100) as u8
    }
}
