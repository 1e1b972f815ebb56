use chrono::NaiveDate;

use crate::models::holiday::Holiday;

/// Holidays closer than this many days belong to the same group.
pub const MAX_GROUP_GAP_DAYS: i64 = 10;

/// Chronologically ordered holidays where consecutive entries are at most
/// [`MAX_GROUP_GAP_DAYS`] apart. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidayGroup {
    holidays: Vec<Holiday>,
}

impl HolidayGroup {
    fn start(holiday: Holiday) -> Self {
        Self {
            holidays: vec![holiday],
        }
    }

    pub fn first_date(&self) -> NaiveDate {
        self.holidays[0].date
    }

    pub fn last_date(&self) -> NaiveDate {
        self.holidays[self.holidays.len() - 1].date
    }

    pub fn len(&self) -> usize {
        self.holidays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holidays.is_empty()
    }

    pub fn holidays(&self) -> &[Holiday] {
        &self.holidays
    }

    pub fn labels(&self) -> Vec<String> {
        self.holidays.iter().map(|h| h.label.clone()).collect()
    }
}

/// Greedy single pass over date-sorted holidays.
pub fn group_holidays(holidays: &[Holiday]) -> Vec<HolidayGroup> {
    let mut groups: Vec<HolidayGroup> = Vec::new();

    for holiday in holidays {
        match groups.last_mut() {
            Some(current)
                if (holiday.date - current.last_date()).num_days() <= MAX_GROUP_GAP_DAYS =>
            {
                current.holidays.push(holiday.clone());
            }
            _ => groups.push(HolidayGroup::start(holiday.clone())),
        }
    }

    groups
}
