//! Weekly reminders: rules that fire on a given weekday and time window,
//! with per-week dismissals and user settings kept in a [`KeyValueStore`].

use std::sync::Arc;

use chrono::{Datelike, Duration, NaiveDateTime, NaiveTime, Weekday};
use thiserror::Error;

use crate::{
    models::weekly::{NotificationSettings, WeeklyReminder, WeeklyReminderRule},
    storage::{get_json, set_json, KeyValueStore, StorageError},
};

const SETTINGS_KEY: &str = "weekly-reminder:settings";

#[derive(Debug, Error)]
pub enum WeeklyReminderError {
    #[error("unknown reminder rule {0}")]
    UnknownRule(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl WeeklyReminderRule {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        message: impl Into<String>,
        weekday: Weekday,
        starts_at: NaiveTime,
        ends_at: NaiveTime,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            message: message.into(),
            weekday,
            starts_at,
            ends_at,
        }
    }

    pub fn is_active_at(&self, at: NaiveDateTime) -> bool {
        at.weekday() == self.weekday && self.starts_at <= at.time() && at.time() < self.ends_at
    }

    /// `at` itself while the window is open, otherwise the next window start.
    pub fn next_occurrence(&self, at: NaiveDateTime) -> NaiveDateTime {
        if self.is_active_at(at) {
            return at;
        }

        let days_ahead = (self.weekday.num_days_from_monday() as i64 + 7
            - at.weekday().num_days_from_monday() as i64)
            % 7;
        let candidate = (at.date() + Duration::days(days_ahead)).and_time(self.starts_at);
        if candidate > at {
            candidate
        } else {
            candidate + Duration::days(7)
        }
    }
}

pub fn default_rules() -> Vec<WeeklyReminderRule> {
    let time = |h: u32| NaiveTime::from_hms_opt(h, 0, 0).unwrap_or_default();
    vec![
        WeeklyReminderRule::new(
            "weekly-planning",
            "Plan the week",
            "Review open tickets and this week's holidays before the queue fills up.",
            Weekday::Mon,
            time(8),
            time(12),
        ),
        WeeklyReminderRule::new(
            "weekly-review",
            "Close out the week",
            "Update ticket statuses and check next week's schedule and vacations.",
            Weekday::Fri,
            time(14),
            time(18),
        ),
    ]
}

/// `2025-W52` style label of the ISO week containing `at`.
pub fn iso_week_label(at: NaiveDateTime) -> String {
    let week = at.date().iso_week();
    format!("{}-W{:02}", week.year(), week.week())
}

fn dismissal_key(rule_id: &str, at: NaiveDateTime) -> String {
    format!("weekly-reminder:{}:{}", rule_id, iso_week_label(at))
}

pub struct WeeklyNotificationService {
    store: Arc<dyn KeyValueStore>,
    rules: Vec<WeeklyReminderRule>,
}

impl WeeklyNotificationService {
    pub fn new(store: Arc<dyn KeyValueStore>, rules: Vec<WeeklyReminderRule>) -> Self {
        Self { store, rules }
    }

    pub fn rules(&self) -> &[WeeklyReminderRule] {
        &self.rules
    }

    fn rule(&self, rule_id: &str) -> Result<&WeeklyReminderRule, WeeklyReminderError> {
        self.rules
            .iter()
            .find(|rule| rule.id == rule_id)
            .ok_or_else(|| WeeklyReminderError::UnknownRule(rule_id.to_string()))
    }

    pub async fn settings(&self) -> Result<NotificationSettings, WeeklyReminderError> {
        Ok(get_json(self.store.as_ref(), SETTINGS_KEY)
            .await?
            .unwrap_or_default())
    }

    pub async fn update_settings(
        &self,
        settings: NotificationSettings,
    ) -> Result<NotificationSettings, WeeklyReminderError> {
        if let Some(unknown) = settings
            .disabled_rules
            .iter()
            .find(|id| self.rule(id).is_err())
        {
            return Err(WeeklyReminderError::UnknownRule(unknown.clone()));
        }
        set_json(self.store.as_ref(), SETTINGS_KEY, &settings).await?;
        Ok(settings)
    }

    /// Reminders whose window is open at `now` and that were not dismissed this week.
    pub async fn due(&self, now: NaiveDateTime) -> Result<Vec<WeeklyReminder>, WeeklyReminderError> {
        let settings = self.settings().await?;
        if !settings.enabled {
            return Ok(Vec::new());
        }

        let mut due = Vec::new();
        for rule in &self.rules {
            if !rule.is_active_at(now) || settings.disabled_rules.contains(&rule.id) {
                continue;
            }
            if self.store.get(&dismissal_key(&rule.id, now)).await?.is_some() {
                continue;
            }
            due.push(WeeklyReminder {
                rule_id: rule.id.clone(),
                title: rule.title.clone(),
                message: rule.message.clone(),
                week: iso_week_label(now),
            });
        }

        Ok(due)
    }

    pub async fn dismiss(&self, rule_id: &str, now: NaiveDateTime) -> Result<(), WeeklyReminderError> {
        let rule = self.rule(rule_id)?;
        self.store
            .set(&dismissal_key(&rule.id, now), now.to_string())
            .await?;
        tracing::debug!(rule_id, week = %iso_week_label(now), "Dismissed weekly reminder");
        Ok(())
    }
}
