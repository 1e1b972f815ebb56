use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::{convert::Infallible, fmt, str::FromStr};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HolidayKind {
    National,
    State,
    Municipal,
    CourtRecess,
    Optional,
    Other(String),
}

impl HolidayKind {
    pub fn as_str(&self) -> &str {
        match self {
            HolidayKind::National => "national",
            HolidayKind::State => "state",
            HolidayKind::Municipal => "municipal",
            HolidayKind::CourtRecess => "court_recess",
            HolidayKind::Optional => "optional",
            HolidayKind::Other(value) => value.as_str(),
        }
    }
}

impl FromStr for HolidayKind {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Ok(match normalized.as_str() {
            "national" | "nacional" => HolidayKind::National,
            "state" | "estadual" => HolidayKind::State,
            "municipal" => HolidayKind::Municipal,
            "court_recess" | "recesso" => HolidayKind::CourtRecess,
            "optional" | "ponto_facultativo" => HolidayKind::Optional,
            _ => HolidayKind::Other(normalized),
        })
    }
}

impl fmt::Display for HolidayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    pub date: NaiveDate,
    pub label: String,
    pub kind: HolidayKind,
}

impl Holiday {
    pub fn new(date: NaiveDate, label: impl Into<String>, kind: HolidayKind) -> Self {
        Self {
            date,
            label: label.into(),
            kind,
        }
    }
}

/// Holiday row as stored in the `holidays` table. Dates are kept as text so
/// rows imported from external calendars can be validated here instead of
/// failing the whole query.
#[derive(Debug, Clone, FromRow)]
pub struct HolidayRow {
    pub holiday_date: String,
    pub name: String,
    pub kind: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HolidayValidationError {
    #[error("malformed holiday date {0:?}")]
    MalformedDate(String),
    #[error("holiday on {0} has an empty label")]
    EmptyLabel(NaiveDate),
}

impl TryFrom<HolidayRow> for Holiday {
    type Error = HolidayValidationError;

    fn try_from(row: HolidayRow) -> Result<Self, Self::Error> {
        let date = NaiveDate::parse_from_str(row.holiday_date.trim(), "%Y-%m-%d")
            .map_err(|_| HolidayValidationError::MalformedDate(row.holiday_date.clone()))?;

        let label = row.name.trim();
        if label.is_empty() {
            return Err(HolidayValidationError::EmptyLabel(date));
        }

        let kind = row
            .kind
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .map(|k| k.parse().unwrap_or(HolidayKind::National))
            .unwrap_or(HolidayKind::National);

        Ok(Holiday {
            date,
            label: label.to_string(),
            kind,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HolidayResponse {
    pub date: NaiveDate,
    pub label: String,
    pub kind: String,
}

impl From<Holiday> for HolidayResponse {
    fn from(value: Holiday) -> Self {
        Self {
            date: value.date,
            kind: value.kind.to_string(),
            label: value.label,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(date: &str, name: &str, kind: Option<&str>) -> HolidayRow {
        HolidayRow {
            holiday_date: date.to_string(),
            name: name.to_string(),
            kind: kind.map(str::to_string),
        }
    }

    #[test]
    fn valid_row_converts_into_holiday() {
        let holiday = Holiday::try_from(row("2025-12-25", " Christmas ", Some("Nacional")))
            .expect("valid row");
        assert_eq!(holiday.date, NaiveDate::from_ymd_opt(2025, 12, 25).unwrap());
        assert_eq!(holiday.label, "Christmas");
        assert_eq!(holiday.kind, HolidayKind::National);
    }

    #[test]
    fn missing_kind_defaults_to_national() {
        let holiday = Holiday::try_from(row("2025-04-21", "Tiradentes", None)).unwrap();
        assert_eq!(holiday.kind, HolidayKind::National);
    }

    #[test]
    fn malformed_date_is_rejected() {
        let err = Holiday::try_from(row("2025-13-45", "Broken", None)).unwrap_err();
        assert_eq!(err, HolidayValidationError::MalformedDate("2025-13-45".into()));
    }

    #[test]
    fn blank_label_is_rejected() {
        let err = Holiday::try_from(row("2025-11-20", "   ", None)).unwrap_err();
        assert!(matches!(err, HolidayValidationError::EmptyLabel(_)));
    }

    #[test]
    fn unknown_kind_is_preserved() {
        assert_eq!(
            "Bridge".parse::<HolidayKind>().unwrap(),
            HolidayKind::Other("bridge".into())
        );
        assert_eq!("recesso".parse::<HolidayKind>().unwrap().as_str(), "court_recess");
    }
}
