use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;

/// Returns the current time in the configured timezone.
pub fn now_in_timezone(tz: &Tz) -> DateTime<Tz> {
    Utc::now().with_timezone(tz)
}

/// Returns the current wall-clock time in the configured timezone without offset.
pub fn now_local_naive(tz: &Tz) -> NaiveDateTime {
    now_in_timezone(tz).naive_local()
}

/// Returns today's date in the configured timezone.
pub fn today_local(tz: &Tz) -> NaiveDate {
    now_in_timezone(tz).date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_in_timezone_returns_datetime_in_tz() {
        let tz = chrono_tz::America::Sao_Paulo;
        let result = now_in_timezone(&tz);
        assert_eq!(result.timezone(), tz);
    }

    #[test]
    fn now_local_naive_matches_today_local() {
        let tz = chrono_tz::UTC;
        let now = now_local_naive(&tz);
        let today = today_local(&tz);
        let diff = (now.date() - today).num_days().abs();
        assert!(diff <= 1);
    }

    #[test]
    fn today_local_in_utc_matches_utc_now() {
        let tz = chrono_tz::UTC;
        let today = today_local(&tz);
        let diff = (Utc::now().date_naive() - today).num_days().abs();
        assert!(diff <= 1);
    }
}
