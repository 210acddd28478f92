//! Calendar-date arithmetic
//!
//! Every computation of this crate works on [`NaiveDate`]s: times of day never take part in a comparison.

use chrono::{DateTime, Months, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Deserializer};

use crate::error::Error;

/// Parse a date as sent by the REST API (`YYYY-MM-DD`).
///
/// `YYYY/MM/DD` and timestamps (RFC 3339 or naive) are accepted as well, only their date part is kept.
pub fn parse_date(s: &str) -> Result<NaiveDate, Error> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y/%m/%d"))
        .or_else(|_| DateTime::parse_from_rfc3339(s).map(|dt| dt.naive_local().date()))
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.date()))
        .map_err(|_| Error::UnparseableDate(s.to_string()))
}

/// Shift a date by a number of months.
///
/// Days that do not exist in the target month are clamped to its last day (e.g. Jan 31 + 1 month = Feb 28 or 29)
pub fn add_months(date: NaiveDate, months: i32) -> Result<NaiveDate, Error> {
    let shifted = if months >= 0 {
        date.checked_add_months(Months::new(months as u32))
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs()))
    };
    shifted.ok_or(Error::DateOutOfRange { date, months })
}

/// Number of days from `from` to `to` (negative when `to` is before `from`)
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    to.signed_duration_since(from).num_days()
}

/// The calendar date of a timepoint, in its own timezone
pub fn date_of<Tz: TimeZone>(timepoint: &DateTime<Tz>) -> NaiveDate {
    timepoint.naive_local().date()
}

/// Today, according to the local timezone
pub fn today() -> NaiveDate {
    date_of(&chrono::Local::now())
}

/// Deserialize an optional date without ever failing.
///
/// Missing, empty or malformed values become `None`, so that a single bad field does not prevent a whole record from loading.
/// To be used with `#[serde(default, deserialize_with = "...")]`
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    let parsed = match raw {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) if s.trim().is_empty() => None,
        Some(serde_json::Value::String(s)) => match parse_date(&s) {
            Ok(date) => Some(date),
            Err(err) => {
                log::warn!("{}. Ignoring it", err);
                None
            },
        },
        Some(other) => {
            log::warn!("Unexpected value for a date: {}. Ignoring it", other);
            None
        },
    };
    Ok(parsed)
}


#[cfg(test)]
mod test {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2024-04-15").unwrap(), ymd(2024, 4, 15));
        assert_eq!(parse_date("2024/04/15").unwrap(), ymd(2024, 4, 15));
        assert_eq!(parse_date(" 2024-04-15 ").unwrap(), ymd(2024, 4, 15));
        assert_eq!(parse_date("2024-04-15T23:30:00+02:00").unwrap(), ymd(2024, 4, 15));
        assert_eq!(parse_date("2024-04-15T08:00:00").unwrap(), ymd(2024, 4, 15));

        assert_eq!(parse_date("15/04/2024"), Err(Error::UnparseableDate("15/04/2024".to_string())));
        assert!(parse_date("2024-02-30").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn test_add_months_clamps_to_month_end() {
        assert_eq!(add_months(ymd(2024, 6, 1), 3).unwrap(), ymd(2024, 9, 1));
        assert_eq!(add_months(ymd(2024, 1, 31), 1).unwrap(), ymd(2024, 2, 29));
        assert_eq!(add_months(ymd(2023, 1, 31), 1).unwrap(), ymd(2023, 2, 28));
        assert_eq!(add_months(ymd(2024, 11, 30), 3).unwrap(), ymd(2025, 2, 28));
        assert_eq!(add_months(ymd(2024, 3, 31), -1).unwrap(), ymd(2024, 2, 29));
        assert_eq!(add_months(ymd(2024, 3, 31), 0).unwrap(), ymd(2024, 3, 31));

        assert!(matches!(add_months(NaiveDate::MAX, 1), Err(Error::DateOutOfRange{ .. })));
    }

    #[test]
    fn test_days_between() {
        assert_eq!(days_between(ymd(2024, 1, 1), ymd(2024, 1, 31)), 30);
        assert_eq!(days_between(ymd(2024, 1, 31), ymd(2024, 1, 1)), -30);
        assert_eq!(days_between(ymd(2024, 2, 28), ymd(2024, 3, 1)), 2);
        assert_eq!(days_between(ymd(2024, 5, 5), ymd(2024, 5, 5)), 0);
    }

    #[test]
    fn test_date_of_ignores_time() {
        let late = chrono::FixedOffset::east_opt(3600).unwrap()
            .with_ymd_and_hms(2024, 5, 5, 23, 59, 59).unwrap();
        let early = chrono::Utc.with_ymd_and_hms(2024, 5, 5, 0, 0, 1).unwrap();
        assert_eq!(date_of(&late), ymd(2024, 5, 5));
        assert_eq!(date_of(&early), ymd(2024, 5, 5));
    }
}
