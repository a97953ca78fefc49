//! Cell value parsing for dates and measurements.

use chrono::{NaiveDate, NaiveDateTime};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%d-%b-%Y %H:%M:%S",
    "%d-%b-%Y %H:%M",
];

// Slash dates are read month-first; day-first only when month-first is impossible.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%m-%d-%Y",
    "%d.%m.%Y",
    "%d-%b-%Y",
    "%d-%B-%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%b %d %Y",
    "%B %d %Y",
    "%d %b %Y",
    "%d %B %Y",
    "%Y%m%d",
];

/// Parses a date cell, truncating datetimes to their calendar date.
///
/// ```
/// use roster_reconcile::parse_date;
///
/// let date = parse_date("Jan 5, 2024").unwrap();
/// assert_eq!(date.to_string(), "2024-01-05");
/// assert!(parse_date("soon").is_none());
/// ```
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .map(|dt| dt.date())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        })
}

/// Formats a date as ISO `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parses a measurement, returning `None` for blank, non-numeric, or non-finite input.
pub fn parse_number(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_common_date_shapes() {
        let expected = ymd(2024, 1, 15);
        for input in [
            "2024-01-15",
            "2024/01/15",
            "01/15/2024",
            "15/01/2024",
            "15.01.2024",
            "15-Jan-2024",
            "Jan 15, 2024",
            "January 15, 2024",
            "15 January 2024",
            " 2024-01-15 ",
        ] {
            assert_eq!(parse_date(input), Some(expected), "input {input:?}");
        }
    }

    #[test]
    fn slash_dates_are_month_first() {
        assert_eq!(parse_date("03/04/2024"), Some(ymd(2024, 3, 4)));
    }

    #[test]
    fn datetimes_truncate_to_date() {
        assert_eq!(parse_date("2024-01-15T10:30:00"), Some(ymd(2024, 1, 15)));
        assert_eq!(parse_date("2024-01-15 23:59"), Some(ymd(2024, 1, 15)));
        assert_eq!(
            parse_date("2024-01-15T10:30:00+02:00"),
            Some(ymd(2024, 1, 15))
        );
    }

    #[test]
    fn rejects_garbage_and_impossible_dates() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("yesterday"), None);
        assert_eq!(parse_date("2024-02-30"), None);
        assert_eq!(parse_date("13/13/2024"), None);
    }

    #[test]
    fn numbers() {
        assert_eq!(parse_number("10.2"), Some(10.2));
        assert_eq!(parse_number(" -3 "), Some(-3.0));
        assert_eq!(parse_number("1e2"), Some(100.0));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("dnf"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
    }
}
