use chrono::{Days, NaiveDate};

use crate::consts::DEFAULT_DAYS_BACK;
use crate::error::{AppError, AppResult};

pub(crate) fn parse_date(s: &str) -> AppResult<NaiveDate> {
    // Try YYYYMMDD
    if s.len() == 8
        && let Ok(d) = NaiveDate::parse_from_str(s, "%Y%m%d")
    {
        return Ok(d);
    }
    // Try YYYY-MM-DD
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(d);
    }
    Err(AppError::InvalidDate {
        input: s.to_string(),
    })
}

/// Inclusive local-date range selected for a report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ReportRange {
    pub(crate) since: NaiveDate,
    pub(crate) until: Option<NaiveDate>,
    /// Set when the range was given as a number of days back
    pub(crate) days_back: Option<i64>,
}

impl ReportRange {
    /// Close the range at `until`, which may not precede the start
    pub(crate) fn with_until(self, until: NaiveDate) -> AppResult<Self> {
        if until < self.since {
            return Err(AppError::UntilBeforeSince {
                since: self.since,
                until,
            });
        }
        Ok(Self {
            until: Some(until),
            ..self
        })
    }
}

/// Interpret the report's positional argument: a start date or a number of days back.
///
/// Dates win over numbers, so `20250101` is January 1st rather than 20 million days.
pub(crate) fn parse_range_arg(arg: Option<&str>, today: NaiveDate) -> AppResult<ReportRange> {
    let Some(raw) = arg.map(str::trim).filter(|s| !s.is_empty()) else {
        return days_back(DEFAULT_DAYS_BACK, today, "");
    };

    if let Ok(since) = parse_date(raw) {
        return Ok(ReportRange {
            since,
            until: None,
            days_back: None,
        });
    }

    match raw.parse::<i64>() {
        Ok(days) => days_back(days, today, raw),
        Err(_) => Err(AppError::InvalidRange {
            input: raw.to_string(),
        }),
    }
}

fn days_back(days: i64, today: NaiveDate, raw: &str) -> AppResult<ReportRange> {
    let since = u64::try_from(days)
        .ok()
        .and_then(|d| today.checked_sub_days(Days::new(d)))
        .ok_or_else(|| AppError::InvalidRange {
            input: raw.to_string(),
        })?;
    Ok(ReportRange {
        since,
        until: None,
        days_back: Some(days),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn parse_date_compact_and_dashed() {
        assert_eq!(parse_date("20250115").unwrap(), d(2025, 1, 15));
        assert_eq!(parse_date("2025-01-15").unwrap(), d(2025, 1, 15));
    }

    #[test]
    fn parse_date_rejects_garbage() {
        assert!(parse_date("2025/01/15").is_err());
        assert!(parse_date("20251345").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn range_defaults_to_last_seven_days() {
        let r = parse_range_arg(None, d(2025, 3, 10)).unwrap();
        assert_eq!(r.since, d(2025, 3, 3));
        assert_eq!(r.days_back, Some(7));
        assert_eq!(r.until, None);
    }

    #[test]
    fn range_blank_argument_is_default() {
        let r = parse_range_arg(Some("  "), d(2025, 3, 10)).unwrap();
        assert_eq!(r.days_back, Some(7));
    }

    #[test]
    fn range_days_back() {
        let r = parse_range_arg(Some("14"), d(2025, 3, 15)).unwrap();
        assert_eq!(r.since, d(2025, 3, 1));
        assert_eq!(r.days_back, Some(14));
    }

    #[test]
    fn range_zero_days_is_today() {
        let r = parse_range_arg(Some("0"), d(2025, 3, 15)).unwrap();
        assert_eq!(r.since, d(2025, 3, 15));
    }

    #[test]
    fn range_compact_date_wins_over_number() {
        let r = parse_range_arg(Some("20250101"), d(2025, 3, 15)).unwrap();
        assert_eq!(r.since, d(2025, 1, 1));
        assert_eq!(r.days_back, None);
    }

    #[test]
    fn range_rejects_negative_and_text() {
        assert!(parse_range_arg(Some("-3"), d(2025, 3, 15)).is_err());
        assert!(parse_range_arg(Some("lastweek"), d(2025, 3, 15)).is_err());
    }

    #[test]
    fn range_rejects_overflowing_days() {
        let err = parse_range_arg(Some("999999999999"), d(2025, 3, 15)).unwrap_err();
        assert!(matches!(err, AppError::InvalidRange { .. }));
    }

    #[test]
    fn until_closes_the_range() {
        let r = parse_range_arg(Some("20250113"), d(2025, 3, 15)).unwrap();
        let r = r.with_until(d(2025, 1, 15)).unwrap();
        assert_eq!(r.until, Some(d(2025, 1, 15)));
        assert_eq!(r.with_until(d(2025, 1, 13)).unwrap().until, Some(d(2025, 1, 13)));
    }

    #[test]
    fn until_before_since_is_rejected() {
        let r = parse_range_arg(Some("20250115"), d(2025, 3, 15)).unwrap();
        let err = r.with_until(d(2025, 1, 13)).unwrap_err();
        assert!(matches!(err, AppError::UntilBeforeSince { .. }));
    }
}
