//! Report title line

use chrono::NaiveDate;

use crate::core::ProjectFilter;
use crate::utils::ReportRange;

/// Widest range still described as "LAST N DAYS"
const MAX_RELATIVE_DAYS: i64 = 7;

fn long_date(date: NaiveDate) -> String {
    date.format("%B %d, %Y").to_string().to_uppercase()
}

fn range_text(range: &ReportRange, today: NaiveDate) -> String {
    if let Some(until) = range.until {
        return format!("{} - {}", long_date(range.since), long_date(until));
    }
    let days_ago = range
        .days_back
        .unwrap_or_else(|| (today - range.since).num_days());
    match days_ago {
        i64::MIN..=1 => "TODAY".to_string(),
        2..=MAX_RELATIVE_DAYS => format!("LAST {days_ago} DAYS"),
        _ => format!("SINCE {}", long_date(range.since)),
    }
}

/// Title shown at the top of every report, e.g.
/// `CLAUDE CODE TIMESHEET - LAST 7 DAYS - FILTER: *acme*`
pub(crate) fn header_label(
    range: &ReportRange,
    today: NaiveDate,
    filter: &ProjectFilter,
    grouped: bool,
) -> String {
    let mut label = format!("CLAUDE CODE TIMESHEET - {}", range_text(range, today));
    if let Some(p) = filter.include_pattern() {
        label.push_str(&format!(" - FILTER: {p}"));
    }
    if let Some(p) = filter.exclude_pattern() {
        label.push_str(&format!(" - EXCLUDE: {p}"));
    }
    if grouped {
        label.push_str(" - GROUPED TIME");
    }
    label
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::parse_range_arg;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn label_for(arg: Option<&str>) -> String {
        let today = d(2025, 1, 15);
        let range = parse_range_arg(arg, today).unwrap();
        header_label(&range, today, &ProjectFilter::all(), false)
    }

    #[test]
    fn default_range_is_last_seven_days() {
        assert_eq!(label_for(None), "CLAUDE CODE TIMESHEET - LAST 7 DAYS");
    }

    #[test]
    fn zero_or_one_day_is_today() {
        assert_eq!(label_for(Some("0")), "CLAUDE CODE TIMESHEET - TODAY");
        assert_eq!(label_for(Some("1")), "CLAUDE CODE TIMESHEET - TODAY");
        assert_eq!(label_for(Some("20250115")), "CLAUDE CODE TIMESHEET - TODAY");
        assert_eq!(label_for(Some("20250114")), "CLAUDE CODE TIMESHEET - TODAY");
    }

    #[test]
    fn short_ranges_are_relative() {
        assert_eq!(label_for(Some("2")), "CLAUDE CODE TIMESHEET - LAST 2 DAYS");
        assert_eq!(label_for(Some("2025-01-12")), "CLAUDE CODE TIMESHEET - LAST 3 DAYS");
    }

    #[test]
    fn long_ranges_name_the_start() {
        assert_eq!(
            label_for(Some("30")),
            "CLAUDE CODE TIMESHEET - SINCE DECEMBER 16, 2024"
        );
        assert_eq!(
            label_for(Some("20250101")),
            "CLAUDE CODE TIMESHEET - SINCE JANUARY 01, 2025"
        );
    }

    #[test]
    fn explicit_until_shows_both_ends() {
        let range = ReportRange {
            since: d(2025, 1, 1),
            until: Some(d(2025, 1, 31)),
            days_back: None,
        };
        assert_eq!(
            header_label(&range, d(2025, 2, 10), &ProjectFilter::all(), false),
            "CLAUDE CODE TIMESHEET - JANUARY 01, 2025 - JANUARY 31, 2025"
        );
    }

    #[test]
    fn filters_and_grouping_are_appended() {
        let range = parse_range_arg(Some("7"), d(2025, 1, 15)).unwrap();
        let filter = ProjectFilter::new(Some("*acme*"), Some("*sandbox*")).unwrap();
        assert_eq!(
            header_label(&range, d(2025, 1, 15), &filter, true),
            "CLAUDE CODE TIMESHEET - LAST 7 DAYS - FILTER: *acme* - EXCLUDE: *sandbox* - GROUPED TIME"
        );
    }
}
