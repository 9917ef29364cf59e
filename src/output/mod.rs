mod format;
mod header;
mod json;
mod table;
mod text;

use chrono::NaiveDate;

use crate::cli::SortOrder;
use crate::core::{DaySheet, Timesheet};

pub(crate) use header::header_label;
pub(crate) use json::render_json;
pub(crate) use table::render_table;
pub(crate) use text::render_text;

/// Line shown in place of day sections when nothing was billed
pub(crate) const NO_ACTIVITY: &str = "No activity found.";

#[derive(Debug, Clone)]
pub(crate) struct ReportOptions {
    pub(crate) title: String,
    /// First and last local date covered
    pub(crate) since: NaiveDate,
    pub(crate) until: NaiveDate,
    pub(crate) order: SortOrder,
    pub(crate) use_color: bool,
}

/// Days in display order
pub(super) fn ordered_days(sheet: &Timesheet, order: SortOrder) -> Vec<(&NaiveDate, &DaySheet)> {
    let mut days: Vec<_> = sheet.days.iter().collect();
    if matches!(order, SortOrder::Desc) {
        days.reverse();
    }
    days
}
