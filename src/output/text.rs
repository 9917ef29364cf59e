//! Plain-text timesheet, fixed 80 columns

use crate::consts::REPORT_WIDTH;
use crate::core::Timesheet;
use crate::output::format::{format_day_heading, format_hours};
use crate::output::{NO_ACTIVITY, ReportOptions, ordered_days};

/// Width of the label column before the hours figure
const LABEL_WIDTH: usize = 60;

fn hours_line(label: &str, hours: f64) -> String {
    format!(
        "  {label:<width$} {:>6} hrs",
        format_hours(hours),
        width = LABEL_WIDTH
    )
}

pub(crate) fn render_text(sheet: &Timesheet, options: &ReportOptions) -> String {
    let heavy = "=".repeat(REPORT_WIDTH);
    let light = "-".repeat(REPORT_WIDTH);

    let mut lines = vec![heavy.clone(), options.title.clone(), heavy.clone(), String::new()];

    if sheet.is_empty() {
        lines.push(NO_ACTIVITY.to_string());
        lines.push(String::new());
    }

    for (date, day) in ordered_days(sheet, options.order) {
        lines.push(format_day_heading(*date));
        lines.push(light.clone());
        for total in day.project_totals() {
            lines.push(hours_line(&total.project, total.hours()));
        }
        lines.push(String::new());
        lines.push(hours_line("Daily Total:", day.hours()));
        lines.push(String::new());
    }

    lines.push(heavy.clone());
    lines.push(hours_line("TOTAL HOURS:", sheet.total_hours()));
    lines.push(heavy);

    lines.join("\n")
}
