use serde_json::json;

use crate::core::Timesheet;
use crate::output::format::format_date_key;
use crate::output::{ReportOptions, ordered_days};

pub(crate) fn render_json(sheet: &Timesheet, options: &ReportOptions) -> String {
    let days: Vec<serde_json::Value> = ordered_days(sheet, options.order)
        .into_iter()
        .map(|(date, day)| {
            let projects: Vec<serde_json::Value> = day
                .project_totals()
                .iter()
                .map(|t| {
                    json!({
                        "project": t.project,
                        "blocks": t.blocks,
                        "hours": t.hours(),
                    })
                })
                .collect();
            json!({
                "date": format_date_key(*date),
                "projects": projects,
                "blocks": day.blocks(),
                "hours": day.hours(),
            })
        })
        .collect();

    let projects: Vec<serde_json::Value> = sheet
        .project_totals()
        .iter()
        .map(|t| {
            json!({
                "project": t.project,
                "blocks": t.blocks,
                "hours": t.hours(),
                "sessions": sheet.session_count(&t.project),
            })
        })
        .collect();

    let output = json!({
        "title": options.title,
        "since": format_date_key(options.since),
        "until": format_date_key(options.until),
        "days": days,
        "projects": projects,
        "total_blocks": sheet.total_blocks(),
        "total_hours": sheet.total_hours(),
    });

    serde_json::to_string_pretty(&output).unwrap_or_else(|e| {
        eprintln!("Failed to serialize JSON output: {}", e);
        "{}".to_string()
    })
}
