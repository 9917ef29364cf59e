use comfy_table::{Cell, Color};

use crate::core::{DaySheet, Timesheet};
use crate::output::format::{
    create_styled_table, format_date_key, format_hours, header_cell, right_cell, styled_cell,
};
use crate::output::{NO_ACTIVITY, ReportOptions, ordered_days};

fn add_day_rows(table: &mut comfy_table::Table, date: &str, day: &DaySheet, use_color: bool) {
    let hours_color = if use_color { Some(Color::Green) } else { None };

    for (i, total) in day.project_totals().iter().enumerate() {
        table.add_row(vec![
            Cell::new(if i == 0 { date } else { "" }),
            Cell::new(&total.project),
            right_cell(&total.blocks.to_string(), None, false),
            right_cell(&format_hours(total.hours()), hours_color, false),
        ]);
    }

    table.add_row(vec![
        Cell::new(""),
        styled_cell("Daily Total", None, true),
        right_cell(&day.blocks().to_string(), None, true),
        right_cell(&format_hours(day.hours()), hours_color, true),
    ]);
}

/// One row per day and project, a subtotal per day, and a grand total
pub(crate) fn render_table(sheet: &Timesheet, options: &ReportOptions) -> String {
    let c = options.use_color;
    let cyan = if c { Some(Color::Cyan) } else { None };
    let green = if c { Some(Color::Green) } else { None };

    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("Date", c),
        header_cell("Project", c),
        header_cell("Blocks", c),
        header_cell("Hours", c),
    ]);

    for (date, day) in ordered_days(sheet, options.order) {
        add_day_rows(&mut table, &format_date_key(*date), day, c);
    }

    table.add_row(vec![
        styled_cell("TOTAL", cyan, true),
        Cell::new(""),
        right_cell(&sheet.total_blocks().to_string(), cyan, true),
        right_cell(&format_hours(sheet.total_hours()), green, true),
    ]);

    let mut out = format!("\n  {}\n\n", options.title);
    if sheet.is_empty() {
        out.push_str(&format!("  {NO_ACTIVITY}\n\n"));
    }
    out.push_str(&table.to_string());
    out.push_str(&format!(
        "\n\n  {} to {} | {} projects\n",
        format_date_key(options.since),
        format_date_key(options.until),
        sheet.project_totals().len()
    ));
    out
}
