//! Block aggregation
//!
//! Turns irregular event timestamps into 15-minute billable blocks. An event
//! occupies the wall-clock slot it falls in (floor to :00, :15, :30 or :45),
//! each occupied (project, slot) pair bills exactly one block, and idle slots
//! bill nothing no matter how long the gap.

use chrono::{NaiveDateTime, Timelike};
use std::collections::BTreeSet;

use crate::consts::BLOCK_MINUTES;
use crate::core::types::{DaySheet, Event, MessageKind, Timesheet};
use crate::utils::{Timezone, debug_log};

/// Start of the 15-minute slot containing `wall`.
///
/// Boundaries belong to the slot they open: 14:45:00 lands in 14:45–15:00.
pub(crate) fn slot_start(wall: NaiveDateTime) -> NaiveDateTime {
    let minute = (wall.minute() / BLOCK_MINUTES) * BLOCK_MINUTES;
    wall.date()
        .and_hms_opt(wall.hour(), minute, 0)
        .unwrap_or(wall)
}

/// Aggregate events into a timesheet, bucketing in `timezone`.
///
/// Pure over its input: event order does not affect the result.
pub(crate) fn aggregate(events: &[Event], timezone: Timezone) -> Timesheet {
    let mut sheet = Timesheet::default();
    let mut prompts = 0usize;

    for event in events {
        let wall = timezone.wall_clock(event.timestamp());
        let slot = slot_start(wall);

        let day = sheet.days.entry(slot.date()).or_default();
        day.occupy(event.project(), slot);
        day.note_session(event.project(), event.session_id());

        match sheet.sessions.get_mut(event.project()) {
            Some(sessions) => {
                sessions.insert(event.session_id().to_string());
            }
            None => {
                sheet.sessions.insert(
                    event.project().to_string(),
                    BTreeSet::from([event.session_id().to_string()]),
                );
            }
        }

        if matches!(event.kind(), Some(MessageKind::User)) {
            prompts += 1;
        }
    }

    debug_log!(
        "Aggregated {} events ({} user messages) into {} blocks over {} days",
        events.len(),
        prompts,
        sheet.total_blocks(),
        sheet.days.len()
    );

    sheet
}

/// Name used for a day's merged entry in grouped-time mode
pub(crate) fn combined_name<'a>(projects: impl IntoIterator<Item = &'a str>) -> String {
    let mut names: Vec<&str> = projects.into_iter().collect();
    names.sort_unstable();
    names.dedup();
    format!("Combined: {}", names.join(", "))
}

/// Merge each day's projects into one entry, so a slot worked on several
/// projects at once bills a single block.
pub(crate) fn combine_projects(sheet: Timesheet) -> Timesheet {
    let mut combined = Timesheet::default();

    for (date, day) in sheet.days {
        let name = combined_name(day.projects.keys().map(String::as_str));

        let day_sessions: BTreeSet<String> = day.sessions.into_values().flatten().collect();
        combined
            .sessions
            .entry(name.clone())
            .or_default()
            .extend(day_sessions.iter().cloned());

        let slots: BTreeSet<NaiveDateTime> = day.projects.into_values().flatten().collect();

        let mut merged = DaySheet::default();
        merged.projects.insert(name.clone(), slots);
        merged.sessions.insert(name, day_sessions);
        combined.days.insert(date, merged);
    }

    combined
}
