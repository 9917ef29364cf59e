//! Report queries against the message store

use chrono::{DateTime, Days, Utc};

use super::Store;
use crate::core::{DateFilter, Event, MessageKind, ProjectFilter, ProjectNamer};
use crate::error::{AppError, AppResult};
use crate::utils::{Timezone, debug_log};

struct MessageRow {
    timestamp: String,
    session_id: String,
    project_name: String,
    message_type: Option<String>,
}

fn parse_stored_timestamp(raw: &str, session_id: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| AppError::CorruptTimestamp {
            timestamp: raw.to_string(),
            session_id: session_id.to_string(),
        })
}

/// UTC text bounds `[lower, upper)` that cover the local-date range
fn utc_bounds(range: &DateFilter, timezone: Timezone) -> (Option<String>, Option<String>) {
    let fmt = |dt: DateTime<Utc>| dt.to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
    let lower = range.since.map(|d| fmt(timezone.start_of_day_utc(d)));
    let upper = range
        .until
        .and_then(|d| d.checked_add_days(Days::new(1)))
        .map(|d| fmt(timezone.start_of_day_utc(d)));
    (lower, upper)
}

impl Store {
    /// Events whose local date lies in `range`, for projects passing `filter`,
    /// ordered by timestamp.
    ///
    /// Fails on the first stored timestamp that cannot be parsed.
    pub(crate) fn query_events(
        &self,
        range: &DateFilter,
        timezone: Timezone,
        filter: &ProjectFilter,
        namer: &ProjectNamer,
    ) -> AppResult<Vec<Event>> {
        let (lower, upper) = utc_bounds(range, timezone);
        debug_log!("Querying messages in [{:?}, {:?})", lower, upper);
        if filter.is_active() {
            debug_log!(
                "Project filter: include {:?}, exclude {:?}",
                filter.include_pattern(),
                filter.exclude_pattern()
            );
        }

        let mut stmt = self.conn.prepare(
            "SELECT timestamp, session_id, project_name, message_type
             FROM messages
             WHERE (?1 IS NULL OR timestamp >= ?1)
               AND (?2 IS NULL OR timestamp < ?2)
             ORDER BY timestamp ASC, id ASC",
        )?;
        let rows = stmt.query_map(rusqlite::params![lower, upper], |row| {
            Ok(MessageRow {
                timestamp: row.get(0)?,
                session_id: row.get(1)?,
                project_name: row.get(2)?,
                message_type: row.get(3)?,
            })
        })?;

        let mut events = Vec::new();
        let mut filtered_out = 0usize;
        for row in rows {
            let row = row?;
            let timestamp = parse_stored_timestamp(&row.timestamp, &row.session_id)?;

            // The text bounds are widened around DST gaps; the local date decides
            if !range.contains(timezone.wall_clock(timestamp).date()) {
                continue;
            }

            let project = namer.display_name(&row.project_name);
            if !filter.matches(&project) {
                filtered_out += 1;
                continue;
            }

            let kind = row.message_type.as_deref().map(MessageKind::parse);
            match Event::new(timestamp, row.session_id, project, kind) {
                Some(event) => events.push(event),
                None => debug_log!(
                    "Skipping stored message at {} with empty session or project",
                    row.timestamp
                ),
            }
        }

        debug_log!(
            "Loaded {} events ({} excluded by project filter)",
            events.len(),
            filtered_out
        );
        Ok(events)
    }
}
