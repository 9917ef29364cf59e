//! Core data types shared by ingestion, storage and reporting
//!
//! Events are the only primary entity. Slots, daily totals and grand totals are
//! derived from them on demand and never stored.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::collections::{BTreeMap, BTreeSet};

use crate::consts::BLOCK_HOURS;

/// Kind of conversation record, taken from the log's `type` field
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum MessageKind {
    User,
    Assistant,
    System,
    Summary,
    Other(String),
}

impl MessageKind {
    pub(crate) fn parse(raw: &str) -> Self {
        match raw {
            "user" => MessageKind::User,
            "assistant" => MessageKind::Assistant,
            "system" => MessageKind::System,
            "summary" => MessageKind::Summary,
            other => MessageKind::Other(other.to_string()),
        }
    }

    pub(crate) fn as_str(&self) -> &str {
        match self {
            MessageKind::User => "user",
            MessageKind::Assistant => "assistant",
            MessageKind::System => "system",
            MessageKind::Summary => "summary",
            MessageKind::Other(s) => s,
        }
    }
}

/// A single timestamped activity record attributed to a project
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Event {
    timestamp: DateTime<Utc>,
    session_id: String,
    project: String,
    kind: Option<MessageKind>,
}

impl Event {
    /// Build an event, refusing records without a session or project.
    pub(crate) fn new(
        timestamp: DateTime<Utc>,
        session_id: impl Into<String>,
        project: impl Into<String>,
        kind: Option<MessageKind>,
    ) -> Option<Self> {
        let session_id = session_id.into();
        let project = project.into();
        if session_id.is_empty() || project.is_empty() {
            return None;
        }
        Some(Self {
            timestamp,
            session_id,
            project,
            kind,
        })
    }

    pub(crate) fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub(crate) fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Display name of the project this event counts towards
    pub(crate) fn project(&self) -> &str {
        &self.project
    }

    pub(crate) fn kind(&self) -> Option<&MessageKind> {
        self.kind.as_ref()
    }
}

/// Date filter for queries
#[derive(Debug, Clone, Default)]
pub(crate) struct DateFilter {
    pub(crate) since: Option<NaiveDate>,
    pub(crate) until: Option<NaiveDate>,
}

impl DateFilter {
    pub(crate) fn new(since: Option<NaiveDate>, until: Option<NaiveDate>) -> Self {
        Self { since, until }
    }

    pub(crate) fn contains(&self, date: NaiveDate) -> bool {
        if let Some(s) = self.since
            && date < s
        {
            return false;
        }
        if let Some(u) = self.until
            && date > u
        {
            return false;
        }
        true
    }
}

/// Convert a block count into billable hours
pub(crate) fn blocks_to_hours(blocks: usize) -> f64 {
    blocks as f64 * BLOCK_HOURS
}

/// Billable blocks attributed to one project, for a day or a whole range
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ProjectTotal {
    pub(crate) project: String,
    pub(crate) blocks: usize,
}

impl ProjectTotal {
    pub(crate) fn hours(&self) -> f64 {
        blocks_to_hours(self.blocks)
    }
}

/// Sort by hours descending, then by name so ties render deterministically
fn sort_totals(totals: &mut [ProjectTotal]) {
    totals.sort_by(|a, b| b.blocks.cmp(&a.blocks).then_with(|| a.project.cmp(&b.project)));
}

/// Occupied slots per project for a single day
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct DaySheet {
    pub(crate) projects: BTreeMap<String, BTreeSet<NaiveDateTime>>,
    /// Sessions active per project on this day
    pub(crate) sessions: BTreeMap<String, BTreeSet<String>>,
}

impl DaySheet {
    pub(crate) fn occupy(&mut self, project: &str, slot: NaiveDateTime) {
        match self.projects.get_mut(project) {
            Some(slots) => {
                slots.insert(slot);
            }
            None => {
                self.projects
                    .insert(project.to_string(), BTreeSet::from([slot]));
            }
        }
    }

    pub(crate) fn note_session(&mut self, project: &str, session_id: &str) {
        self.sessions
            .entry(project.to_string())
            .or_default()
            .insert(session_id.to_string());
    }

    pub(crate) fn blocks(&self) -> usize {
        self.projects.values().map(BTreeSet::len).sum()
    }

    pub(crate) fn hours(&self) -> f64 {
        blocks_to_hours(self.blocks())
    }

    /// Daily totals for this day, largest first
    pub(crate) fn project_totals(&self) -> Vec<ProjectTotal> {
        let mut totals: Vec<ProjectTotal> = self
            .projects
            .iter()
            .map(|(project, slots)| ProjectTotal {
                project: project.clone(),
                blocks: slots.len(),
            })
            .collect();
        sort_totals(&mut totals);
        totals
    }
}

/// Aggregated billable time: day → project → occupied slots
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Timesheet {
    pub(crate) days: BTreeMap<NaiveDate, DaySheet>,
    /// Distinct sessions seen per project across the whole range
    pub(crate) sessions: BTreeMap<String, BTreeSet<String>>,
}

impl Timesheet {
    pub(crate) fn session_count(&self, project: &str) -> usize {
        self.sessions.get(project).map_or(0, BTreeSet::len)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub(crate) fn total_blocks(&self) -> usize {
        self.days.values().map(DaySheet::blocks).sum()
    }

    pub(crate) fn total_hours(&self) -> f64 {
        blocks_to_hours(self.total_blocks())
    }

    /// Range totals per project, largest first
    pub(crate) fn project_totals(&self) -> Vec<ProjectTotal> {
        let mut by_project: BTreeMap<&str, usize> = BTreeMap::new();
        for day in self.days.values() {
            for (project, slots) in &day.projects {
                *by_project.entry(project.as_str()).or_default() += slots.len();
            }
        }
        let mut totals: Vec<ProjectTotal> = by_project
            .into_iter()
            .map(|(project, blocks)| ProjectTotal {
                project: project.to_string(),
                blocks,
            })
            .collect();
        sort_totals(&mut totals);
        totals
    }
}
