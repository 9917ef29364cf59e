//! Core module - the event model and block aggregation shared by every command

mod aggregator;
mod filter;
mod project;
mod types;

pub(crate) use aggregator::{aggregate, combine_projects};
pub(crate) use filter::ProjectFilter;
pub(crate) use project::ProjectNamer;
pub(crate) use types::{DateFilter, DaySheet, Event, MessageKind, Timesheet};
