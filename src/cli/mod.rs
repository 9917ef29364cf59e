pub(crate) mod args;
pub(crate) mod commands;

pub(crate) use args::{Cli, OutputFormat, SortOrder};
pub(crate) use commands::{Commands, ImportArgs, ReportArgs};
