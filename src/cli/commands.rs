//! CLI subcommand definitions

use std::path::PathBuf;

use clap::{Args, Subcommand};

use super::args::{OutputFormat, SortOrder};

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Load Claude Code conversation logs into the message database
    Import(ImportArgs),
    /// Print billable hours in 15-minute blocks per project and day
    Report(ReportArgs),
}

#[derive(Debug, Args)]
pub(crate) struct ImportArgs {
    /// Import a single JSONL file instead of the whole projects directory
    #[arg(value_name = "FILE")]
    pub(crate) file: Option<PathBuf>,

    /// Claude projects directory (default: ~/.claude/projects)
    #[arg(long, value_name = "DIR")]
    pub(crate) projects_dir: Option<PathBuf>,

    /// Delete every stored message before importing
    #[arg(long)]
    pub(crate) fresh: bool,
}

#[derive(Debug, Args)]
pub(crate) struct ReportArgs {
    /// Days back (e.g., 7) or start date (YYYYMMDD or YYYY-MM-DD). Default: 7 days
    #[arg(value_name = "DAYS|DATE")]
    pub(crate) range: Option<String>,

    /// Only include projects matching this glob (e.g., "*acme*")
    #[arg(short, long, value_name = "PATTERN")]
    pub(crate) project: Option<String>,

    /// Leave out projects matching this glob
    #[arg(short = 'x', long, value_name = "PATTERN")]
    pub(crate) exclude: Option<String>,

    /// Last day to include (YYYYMMDD or YYYY-MM-DD). Default: today
    #[arg(short, long, value_name = "DATE")]
    pub(crate) until: Option<String>,

    /// Count each 15-minute block once across all projects
    #[arg(short, long)]
    pub(crate) group_time: bool,

    /// Output format
    #[arg(short, long, value_enum)]
    pub(crate) format: Option<OutputFormat>,

    /// Order of days in the report
    #[arg(short, long, value_enum)]
    pub(crate) order: Option<SortOrder>,
}
