//! Log source abstraction layer
//!
//! A source knows where its log files live and how to turn one file into
//! validated ingestion records. Everything past this point works with typed
//! records only; malformed lines never leave the parser.

pub(crate) mod claude;
pub(crate) mod loader;

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

use crate::core::MessageKind;
use crate::error::AppResult;

/// A log record that carried every field ingestion requires
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct IngestRecord {
    pub(crate) timestamp: DateTime<Utc>,
    pub(crate) session_id: String,
    /// Raw project identifier, as named on disk
    pub(crate) project_id: String,
    pub(crate) kind: Option<MessageKind>,
    pub(crate) uuid: Option<String>,
}

/// Records recovered from one file, plus how many lines were unusable
#[derive(Debug, Default)]
pub(crate) struct ParsedFile {
    pub(crate) records: Vec<IngestRecord>,
    pub(crate) skipped: usize,
}

/// Log source trait
pub(crate) trait Source {
    /// Display name for output
    fn display_name(&self) -> &'static str;

    /// Root directory scanned by `find_files`
    fn root(&self) -> &Path;

    /// Find all log files for this source, in a stable order
    fn find_files(&self) -> Vec<PathBuf>;

    /// Parse a single file into records
    fn parse_file(&self, path: &Path) -> AppResult<ParsedFile>;
}

pub(crate) use claude::ClaudeSource;
pub(crate) use loader::{ImportSummary, Importer};
