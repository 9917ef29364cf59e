//! Claude Code JSONL parser
//!
//! Each line of a session log is a JSON object. Only four fields matter here:
//! `timestamp`, `sessionId`, `type` and `uuid`. The project is the name of the
//! directory holding the file.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::core::MessageKind;
use crate::error::AppResult;
use crate::source::{IngestRecord, ParsedFile};
use crate::utils::debug_log;

// ============================================================================
// Internal types for JSONL parsing
// ============================================================================

#[derive(Debug, Deserialize)]
struct LogLine {
    timestamp: Option<String>,
    #[serde(rename = "sessionId")]
    session_id: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    uuid: Option<String>,
}

// ============================================================================
// File discovery
// ============================================================================

pub(super) fn find_claude_files(root: &Path) -> Vec<PathBuf> {
    let pattern = format!(
        "{}/**/*.jsonl",
        glob::Pattern::escape(&root.to_string_lossy())
    );

    let mut files = Vec::new();
    if let Ok(entries) = glob::glob(&pattern) {
        for entry in entries.flatten() {
            files.push(entry);
        }
    }
    files.sort();
    files
}

// ============================================================================
// Parsing
// ============================================================================

/// Project identifier for a log file: the name of its parent directory
pub(super) fn project_id_for(path: &Path) -> String {
    path.parent()
        .and_then(|p| p.file_name())
        .and_then(|s| s.to_str())
        .unwrap_or(crate::consts::UNKNOWN)
        .to_string()
}

pub(super) fn parse_claude_file(path: &Path) -> AppResult<ParsedFile> {
    let project_id = project_id_for(path);
    let reader = BufReader::new(File::open(path)?);

    let mut parsed = ParsedFile::default();
    for (line_no, line) in reader.lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                debug_log!(
                    "Failed to read line {} in {}: {}",
                    line_no + 1,
                    path.display(),
                    err
                );
                parsed.skipped += 1;
                continue;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        match parse_line(&line, &project_id) {
            Ok(record) => parsed.records.push(record),
            Err(reason) => {
                debug_log!("Skipping {}:{}: {}", path.display(), line_no + 1, reason);
                parsed.skipped += 1;
            }
        }
    }
    Ok(parsed)
}

fn parse_line(line: &str, project_id: &str) -> Result<IngestRecord, String> {
    let entry: LogLine =
        serde_json::from_str(line.trim()).map_err(|e| format!("invalid JSON ({e})"))?;

    let raw_ts = entry
        .timestamp
        .filter(|s| !s.is_empty())
        .ok_or("missing timestamp")?;
    let session_id = entry
        .session_id
        .filter(|s| !s.is_empty())
        .ok_or("missing sessionId")?;

    let timestamp = raw_ts
        .parse::<DateTime<Utc>>()
        .map_err(|e| format!("invalid timestamp {raw_ts:?} ({e})"))?;

    Ok(IngestRecord {
        timestamp,
        session_id,
        project_id: project_id.to_string(),
        kind: entry.kind.as_deref().map(MessageKind::parse),
        uuid: entry.uuid.filter(|s| !s.is_empty()),
    })
}
