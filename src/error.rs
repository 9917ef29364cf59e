use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

pub(crate) type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("Invalid date \"{input}\" (expected YYYYMMDD or YYYY-MM-DD)")]
    InvalidDate { input: String },

    #[error(
        "Invalid argument \"{input}\". Use a number of days (e.g., 7) or a date in YYYYMMDD format (e.g., 20250101)"
    )]
    InvalidRange { input: String },

    #[error("End date {until} is before start date {since}")]
    UntilBeforeSince { since: NaiveDate, until: NaiveDate },

    #[error("Invalid timezone: {input}")]
    InvalidTimezone { input: String },

    #[error("Invalid project pattern \"{pattern}\": {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Claude projects directory not found at {}", path.display())]
    ProjectsDirNotFound { path: PathBuf },

    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Could not open message store {}: {reason}", path.display())]
    StoreUnavailable { path: PathBuf, reason: String },

    #[error("Stored timestamp \"{timestamp}\" for session {session_id} cannot be parsed")]
    CorruptTimestamp {
        timestamp: String,
        session_id: String,
    },

    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
