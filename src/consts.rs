/// Standard date format used throughout the codebase: "2025-01-15"
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Width of one billable block in minutes
pub(crate) const BLOCK_MINUTES: u32 = 15;

/// Hours billed for each occupied block
pub(crate) const BLOCK_HOURS: f64 = 0.25;

/// Days covered by a report when no range argument is given
pub(crate) const DEFAULT_DAYS_BACK: i64 = 7;

/// File name of the message store when no path is configured
pub(crate) const DEFAULT_DB_FILE: &str = "claude_messages.db";

/// Width of the rule lines in the text report
pub(crate) const REPORT_WIDTH: usize = 80;

/// Fallback project identifier when a log file has no usable parent directory
pub(crate) const UNKNOWN: &str = "unknown";
