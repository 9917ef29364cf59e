//! SQLite message store
//!
//! One row per log record. Timestamps are stored as RFC 3339 UTC strings with
//! millisecond precision and a `Z` suffix, so string order is time order and
//! range queries can compare text directly.

mod queries;

use chrono::SecondsFormat;
use rusqlite::{Connection, OpenFlags, OptionalExtension, params};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};
use crate::source::IngestRecord;
use crate::utils::debug_log;

const DEDUP_INDEX: &str = "idx_messages_dedup";

/// Handle to the message database, passed explicitly to whoever needs it
pub(crate) struct Store {
    conn: Connection,
}

impl Store {
    /// Open (creating if needed) the store at `path` for writing
    pub(crate) fn open(path: &Path) -> AppResult<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path).map_err(|e| unavailable(path, e.to_string()))?;
        let store = Self { conn };
        store.init()?;
        debug_log!("Opened message store {}", path.display());
        Ok(store)
    }

    /// Open an existing store for reporting. Never creates or migrates.
    pub(crate) fn open_read_only(path: &Path) -> AppResult<Self> {
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(path, flags)
            .map_err(|e| unavailable(path, e.to_string()))?;
        let store = Self { conn };
        if !store.table_exists("messages")? {
            return Err(unavailable(path, "no messages table; run import first"));
        }
        debug_log!("Opened message store {} (read-only)", path.display());
        Ok(store)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> AppResult<Self> {
        let store = Self {
            conn: Connection::open_in_memory()?,
        };
        store.init()?;
        Ok(store)
    }

    /// Create the schema. Safe to run against an existing database.
    fn init(&self) -> AppResult<()> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS messages (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                timestamp TEXT NOT NULL,
                session_id TEXT NOT NULL,
                project_name TEXT NOT NULL,
                message_type TEXT,
                uuid TEXT,
                created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            );

            CREATE INDEX IF NOT EXISTS idx_session_id ON messages(session_id);
            CREATE INDEX IF NOT EXISTS idx_timestamp ON messages(timestamp);
            CREATE INDEX IF NOT EXISTS idx_project_name ON messages(project_name);
            ",
        )?;
        self.ensure_dedup_index()
    }

    fn table_exists(&self, name: &str) -> AppResult<bool> {
        self.schema_object_exists("table", name)
    }

    fn schema_object_exists(&self, kind: &str, name: &str) -> AppResult<bool> {
        let found: Option<String> = self
            .conn
            .query_row(
                "SELECT name FROM sqlite_master WHERE type = ?1 AND name = ?2",
                params![kind, name],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    /// Databases written before the unique index existed may hold duplicate
    /// rows from repeated imports. Drop them, keeping the oldest, then index.
    fn ensure_dedup_index(&self) -> AppResult<()> {
        if self.schema_object_exists("index", DEDUP_INDEX)? {
            return Ok(());
        }

        let removed = self.conn.execute(
            "DELETE FROM messages WHERE id NOT IN (
                SELECT MIN(id) FROM messages
                GROUP BY session_id, timestamp, IFNULL(uuid, '')
            )",
            [],
        )?;
        if removed > 0 {
            debug_log!("Removed {} duplicate messages before indexing", removed);
        }

        self.conn.execute_batch(&format!(
            "CREATE UNIQUE INDEX IF NOT EXISTS {DEDUP_INDEX}
                ON messages(session_id, timestamp, IFNULL(uuid, ''));"
        ))?;
        Ok(())
    }

    /// Insert records in one transaction, skipping any already stored.
    ///
    /// Returns how many rows were actually added.
    pub(crate) fn insert_records(&mut self, records: &[IngestRecord]) -> AppResult<usize> {
        if records.is_empty() {
            return Ok(0);
        }
        let tx = self.conn.transaction()?;
        let mut inserted = 0;
        {
            let mut stmt = tx.prepare(
                "INSERT OR IGNORE INTO messages
                    (timestamp, session_id, project_name, message_type, uuid)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for record in records {
                inserted += stmt.execute(params![
                    format_timestamp(record),
                    record.session_id,
                    record.project_id,
                    record.kind.as_ref().map(|k| k.as_str()),
                    record.uuid,
                ])?;
            }
        }
        tx.commit()?;
        Ok(inserted)
    }

    /// Remove every stored message
    pub(crate) fn clear(&mut self) -> AppResult<usize> {
        Ok(self.conn.execute("DELETE FROM messages", [])?)
    }

    pub(crate) fn count(&self) -> AppResult<usize> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM messages", [], |row| row.get(0))?;
        Ok(usize::try_from(n).unwrap_or(0))
    }
}

fn format_timestamp(record: &IngestRecord) -> String {
    record
        .timestamp
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn unavailable(path: &Path, reason: impl Into<String>) -> AppError {
    AppError::StoreUnavailable {
        path: PathBuf::from(path),
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MessageKind;
    use chrono::{DateTime, Utc};
    use tempfile::TempDir;

    pub(super) fn record(ts: &str, session: &str, project: &str, uuid: Option<&str>) -> IngestRecord {
        IngestRecord {
            timestamp: ts.parse::<DateTime<Utc>>().unwrap(),
            session_id: session.to_string(),
            project_id: project.to_string(),
            kind: Some(MessageKind::User),
            uuid: uuid.map(str::to_string),
        }
    }

    fn index_names(store: &Store) -> Vec<String> {
        let mut stmt = store
            .conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'index' AND tbl_name = 'messages'")
            .unwrap();
        let rows = stmt.query_map([], |row| row.get::<_, String>(0)).unwrap();
        rows.map(Result::unwrap).collect()
    }

    #[test]
    fn init_creates_schema_and_indexes() {
        let store = Store::open_in_memory().unwrap();
        let names = index_names(&store);
        for expected in ["idx_session_id", "idx_timestamp", "idx_project_name", DEDUP_INDEX] {
            assert!(names.iter().any(|n| n == expected), "missing {expected}");
        }
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn init_is_idempotent() {
        let store = Store::open_in_memory().unwrap();
        store.init().unwrap();
        store.init().unwrap();
    }

    #[test]
    fn insert_records_is_idempotent() {
        let mut store = Store::open_in_memory().unwrap();
        let batch = vec![
            record("2025-01-15T10:00:00Z", "s1", "-p", Some("a")),
            record("2025-01-15T10:01:00Z", "s1", "-p", Some("b")),
        ];
        assert_eq!(store.insert_records(&batch).unwrap(), 2);
        assert_eq!(store.insert_records(&batch).unwrap(), 0);
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn records_without_uuid_still_dedup() {
        let mut store = Store::open_in_memory().unwrap();
        let r = record("2025-01-15T10:00:00Z", "s1", "-p", None);
        assert_eq!(store.insert_records(&[r.clone(), r]).unwrap(), 1);
    }

    #[test]
    fn same_instant_different_offsets_dedup() {
        let mut store = Store::open_in_memory().unwrap();
        let a = record("2025-01-15T10:00:00Z", "s1", "-p", Some("a"));
        let b = record("2025-01-15T12:00:00+02:00", "s1", "-p", Some("a"));
        assert_eq!(store.insert_records(&[a, b]).unwrap(), 1);
    }

    #[test]
    fn timestamps_stored_normalized() {
        let mut store = Store::open_in_memory().unwrap();
        store
            .insert_records(&[record("2025-01-15T12:00:00+02:00", "s1", "-p", None)])
            .unwrap();
        let ts: String = store
            .conn
            .query_row("SELECT timestamp FROM messages", [], |row| row.get(0))
            .unwrap();
        assert_eq!(ts, "2025-01-15T10:00:00.000Z");
    }

    #[test]
    fn clear_removes_everything() {
        let mut store = Store::open_in_memory().unwrap();
        store
            .insert_records(&[record("2025-01-15T10:00:00Z", "s1", "-p", None)])
            .unwrap();
        assert_eq!(store.clear().unwrap(), 1);
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn migration_drops_duplicates_from_legacy_table() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "
            CREATE TABLE messages (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                timestamp TEXT NOT NULL,
                session_id TEXT NOT NULL,
                project_name TEXT NOT NULL,
                message_type TEXT,
                uuid TEXT,
                created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            );
            INSERT INTO messages (timestamp, session_id, project_name, uuid)
                VALUES ('2025-01-15T10:00:00.000Z', 's1', '-p', 'a'),
                       ('2025-01-15T10:00:00.000Z', 's1', '-p', 'a'),
                       ('2025-01-15T10:05:00.000Z', 's1', '-p', NULL),
                       ('2025-01-15T10:05:00.000Z', 's1', '-p', NULL);
            ",
        )
        .unwrap();

        let store = Store { conn };
        store.init().unwrap();
        assert_eq!(store.count().unwrap(), 2);
        assert!(index_names(&store).iter().any(|n| n == DEDUP_INDEX));
    }

    #[test]
    fn open_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("db").join("messages.db");
        let mut store = Store::open(&path).unwrap();
        store
            .insert_records(&[record("2025-01-15T10:00:00Z", "s1", "-p", None)])
            .unwrap();
        drop(store);

        let reader = Store::open_read_only(&path).unwrap();
        assert_eq!(reader.count().unwrap(), 1);
    }

    #[test]
    fn open_read_only_missing_file_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let err = Store::open_read_only(&dir.path().join("missing.db")).err().unwrap();
        assert!(matches!(err, AppError::StoreUnavailable { .. }));
    }

    #[test]
    fn open_read_only_without_table_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.db");
        Connection::open(&path)
            .unwrap()
            .execute_batch("CREATE TABLE other (x INTEGER);")
            .unwrap();
        let err = Store::open_read_only(&path).err().unwrap();
        assert!(matches!(err, AppError::StoreUnavailable { .. }));
    }
}
