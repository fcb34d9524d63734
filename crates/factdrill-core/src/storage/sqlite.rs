//! SQLite Storage Implementation
//!
//! Attempt log as an append-only table, user config as a single JSON row.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use directories::ProjectDirs;
use rusqlite::{Connection, OptionalExtension, params};

use super::{Result, Storage, StorageError};
use crate::config::UserConfig;
use crate::mastery::Attempt;
use crate::quiz::QuizFormat;

/// File name of the database inside a data directory
pub const DB_FILE_NAME: &str = "factdrill.db";

/// Raw attempt row before the format name is validated
type AttemptRow = (String, String, i64, bool);

/// SQLite-backed store.
///
/// One connection behind a `Mutex`; all methods take `&self`, so the store
/// is `Send + Sync` and can be shared as `Arc<SqliteStorage>`.
pub struct SqliteStorage {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl SqliteStorage {
    /// Apply PRAGMAs to a file-backed connection
    fn configure_connection(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA temp_store = MEMORY;
             PRAGMA busy_timeout = 5000;",
        )?;
        Ok(())
    }

    /// Platform data directory, created owner-only if missing
    fn default_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "factdrill", "factdrill").ok_or_else(|| {
            StorageError::Init("Could not determine project directories".to_string())
        })?;

        let data_dir = proj_dirs.data_dir();
        std::fs::create_dir_all(data_dir)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o700);
            let _ = std::fs::set_permissions(data_dir, perms);
        }
        Ok(data_dir.join(DB_FILE_NAME))
    }

    /// Open (or create) the store at `db_path`, or in the platform data
    /// directory when `None`
    pub fn new(db_path: Option<PathBuf>) -> Result<Self> {
        let path = match db_path {
            Some(p) => p,
            None => Self::default_path()?,
        };

        let conn = Connection::open(&path)?;

        #[cfg(unix)]
        if path.exists() {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            let _ = std::fs::set_permissions(&path, perms);
        }

        Self::configure_connection(&conn)?;
        let applied = super::migrations::apply_migrations(&conn)?;
        tracing::info!(path = %path.display(), migrations = applied, "Opened attempt store");

        Ok(Self {
            conn: Mutex::new(conn),
            path: Some(path),
        })
    }

    /// Open the store inside `dir`, creating the directory if needed
    pub fn in_dir(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir)?;
        Self::new(Some(dir.join(DB_FILE_NAME)))
    }

    /// Throwaway store that lives only as long as this value
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        super::migrations::apply_migrations(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            path: None,
        })
    }

    /// Database file, if file-backed
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| StorageError::Init("Connection lock poisoned".into()))
    }

    fn read_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<AttemptRow> {
        Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
    }

    /// Rows with a format this build does not know are skipped
    fn into_attempt((family_id, format, timestamp, correct): AttemptRow) -> Option<Attempt> {
        match format.parse::<QuizFormat>() {
            Ok(format) => Some(Attempt {
                family_id,
                format,
                timestamp,
                correct,
            }),
            Err(e) => {
                tracing::warn!("Skipping attempt for {}: {}", family_id, e);
                None
            }
        }
    }

    fn collect_attempts(
        rows: impl Iterator<Item = rusqlite::Result<AttemptRow>>,
    ) -> Result<Vec<Attempt>> {
        let mut attempts = Vec::new();
        for row in rows {
            if let Some(attempt) = Self::into_attempt(row?) {
                attempts.push(attempt);
            }
        }
        Ok(attempts)
    }
}

impl Storage for SqliteStorage {
    fn attempts(&self, family_id: &str) -> Result<Vec<Attempt>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT family_id, format, timestamp_ms, correct FROM attempts
             WHERE family_id = ?1 ORDER BY id",
        )?;
        let rows = stmt.query_map(params![family_id], Self::read_row)?;
        Self::collect_attempts(rows)
    }

    fn all_attempts(&self) -> Result<Vec<Attempt>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT family_id, format, timestamp_ms, correct FROM attempts ORDER BY id",
        )?;
        let rows = stmt.query_map([], Self::read_row)?;
        Self::collect_attempts(rows)
    }

    fn save_attempt(&self, attempt: Attempt) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO attempts (family_id, format, timestamp_ms, correct) VALUES (?1, ?2, ?3, ?4)",
            params![
                attempt.family_id,
                attempt.format.as_str(),
                attempt.timestamp,
                attempt.correct
            ],
        )?;
        Ok(())
    }

    fn clear_all_attempts(&self) -> Result<()> {
        let conn = self.conn()?;
        let removed = conn.execute("DELETE FROM attempts", [])?;
        tracing::info!(removed, "Cleared attempt log");
        Ok(())
    }

    fn user_config(&self) -> Result<UserConfig> {
        let conn = self.conn()?;
        let document: Option<String> = conn
            .query_row("SELECT document FROM user_config WHERE id = 1", [], |row| {
                row.get(0)
            })
            .optional()?;

        match document {
            Some(json) => Ok(UserConfig::from_stored_json(&json)?),
            None => Ok(UserConfig::default()),
        }
    }

    fn save_user_config(&self, config: UserConfig) -> Result<()> {
        let document = serde_json::to_string(&config)?;
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO user_config (id, document, updated_at) VALUES (1, ?1, ?2)
             ON CONFLICT(id) DO UPDATE SET document = excluded.document, updated_at = excluded.updated_at",
            params![document, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }
}
