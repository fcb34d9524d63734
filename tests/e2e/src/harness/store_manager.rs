//! Test Store Manager
//!
//! Provides isolated attempt stores for journey tests:
//! - Temporary SQLite databases that are cleaned up on drop
//! - Reopening the same file to check persistence
//! - Sessions wired to a seeded RNG and a manual clock

use std::path::PathBuf;
use std::sync::Arc;

use factdrill_core::{Attempt, ManualClock, Session, SqliteStorage, Storage, UserConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tempfile::TempDir;

/// Session type used throughout the journeys
pub type TestSession = Session<Arc<SqliteStorage>, ChaCha8Rng>;

/// Manager for test stores
///
/// # Example
///
/// ```rust,ignore
/// let db = TestStoreManager::new_temp();
/// db.save_config(config);
/// let (mut session, clock) = db.session(42, START);
/// ```
pub struct TestStoreManager {
    /// The shared store
    pub storage: Arc<SqliteStorage>,
    /// Temporary directory (kept alive to prevent premature deletion)
    _temp_dir: Option<TempDir>,
    /// Path to the database file
    db_path: PathBuf,
}

impl TestStoreManager {
    /// Create a new store in a temporary directory
    pub fn new_temp() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test_factdrill.db");
        let storage = SqliteStorage::new(Some(db_path.clone())).expect("Failed to create test storage");

        Self {
            storage: Arc::new(storage),
            _temp_dir: Some(temp_dir),
            db_path,
        }
    }

    /// Get the database path
    pub fn path(&self) -> &PathBuf {
        &self.db_path
    }

    /// Open a second, independent store on the same file
    pub fn reopen(&self) -> SqliteStorage {
        SqliteStorage::new(Some(self.db_path.clone())).expect("Failed to reopen test storage")
    }

    /// Number of attempts in the log
    pub fn attempt_count(&self) -> usize {
        self.storage.all_attempts().map(|a| a.len()).unwrap_or(0)
    }

    /// Replace the stored config
    pub fn save_config(&self, config: UserConfig) {
        self.storage
            .save_user_config(config)
            .expect("Failed to save config");
    }

    /// Append attempts directly, bypassing any session
    pub fn seed_attempts(&self, attempts: impl IntoIterator<Item = Attempt>) {
        for attempt in attempts {
            self.storage.save_attempt(attempt).expect("Failed to seed attempt");
        }
    }

    /// Uninitialized session on this store, plus a handle to its clock
    pub fn session(&self, seed: u64, start_ms: i64) -> (TestSession, ManualClock) {
        let clock = ManualClock::new(start_ms);
        let session = Session::with_random(Arc::clone(&self.storage), ChaCha8Rng::seed_from_u64(seed))
            .with_clock(clock.clone());
        (session, clock)
    }
}
