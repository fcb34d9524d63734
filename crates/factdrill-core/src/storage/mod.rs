//! Storage Module
//!
//! Persistence for the attempt log and the user config:
//! - `Storage` trait: the collaborator contract the session talks to
//! - `MemoryStorage`: in-process store for tests and throwaway sessions
//! - `SqliteStorage`: SQLite store with versioned migrations

use std::sync::Arc;

use crate::config::UserConfig;
use crate::mastery::Attempt;

mod memory;
mod migrations;
mod sqlite;

pub use memory::MemoryStorage;
pub use migrations::{MIGRATIONS, Migration};
pub use sqlite::SqliteStorage;

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Storage error type
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Stored document could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// Initialization error
    #[error("Initialization error: {0}")]
    Init(String),
}

/// Storage result type
pub type Result<T> = std::result::Result<T, StorageError>;

// ============================================================================
// CONTRACT
// ============================================================================

/// Attempt log and config persistence.
///
/// All methods take `&self`; implementations guard their state internally so
/// a store can be shared behind an `Arc`.
pub trait Storage {
    /// Attempts for one family, oldest first
    fn attempts(&self, family_id: &str) -> Result<Vec<Attempt>>;

    /// Every attempt, oldest first
    fn all_attempts(&self) -> Result<Vec<Attempt>>;

    /// Append an attempt to the log
    fn save_attempt(&self, attempt: Attempt) -> Result<()>;

    /// Delete the whole log
    fn clear_all_attempts(&self) -> Result<()>;

    /// Stored config, or the default when none was saved
    fn user_config(&self) -> Result<UserConfig>;

    /// Replace the stored config
    fn save_user_config(&self, config: UserConfig) -> Result<()>;
}

impl<T: Storage + ?Sized> Storage for Arc<T> {
    fn attempts(&self, family_id: &str) -> Result<Vec<Attempt>> {
        (**self).attempts(family_id)
    }

    fn all_attempts(&self) -> Result<Vec<Attempt>> {
        (**self).all_attempts()
    }

    fn save_attempt(&self, attempt: Attempt) -> Result<()> {
        (**self).save_attempt(attempt)
    }

    fn clear_all_attempts(&self) -> Result<()> {
        (**self).clear_all_attempts()
    }

    fn user_config(&self) -> Result<UserConfig> {
        (**self).user_config()
    }

    fn save_user_config(&self, config: UserConfig) -> Result<()> {
        (**self).save_user_config(config)
    }
}
