//! # factdrill Core
//!
//! Spaced-repetition engine for multiplication and division fact drills.
//!
//! - **Fact families**: `3x5` covers `3 × 5`, `5 × 3`, `15 ÷ 3`, `15 ÷ 5`
//! - **Mastery tracking**: a difficulty-weighted streak derived from an
//!   append-only attempt log
//! - **Continuous-time scheduling**: due score `elapsed / interval` with a
//!   geometric interval ladder
//! - **Difficulty selection**: harder formats unlock as the streak grows
//! - **Quiz session**: batches of ten families, re-scored between batches
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use factdrill_core::{Session, SqliteStorage};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Opens (or creates) the store in the platform data directory
//! let storage = SqliteStorage::new(None)?;
//! let mut session = Session::new(storage);
//! session.initialize()?;
//!
//! if let Some(item) = session.next_item()? {
//!     println!("{}", item.prompt);
//!     let correct = item.check("15")?;
//!     session.submit_answer(&item.family_id, item.format, correct)?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - `bundled-sqlite` (default): build SQLite from source via rusqlite

#![warn(rustdoc::missing_crate_level_docs)]

// ============================================================================
// MODULES
// ============================================================================

pub mod clock;
pub mod config;
pub mod error;
pub mod facts;
pub mod mastery;
pub mod quiz;
pub mod random;
pub mod scheduler;
pub mod session;
pub mod storage;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{DEFAULT_TABLES, UserConfig};
pub use error::{EngineError, Result};

// Fact model
pub use facts::{
    FactFamily, MAX_MULTIPLIER, MAX_TABLE, MIN_TABLE, ParseFamilyIdError, create_fact_family,
    generate_fact_families,
};

// Mastery tracker
pub use mastery::{
    Attempt, FamilyMastery, FamilyStats, MASTERED_THRESHOLD, MasteryLevel, MasteryReport,
    derive_family_stats, group_by_family,
};

// Formats, difficulty, rendering
pub use quiz::{
    AnswerError, FORMAT_TIERS, FormatTier, ParseFormatError, QuizFormat, QuizItem,
    UNQUALIFIED_WEIGHT, format_weights, render_quiz_item, select_format_for_mastery,
};

pub use random::{FixedRoll, RandomSource, shuffle, system_source};

// Scheduler
pub use scheduler::{
    BASE_INTERVAL_MS, FAILED_INTERVAL_MS, INTERVAL_MULTIPLIER, NewFamilyLimit, desired_interval,
    family_score, introduced_on_day, score_from_stats, select_batch, select_capped_batch,
};

pub use session::{BATCH_SIZE, Session, SessionConfig};
pub use storage::{MemoryStorage, SqliteStorage, Storage, StorageError};

// ============================================================================
// VERSION INFO
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// PRELUDE
// ============================================================================

/// Convenient imports for common usage
pub mod prelude {
    pub use crate::{
        Attempt, Clock, EngineError, FactFamily, MasteryReport, MemoryStorage, QuizFormat,
        QuizItem, RandomSource, Result, Session, SessionConfig, SqliteStorage, Storage,
        StorageError, UserConfig,
    };
}
