//! Mastery Tracker
//!
//! Turns the attempt log into per-family mastery signals:
//! - Attempts: the append-only event log
//! - Family stats: last tried time and difficulty-weighted current streak
//! - Mastery report: level buckets and due counts for stats displays

mod attempt;
mod report;
mod stats;

pub use attempt::Attempt;
pub use report::{FamilyMastery, MASTERED_THRESHOLD, MasteryLevel, MasteryReport};
pub use stats::{FamilyStats, derive_family_stats, group_by_family};
