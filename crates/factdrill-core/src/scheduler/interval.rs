//! Interval and due-score functions

use crate::mastery::{Attempt, FamilyStats, derive_family_stats};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Re-drill delay after a miss (or before any success)
pub const FAILED_INTERVAL_MS: f64 = 10_000.0;

/// Interval after the first effective success
pub const BASE_INTERVAL_MS: f64 = 30_000.0;

/// Geometric growth per additional effective success
pub const INTERVAL_MULTIPLIER: f64 = 3.0;

// ============================================================================
// FUNCTIONS
// ============================================================================

/// Desired review interval in milliseconds for `effective_successes`.
///
/// Returned as `f64`: long streaks push `3^(s-1)` past any integer range and
/// the value only ever feeds a ratio.
pub fn desired_interval(effective_successes: u32) -> f64 {
    if effective_successes == 0 {
        return FAILED_INTERVAL_MS;
    }
    let exponent = i32::try_from(effective_successes - 1).unwrap_or(i32::MAX);
    BASE_INTERVAL_MS * INTERVAL_MULTIPLIER.powi(exponent)
}

/// Due score from already-derived stats
pub fn score_from_stats(stats: &FamilyStats, now_ms: i64) -> f64 {
    if !stats.is_tried() {
        return f64::INFINITY;
    }
    let elapsed = (now_ms - stats.last_tried_time) as f64;
    elapsed / desired_interval(stats.effective_successes)
}

/// Due score for one family's chronological attempts
pub fn family_score<'a, I>(attempts: I, now_ms: i64) -> f64
where
    I: IntoIterator<Item = &'a Attempt>,
    I::IntoIter: DoubleEndedIterator,
{
    score_from_stats(&derive_family_stats(attempts), now_ms)
}
