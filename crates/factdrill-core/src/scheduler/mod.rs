//! Review Scheduler Module
//!
//! Continuous-time due-ness scoring over the attempt log.
//!
//! ## Core Formulas:
//! - Desired interval: `I(0) = 10s`, `I(s) = 30s * 3^(s-1)` for `s > 0`
//! - Due score: `elapsed / I(s)`, or `+inf` for a family never tried
//!
//! A score above 1 means the family is overdue. Untried families outrank
//! every tried family. Equal scores are broken by a uniform shuffle taken
//! before the stable sort, so ties come out in a fresh order every batch.

mod batch;
mod interval;

pub use batch::{NewFamilyLimit, introduced_on_day, select_batch, select_capped_batch};
pub use interval::{
    BASE_INTERVAL_MS, FAILED_INTERVAL_MS, INTERVAL_MULTIPLIER, desired_interval, family_score,
    score_from_stats,
};
