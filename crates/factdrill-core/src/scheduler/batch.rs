//! Batch selection
//!
//! Scores every configured family, shuffles, sorts by score descending, and
//! takes the top of the list. An optional daily cap limits how many
//! never-tried families are introduced per UTC day.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};

use super::score_from_stats;
use crate::mastery::{Attempt, derive_family_stats, group_by_family};
use crate::random::{RandomSource, shuffle};

/// Cap on never-tried families introduced per UTC day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NewFamilyLimit {
    /// Untried families always come first
    #[default]
    Unlimited,
    /// At most this many families may see their first attempt per day
    PerDay(usize),
}

impl From<usize> for NewFamilyLimit {
    /// `0` means unlimited, matching the persisted config
    fn from(limit: usize) -> Self {
        if limit == 0 {
            NewFamilyLimit::Unlimited
        } else {
            NewFamilyLimit::PerDay(limit)
        }
    }
}

struct ScoredFamily<'a> {
    id: &'a String,
    score: f64,
    tried: bool,
}

fn utc_day(timestamp_ms: i64) -> Option<NaiveDate> {
    DateTime::<Utc>::from_timestamp_millis(timestamp_ms).map(|dt| dt.date_naive())
}

/// Count families whose first attempt falls on the same UTC day as `now_ms`
pub fn introduced_on_day(attempts: &[Attempt], now_ms: i64) -> usize {
    let Some(today) = utc_day(now_ms) else {
        return 0;
    };

    let mut first_seen: HashMap<&str, i64> = HashMap::new();
    for attempt in attempts {
        first_seen
            .entry(attempt.family_id.as_str())
            .and_modify(|first| *first = (*first).min(attempt.timestamp))
            .or_insert(attempt.timestamp);
    }

    first_seen
        .values()
        .filter(|first| utc_day(**first) == Some(today))
        .count()
}

/// Select up to `batch_size` family ids, most due first.
///
/// Equivalent to [`select_capped_batch`] with [`NewFamilyLimit::Unlimited`].
pub fn select_batch(
    all_family_ids: &[String],
    attempts: &[Attempt],
    batch_size: usize,
    now_ms: i64,
    random: &mut impl RandomSource,
) -> Vec<String> {
    select_capped_batch(
        all_family_ids,
        attempts,
        batch_size,
        now_ms,
        NewFamilyLimit::Unlimited,
        random,
    )
}

/// Select up to `batch_size` family ids under a daily new-family cap.
///
/// Once the cap is spent, untried families are skipped and the remaining
/// slots go to tried families by score. If nothing tried is left the batch
/// comes back short, possibly empty.
pub fn select_capped_batch(
    all_family_ids: &[String],
    attempts: &[Attempt],
    batch_size: usize,
    now_ms: i64,
    limit: NewFamilyLimit,
    random: &mut impl RandomSource,
) -> Vec<String> {
    if all_family_ids.is_empty() || batch_size == 0 {
        return Vec::new();
    }

    let groups = group_by_family(attempts);
    let mut scored: Vec<ScoredFamily<'_>> = all_family_ids
        .iter()
        .map(|id| {
            let stats = groups
                .get(id.as_str())
                .map(|group| derive_family_stats(group.iter().copied()))
                .unwrap_or_default();
            ScoredFamily {
                id,
                score: score_from_stats(&stats, now_ms),
                tried: stats.is_tried(),
            }
        })
        .collect();

    // Shuffle first: the sort is stable, so ties keep this random order
    shuffle(&mut scored, random);
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));

    let mut new_allowance = match limit {
        NewFamilyLimit::Unlimited => usize::MAX,
        NewFamilyLimit::PerDay(cap) => cap.saturating_sub(introduced_on_day(attempts, now_ms)),
    };

    let mut batch = Vec::with_capacity(batch_size.min(scored.len()));
    for family in scored {
        if batch.len() == batch_size {
            break;
        }
        if !family.tried {
            if new_allowance == 0 {
                continue;
            }
            new_allowance -= 1;
        }
        batch.push(family.id.clone());
    }

    tracing::debug!(
        candidates = all_family_ids.len(),
        selected = batch.len(),
        ?limit,
        "Selected review batch"
    );

    batch
}
