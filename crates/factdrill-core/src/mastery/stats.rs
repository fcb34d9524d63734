//! Family statistics derived from the attempt log

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::Attempt;

/// Mastery signal for one family, recomputed from its attempts on demand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyStats {
    /// Timestamp of the most recent attempt (0 = never tried)
    pub last_tried_time: i64,
    /// Difficulty-weighted length of the current correct streak
    pub effective_successes: u32,
}

impl FamilyStats {
    /// Whether the family has any attempts
    pub fn is_tried(&self) -> bool {
        self.last_tried_time != 0
    }
}

/// Derive stats from one family's attempts in chronological order.
///
/// `effective_successes` sums the format weights of the trailing run of
/// correct attempts. A single miss at the end resets it to zero no matter
/// how long the earlier streak was.
pub fn derive_family_stats<'a, I>(attempts: I) -> FamilyStats
where
    I: IntoIterator<Item = &'a Attempt>,
    I::IntoIter: DoubleEndedIterator,
{
    let mut newest_first = attempts.into_iter().rev().peekable();

    let Some(last) = newest_first.peek() else {
        return FamilyStats::default();
    };
    let last_tried_time = last.timestamp;

    let effective_successes = newest_first
        .take_while(|attempt| attempt.correct)
        .map(|attempt| attempt.format.weight())
        .sum();

    FamilyStats {
        last_tried_time,
        effective_successes,
    }
}

/// Partition a log by family id, keeping chronological order within each family
pub fn group_by_family(attempts: &[Attempt]) -> HashMap<&str, Vec<&Attempt>> {
    let mut groups: HashMap<&str, Vec<&Attempt>> = HashMap::new();
    for attempt in attempts {
        groups.entry(attempt.family_id.as_str()).or_default().push(attempt);
    }
    groups
}
