//! Mastery overview for stats displays
//!
//! Summarizes every configured family into a level and a due score, plus
//! totals across the whole log.

use serde::{Deserialize, Serialize};

use super::{Attempt, FamilyStats, derive_family_stats, group_by_family};
use crate::facts::FactFamily;
use crate::scheduler::score_from_stats;

/// Effective successes at which every format tier is unlocked
pub const MASTERED_THRESHOLD: u32 = 6;

/// Coarse mastery bucket for a family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MasteryLevel {
    /// Never attempted
    Untried,
    /// Most recent attempt was wrong
    Struggling,
    /// On a streak, not all formats unlocked yet
    Learning,
    /// Streak reaches the hardest tier
    Mastered,
}

impl MasteryLevel {
    /// Classify derived stats
    pub fn from_stats(stats: &FamilyStats) -> Self {
        if !stats.is_tried() {
            MasteryLevel::Untried
        } else if stats.effective_successes == 0 {
            MasteryLevel::Struggling
        } else if stats.effective_successes < MASTERED_THRESHOLD {
            MasteryLevel::Learning
        } else {
            MasteryLevel::Mastered
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MasteryLevel::Untried => "untried",
            MasteryLevel::Struggling => "struggling",
            MasteryLevel::Learning => "learning",
            MasteryLevel::Mastered => "mastered",
        }
    }
}

impl std::fmt::Display for MasteryLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One row of the report
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyMastery {
    pub family_id: String,
    pub stats: FamilyStats,
    pub level: MasteryLevel,
    /// Due score at report time (infinite for untried families)
    pub score: f64,
}

/// Mastery summary across a set of families
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MasteryReport {
    /// One row per family, in the order the families were given
    pub families: Vec<FamilyMastery>,
    pub untried: usize,
    pub struggling: usize,
    pub learning: usize,
    pub mastered: usize,
    /// Tried families with a due score of at least 1
    pub due: usize,
    /// Attempts in the whole log, including families outside this report
    pub total_attempts: usize,
    pub correct_attempts: usize,
}

impl MasteryReport {
    /// Build a report for `families` from the full attempt log at `now_ms`
    pub fn from_attempts(families: &[FactFamily], attempts: &[Attempt], now_ms: i64) -> Self {
        let groups = group_by_family(attempts);
        let mut report = MasteryReport {
            total_attempts: attempts.len(),
            correct_attempts: attempts.iter().filter(|a| a.correct).count(),
            ..Default::default()
        };

        for family in families {
            let id = family.id();
            let stats = groups
                .get(id.as_str())
                .map(|group| derive_family_stats(group.iter().copied()))
                .unwrap_or_default();
            let level = MasteryLevel::from_stats(&stats);
            let score = score_from_stats(&stats, now_ms);

            match level {
                MasteryLevel::Untried => report.untried += 1,
                MasteryLevel::Struggling => report.struggling += 1,
                MasteryLevel::Learning => report.learning += 1,
                MasteryLevel::Mastered => report.mastered += 1,
            }
            if stats.is_tried() && score >= 1.0 {
                report.due += 1;
            }

            report.families.push(FamilyMastery {
                family_id: id,
                stats,
                level,
                score,
            });
        }

        report
    }

    /// Fraction of attempts answered correctly (0 with an empty log)
    pub fn accuracy(&self) -> f64 {
        if self.total_attempts == 0 {
            0.0
        } else {
            self.correct_attempts as f64 / self.total_attempts as f64
        }
    }

    /// Look up a family's row
    pub fn family(&self, family_id: &str) -> Option<&FamilyMastery> {
        self.families.iter().find(|row| row.family_id == family_id)
    }
}
