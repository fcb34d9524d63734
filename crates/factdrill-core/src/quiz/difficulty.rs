//! # Difficulty Selector
//!
//! Chooses which format to present for a family, leaning toward harder
//! formats as the family's effective successes grow.
//!
//! Formats are grouped into tiers, each with a minimum number of effective
//! successes. A qualifying format is weighted by how far the student is past
//! the tier's minimum; a non-qualifying format keeps a small constant weight
//! so harder formats still show up occasionally before they "unlock". One
//! uniform roll against the cumulative weights picks the winner.
//!
//! | Tier | Min successes | Formats                                |
//! |------|---------------|----------------------------------------|
//! | 1    | 6             | `DIV_MISS_DIVISOR`, `DIV_MISS_DIVIDEND` |
//! | 2    | 4             | `DIV`                                  |
//! | 3    | 2             | `MUL_MISS`                             |
//! | 4    | 0             | `MUL`                                  |

use std::collections::BTreeSet;

use super::QuizFormat;
use crate::random::RandomSource;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Weight given to a format whose tier the student has not reached yet
pub const UNQUALIFIED_WEIGHT: f64 = 0.1;

/// A group of formats unlocked at the same mastery level
#[derive(Debug, Clone, Copy)]
pub struct FormatTier {
    /// Effective successes needed to qualify
    pub min_successes: u32,
    /// Formats in this tier
    pub formats: &'static [QuizFormat],
}

/// Tiers, hardest first. The draw walks them in this order.
pub const FORMAT_TIERS: [FormatTier; 4] = [
    FormatTier {
        min_successes: 6,
        formats: &[QuizFormat::DivMissDivisor, QuizFormat::DivMissDividend],
    },
    FormatTier {
        min_successes: 4,
        formats: &[QuizFormat::Div],
    },
    FormatTier {
        min_successes: 2,
        formats: &[QuizFormat::MulMiss],
    },
    FormatTier {
        min_successes: 0,
        formats: &[QuizFormat::Mul],
    },
];

// ============================================================================
// SELECTION
// ============================================================================

/// Draw weights for every enabled format, in tier order.
pub fn format_weights(
    effective_successes: u32,
    enabled_formats: &BTreeSet<QuizFormat>,
) -> Vec<(QuizFormat, f64)> {
    let mut weighted = Vec::with_capacity(QuizFormat::ALL.len());

    for tier in &FORMAT_TIERS {
        for format in tier.formats {
            if !enabled_formats.contains(format) {
                continue;
            }
            let weight = if effective_successes >= tier.min_successes {
                1.0 + f64::from(effective_successes - tier.min_successes)
            } else {
                UNQUALIFIED_WEIGHT
            };
            weighted.push((*format, weight));
        }
    }

    weighted
}

/// Pick a format for a family with the given effective successes.
///
/// With no formats enabled this falls back to `MUL`, which every family can
/// render.
pub fn select_format_for_mastery(
    effective_successes: u32,
    enabled_formats: &BTreeSet<QuizFormat>,
    random: &mut impl RandomSource,
) -> QuizFormat {
    let weighted = format_weights(effective_successes, enabled_formats);

    let Some(&(last, _)) = weighted.last() else {
        tracing::warn!("No quiz formats enabled, falling back to MUL");
        return QuizFormat::Mul;
    };

    let total: f64 = weighted.iter().map(|(_, w)| w).sum();
    let mut roll = random.next_unit() * total;
    for (format, weight) in &weighted {
        roll -= weight;
        if roll <= 0.0 {
            return *format;
        }
    }

    // Float drift on a roll just under 1.0
    last
}
