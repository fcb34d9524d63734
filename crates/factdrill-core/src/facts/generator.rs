//! Fact family generation from the selected times tables.

use std::collections::HashSet;

use super::FactFamily;

/// Smallest table a user can select
pub const MIN_TABLE: u32 = 1;

/// Largest table a user can select
pub const MAX_TABLE: u32 = 10;

/// Each table runs `t × 1` through `t × MAX_MULTIPLIER`
pub const MAX_MULTIPLIER: u32 = 10;

/// Generate the deduplicated families for the selected tables.
///
/// Tables are visited in iteration order and multipliers in `1..=10`. A family
/// shared between tables (`2x3` for tables 2 and 3) keeps the position where
/// it was first produced.
pub fn generate_fact_families<I>(selected_tables: I) -> Vec<FactFamily>
where
    I: IntoIterator<Item = u32>,
{
    let mut seen = HashSet::new();
    let mut families = Vec::new();

    for table in selected_tables {
        for multiplier in 1..=MAX_MULTIPLIER {
            let family = FactFamily::new(table, multiplier);
            if seen.insert(family) {
                families.push(family);
            }
        }
    }

    families
}
