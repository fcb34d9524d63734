//! Fact Model
//!
//! A fact family is an unordered factor pair plus its product, the unit that
//! mastery is tracked against. `3 × 5`, `5 × 3`, `15 ÷ 3` and `15 ÷ 5` all
//! belong to the family `3x5`.

mod family;
mod generator;

pub use family::{FactFamily, ParseFamilyIdError, create_fact_family};
pub use generator::{MAX_MULTIPLIER, MAX_TABLE, MIN_TABLE, generate_fact_families};
