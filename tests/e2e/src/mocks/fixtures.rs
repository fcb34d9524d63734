//! Test Data Factory
//!
//! Builds attempt logs for journey tests:
//! - Single attempts and correct streaks
//! - Configs for common drill setups
//! - Fixed instants on known UTC days

use chrono::{TimeZone, Utc};
use factdrill_core::{Attempt, QuizFormat, QuizItem, UserConfig};

/// Factory for creating test data
pub struct TestDataFactory;

impl TestDataFactory {
    /// Noon UTC on the given date, in epoch milliseconds
    pub fn noon(year: i32, month: u32, day: u32) -> i64 {
        Utc.with_ymd_and_hms(year, month, day, 12, 0, 0)
            .single()
            .expect("valid date")
            .timestamp_millis()
    }

    /// Config drilling `tables` with `formats`, no daily cap
    pub fn config(tables: &[u32], formats: &[QuizFormat]) -> UserConfig {
        UserConfig {
            selected_tables: tables.iter().copied().collect(),
            enabled_formats: formats.iter().copied().collect(),
            daily_new_family_limit: 0,
        }
    }

    /// Same as [`Self::config`] with a daily new-family cap
    pub fn capped_config(tables: &[u32], formats: &[QuizFormat], limit: usize) -> UserConfig {
        UserConfig {
            daily_new_family_limit: limit,
            ..Self::config(tables, formats)
        }
    }

    /// One correct attempt per format, `step_ms` apart, ending at `end_ms`
    pub fn streak(family_id: &str, formats: &[QuizFormat], end_ms: i64, step_ms: i64) -> Vec<Attempt> {
        let count = formats.len() as i64;
        formats
            .iter()
            .enumerate()
            .map(|(i, format)| {
                let timestamp = end_ms - (count - 1 - i as i64) * step_ms;
                Attempt::new(family_id, *format, true, timestamp)
            })
            .collect()
    }

    /// Correct attempts that reach the mastered tier (weight 6)
    pub fn mastered(family_id: &str, end_ms: i64) -> Vec<Attempt> {
        Self::streak(
            family_id,
            &[QuizFormat::DivMissDivisor, QuizFormat::DivMissDividend],
            end_ms,
            1_000,
        )
    }

    /// The answer a student who always gets it right would type
    pub fn right_answer(item: &QuizItem) -> String {
        item.answer.to_string()
    }

    /// An answer that is always wrong
    pub fn wrong_answer(item: &QuizItem) -> String {
        (item.answer + 1).to_string()
    }
}
