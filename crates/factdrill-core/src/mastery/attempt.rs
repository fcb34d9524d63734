//! Attempt - one answered question in the append-only log

use serde::{Deserialize, Serialize};

use crate::quiz::QuizFormat;

/// A single answered question.
///
/// Attempts are immutable facts. The log of attempts is the only record of
/// mastery; everything else is derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attempt {
    /// Family the question belonged to
    pub family_id: String,
    /// Format the question was asked in
    pub format: QuizFormat,
    /// When the answer was submitted (epoch milliseconds)
    pub timestamp: i64,
    /// Whether the answer was right
    pub correct: bool,
}

impl Attempt {
    /// Create a new attempt
    pub fn new(family_id: impl Into<String>, format: QuizFormat, correct: bool, now_ms: i64) -> Self {
        Self {
            family_id: family_id.into(),
            format,
            timestamp: now_ms,
            correct,
        }
    }
}
