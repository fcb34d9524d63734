//! Quiz formats and their difficulty weights

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Which value of a fact family a prompt hides.
///
/// Ordered easiest to hardest; the derive of `Ord` follows that order so
/// format sets iterate predictably.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuizFormat {
    /// `3 × 5 = ?`
    Mul,
    /// `3 × ? = 15`
    MulMiss,
    /// `15 ÷ 3 = ?`
    Div,
    /// `15 ÷ ? = 5`
    DivMissDivisor,
    /// `? ÷ 3 = 5`
    DivMissDividend,
}

impl QuizFormat {
    /// Every format, easiest first
    pub const ALL: [QuizFormat; 5] = [
        QuizFormat::Mul,
        QuizFormat::MulMiss,
        QuizFormat::Div,
        QuizFormat::DivMissDivisor,
        QuizFormat::DivMissDividend,
    ];

    /// Mastery credit for a correct answer in this format
    pub fn weight(&self) -> u32 {
        match self {
            QuizFormat::Mul => 1,
            QuizFormat::MulMiss | QuizFormat::Div => 2,
            QuizFormat::DivMissDivisor | QuizFormat::DivMissDividend => 3,
        }
    }

    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            QuizFormat::Mul => "MUL",
            QuizFormat::MulMiss => "MUL_MISS",
            QuizFormat::Div => "DIV",
            QuizFormat::DivMissDivisor => "DIV_MISS_DIVISOR",
            QuizFormat::DivMissDividend => "DIV_MISS_DIVIDEND",
        }
    }
}

impl std::fmt::Display for QuizFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Unknown format name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown quiz format: {0}")]
pub struct ParseFormatError(pub String);

impl FromStr for QuizFormat {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "MUL" => Ok(QuizFormat::Mul),
            "MUL_MISS" => Ok(QuizFormat::MulMiss),
            "DIV" => Ok(QuizFormat::Div),
            "DIV_MISS_DIVISOR" => Ok(QuizFormat::DivMissDivisor),
            "DIV_MISS_DIVIDEND" => Ok(QuizFormat::DivMissDividend),
            _ => Err(ParseFormatError(s.to_string())),
        }
    }
}
