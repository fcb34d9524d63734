//! Quiz module - formats, difficulty selection, and rendering
//!
//! - Five presentation formats with fixed difficulty weights
//! - Mastery-weighted format selection (smooth difficulty ramp)
//! - Prompt/answer rendering with a random choice of shown factor

mod difficulty;
mod format;
mod item;

pub use difficulty::{
    FORMAT_TIERS, FormatTier, UNQUALIFIED_WEIGHT, format_weights, select_format_for_mastery,
};
pub use format::{ParseFormatError, QuizFormat};
pub use item::{AnswerError, QuizItem, render_quiz_item};
