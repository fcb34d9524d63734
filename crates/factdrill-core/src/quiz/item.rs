//! Rendering a family and format into a prompt/answer pair

use serde::{Deserialize, Serialize};

use super::QuizFormat;
use crate::facts::FactFamily;
use crate::random::RandomSource;

/// A rendered question ready for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizItem {
    /// Text shown to the student, e.g. `"15 ÷ ? = 5"`
    pub prompt: String,
    /// The number that fills the `?`
    pub answer: u32,
    /// Family the question was drawn from
    pub family_id: String,
    /// Which value the prompt hides
    pub format: QuizFormat,
}

/// Rejected answer input
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnswerError {
    #[error("'{0}' is not a whole number")]
    NotANumber(String),
}

impl QuizItem {
    /// Check typed input against the answer.
    ///
    /// Whitespace is ignored; anything that is not a non-negative integer is
    /// an error rather than a wrong answer.
    pub fn check(&self, input: &str) -> Result<bool, AnswerError> {
        let trimmed = input.trim();
        let value: u32 = trimmed
            .parse()
            .map_err(|_| AnswerError::NotANumber(trimmed.to_string()))?;
        Ok(value == self.answer)
    }
}

/// Pick which factor to show, returning `(shown, hidden)`.
///
/// Squares have nothing to choose between and do not consume a roll.
fn pick_factor(family: &FactFamily, random: &mut impl RandomSource) -> (u32, u32) {
    if family.is_square() || random.next_unit() < 0.5 {
        (family.factor1(), family.factor2())
    } else {
        (family.factor2(), family.factor1())
    }
}

/// Render `family` in `format`.
pub fn render_quiz_item(
    family: &FactFamily,
    format: QuizFormat,
    random: &mut impl RandomSource,
) -> QuizItem {
    let product = family.product();
    let (prompt, answer) = match format {
        QuizFormat::Mul => (
            format!("{} × {} = ?", family.factor1(), family.factor2()),
            product,
        ),
        QuizFormat::MulMiss => {
            let (shown, hidden) = pick_factor(family, random);
            (format!("{} × ? = {}", shown, product), hidden)
        }
        QuizFormat::Div => {
            let (divisor, quotient) = pick_factor(family, random);
            (format!("{} ÷ {} = ?", product, divisor), quotient)
        }
        QuizFormat::DivMissDivisor => {
            let (quotient, divisor) = pick_factor(family, random);
            (format!("{} ÷ ? = {}", product, quotient), divisor)
        }
        QuizFormat::DivMissDividend => {
            let (divisor, quotient) = pick_factor(family, random);
            (format!("? ÷ {} = {}", divisor, quotient), product)
        }
    };

    QuizItem {
        prompt,
        answer,
        family_id: family.id(),
        format,
    }
}
