//! Evaluation result types.

use serde::{Deserialize, Serialize};

/// The outcome of grading one answer.
///
/// Built once per evaluation and handed to the caller; nothing in this crate
/// mutates a result after returning it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseResult {
    /// `true` only for a fully correct answer.
    pub correct: bool,
    /// Points earned, `0..=points`, rounded to one decimal place.
    pub score: f64,
    pub details: ResultDetails,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

impl ExerciseResult {
    /// Fraction of `points` earned, or 0 when `points` is 0.
    pub fn ratio(&self, points: u32) -> f64 {
        if points == 0 {
            0.0
        } else {
            self.score / points as f64
        }
    }

    /// Whether the result is waiting for a teacher.
    pub fn is_pending(&self) -> bool {
        self.details.pending.unwrap_or(false)
    }
}

/// Structured breakdown of a result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultDetails {
    /// Units answered correctly (options, blanks, pairs, positions).
    pub correct_answers: u32,
    /// Units that could be answered.
    pub total_questions: u32,
    /// Ids (or positions) of the units answered incorrectly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incorrect_items: Option<Vec<String>>,
    /// Reference answers or writing notes surfaced to the student.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending: Option<bool>,
}
