//! Evaluation and review error types.
//!
//! A wrong answer is never an error: it is an `ExerciseResult` with a low
//! score. These errors describe inputs the engine cannot grade at all.

use thiserror::Error;

use crate::model::ExerciseType;

/// Errors raised while decoding or evaluating an exercise.
#[derive(Debug, Error, PartialEq)]
pub enum EvaluationError {
    /// The record's `type` tag is not one of the known exercise types.
    #[error("unsupported exercise type: {0}")]
    UnsupportedExerciseType(String),

    /// The answer does not have the shape the exercise type expects.
    #[error("answer for {exercise_type} exercise must be {expected}")]
    AnswerShapeMismatch {
        exercise_type: ExerciseType,
        expected: &'static str,
    },

    /// A raw exercise or answer record could not be decoded.
    #[error("invalid record: {0}")]
    InvalidRecord(String),
}

impl EvaluationError {
    /// Returns `true` if the error stems from bad input supplied by the caller.
    ///
    /// Evaluation has no I/O, so every variant is a caller error and retrying
    /// the same input can never succeed.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            EvaluationError::UnsupportedExerciseType(_)
                | EvaluationError::AnswerShapeMismatch { .. }
                | EvaluationError::InvalidRecord(_)
        )
    }
}

/// Errors raised when a teacher review cannot be applied to a submission.
#[derive(Debug, Error, PartialEq)]
pub enum ReviewError {
    /// The review score is outside `0..=points` or not a finite number.
    #[error("review score {score} is outside 0..={points}")]
    ScoreOutOfRange { score: f64, points: u32 },

    /// The review feedback is blank.
    #[error("review feedback must not be empty")]
    EmptyFeedback,

    /// The submission was already reviewed.
    #[error("submission {0} has already been reviewed")]
    AlreadyReviewed(String),
}
