//! Teacher reviews.
//!
//! Free-writing answers come back from the engine as pending. A teacher later
//! supplies the score and feedback; applying the review produces a new
//! submission and leaves the original result untouched.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::round_to_tenth;
use crate::error::ReviewError;
use crate::results::{ExerciseResult, ResultDetails};
use crate::submission::{Submission, SubmissionStatus};

/// What a teacher enters when grading a submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub score: f64,
    pub feedback: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
    /// Per-criterion scores, informational only.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub rubric_scores: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub text: String,
    pub kind: AnnotationKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationKind {
    Correction,
    Suggestion,
    Praise,
}

/// A review as stored on the submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRecord {
    pub reviewer_id: String,
    pub reviewed_at: DateTime<Utc>,
    #[serde(flatten)]
    pub review: Review,
}

impl Submission {
    /// Apply a teacher review, returning the reviewed submission.
    pub fn apply_review(&self, mut review: Review, reviewer_id: &str) -> Result<Submission, ReviewError> {
        if self.status == SubmissionStatus::Reviewed {
            return Err(ReviewError::AlreadyReviewed(self.id.to_string()));
        }
        if !review.score.is_finite() || review.score < 0.0 || review.score > self.max_points as f64 {
            return Err(ReviewError::ScoreOutOfRange {
                score: review.score,
                points: self.max_points,
            });
        }
        review.feedback = review.feedback.trim().to_string();
        if review.feedback.is_empty() {
            return Err(ReviewError::EmptyFeedback);
        }

        let score = round_to_tenth(review.score);
        let result = ExerciseResult {
            correct: score >= self.max_points as f64,
            score,
            details: ResultDetails {
                pending: None,
                ..self.result.details.clone()
            },
            feedback: Some(review.feedback.clone()),
        };

        tracing::info!(
            submission_id = %self.id,
            reviewer = reviewer_id,
            score,
            "applied review"
        );

        Ok(Submission {
            result,
            status: SubmissionStatus::Reviewed,
            review: Some(ReviewRecord {
                reviewer_id: reviewer_id.to_string(),
                reviewed_at: Utc::now(),
                review,
            }),
            ..self.clone()
        })
    }
}

/// Submissions waiting for a teacher, newest first.
pub fn pending_reviews(submissions: &[Submission]) -> Vec<&Submission> {
    let mut pending: Vec<&Submission> = submissions
        .iter()
        .filter(|s| s.status == SubmissionStatus::Pending)
        .collect();
    pending.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
    pending
}
