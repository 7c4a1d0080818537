//! Submission records and the JSON submission log.
//!
//! A submission pairs one graded answer with who submitted it and when. The
//! log is an append-only list persisted as JSON, standing in for the
//! submissions collection of the hosting application.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::evaluate;
use crate::error::EvaluationError;
use crate::model::{Answer, Exercise, ExerciseType};
use crate::results::ExerciseResult;
use crate::review::ReviewRecord;

/// Where a submission is in the grading workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    /// Scored automatically.
    Graded,
    /// Waiting for a teacher review.
    Pending,
    /// Scored by a teacher.
    Reviewed,
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionStatus::Graded => write!(f, "graded"),
            SubmissionStatus::Pending => write!(f, "pending"),
            SubmissionStatus::Reviewed => write!(f, "reviewed"),
        }
    }
}

/// One graded attempt at an exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: Uuid,
    pub exercise_id: String,
    pub exercise_type: ExerciseType,
    pub student_id: String,
    pub answer: Answer,
    /// The exercise's `points` at grading time.
    pub max_points: u32,
    pub result: ExerciseResult,
    pub status: SubmissionStatus,
    pub submitted_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_spent_secs: Option<u64>,
    /// 1-based attempt number for this student and exercise.
    pub attempt: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review: Option<ReviewRecord>,
}

impl Submission {
    /// Evaluate an answer and wrap the result in a new submission.
    pub fn grade(
        exercise: &Exercise,
        student_id: &str,
        answer: Answer,
    ) -> Result<Self, EvaluationError> {
        let result = evaluate(exercise, &answer)?;
        let status = if result.is_pending() {
            SubmissionStatus::Pending
        } else {
            SubmissionStatus::Graded
        };

        Ok(Self {
            id: Uuid::new_v4(),
            exercise_id: exercise.id.clone(),
            exercise_type: exercise.exercise_type(),
            student_id: student_id.to_string(),
            answer,
            max_points: exercise.points,
            result,
            status,
            submitted_at: Utc::now(),
            time_spent_secs: None,
            attempt: 1,
            review: None,
        })
    }

    pub fn with_attempt(mut self, attempt: u32) -> Self {
        self.attempt = attempt;
        self
    }

    pub fn with_time_spent(mut self, secs: u64) -> Self {
        self.time_spent_secs = Some(secs);
        self
    }

    /// Fraction of the available points earned.
    pub fn ratio(&self) -> f64 {
        self.result.ratio(self.max_points)
    }
}

/// Ordered list of submissions persisted as JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmissionLog {
    #[serde(default)]
    pub submissions: Vec<Submission>,
}

impl SubmissionLog {
    /// Load a log from a JSON file. A missing file is an empty log.
    pub fn load_json(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("no submission log at {}, starting empty", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read submissions from {}", path.display()))?;
        let log: SubmissionLog =
            serde_json::from_str(&content).context("failed to parse submissions JSON")?;
        Ok(log)
    }

    /// Save the log as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize submissions")?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write submissions to {}", path.display()))?;
        Ok(())
    }

    /// Number of earlier attempts by `student_id` on `exercise_id`.
    pub fn attempts_for(&self, exercise_id: &str, student_id: &str) -> u32 {
        self.submissions
            .iter()
            .filter(|s| s.exercise_id == exercise_id && s.student_id == student_id)
            .count() as u32
    }

    /// Grade an answer and append it with the next attempt number.
    pub fn submit(
        &mut self,
        exercise: &Exercise,
        student_id: &str,
        answer: Answer,
        time_spent_secs: Option<u64>,
    ) -> Result<&Submission, EvaluationError> {
        let mut submission = Submission::grade(exercise, student_id, answer)?;
        submission.time_spent_secs = time_spent_secs;
        Ok(self.push(submission))
    }

    /// Append a graded submission, numbering it after the student's earlier
    /// attempts on the same exercise.
    pub fn push(&mut self, submission: Submission) -> &Submission {
        let attempt = self.attempts_for(&submission.exercise_id, &submission.student_id) + 1;
        let submission = submission.with_attempt(attempt);
        tracing::info!(
            submission_id = %submission.id,
            exercise_id = %submission.exercise_id,
            student_id = %submission.student_id,
            attempt,
            status = %submission.status,
            "recorded submission"
        );
        self.submissions.push(submission);
        &self.submissions[self.submissions.len() - 1]
    }

    pub fn get(&self, id: Uuid) -> Option<&Submission> {
        self.submissions.iter().find(|s| s.id == id)
    }

    /// Replace the stored submission with the same id. Returns `false` if no
    /// such submission exists.
    pub fn replace(&mut self, updated: Submission) -> bool {
        match self.submissions.iter_mut().find(|s| s.id == updated.id) {
            Some(slot) => {
                *slot = updated;
                true
            }
            None => false,
        }
    }
}
