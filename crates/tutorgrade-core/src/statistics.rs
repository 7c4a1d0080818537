//! Student progress statistics over a set of submissions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::engine::round_to_tenth;
use crate::model::ExerciseType;
use crate::submission::{Submission, SubmissionStatus};

/// Progress grouped by student and by exercise.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgressReport {
    pub per_student: BTreeMap<String, StudentStats>,
    pub per_exercise: BTreeMap<String, ExerciseStats>,
}

/// Statistics for one student across all their submissions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentStats {
    pub student_id: String,
    /// Total submissions.
    pub attempts: usize,
    /// Submissions scored by the engine.
    pub graded: usize,
    /// Submissions waiting for review.
    pub pending: usize,
    /// Submissions scored by a teacher.
    pub reviewed: usize,
    /// Scored submissions that were fully correct.
    pub perfect: usize,
    /// Mean earned fraction over scored submissions.
    pub average_ratio: f64,
    /// Sum of scored points, rounded to one decimal place.
    pub points_earned: f64,
    pub points_possible: u64,
}

/// Statistics for one exercise across all students.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseStats {
    pub exercise_id: String,
    pub exercise_type: ExerciseType,
    pub attempts: usize,
    /// Attempts with a score (graded or reviewed).
    pub scored: usize,
    pub average_ratio: f64,
    /// Share of scored attempts that were fully correct.
    pub correct_rate: f64,
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn is_scored(s: &Submission) -> bool {
    s.status != SubmissionStatus::Pending
}

/// Compute progress statistics. Pending submissions count as attempts but
/// are left out of every average.
pub fn compute_progress(submissions: &[Submission]) -> ProgressReport {
    let mut by_student: BTreeMap<&str, Vec<&Submission>> = BTreeMap::new();
    let mut by_exercise: BTreeMap<&str, Vec<&Submission>> = BTreeMap::new();
    for s in submissions {
        by_student.entry(&s.student_id).or_default().push(s);
        by_exercise.entry(&s.exercise_id).or_default().push(s);
    }

    let per_student = by_student
        .into_iter()
        .map(|(student_id, subs)| {
            let count = |status: SubmissionStatus| subs.iter().filter(|s| s.status == status).count();
            let scored: Vec<&&Submission> = subs.iter().filter(|s| is_scored(s)).collect();
            let ratios: Vec<f64> = scored.iter().map(|s| s.ratio()).collect();

            let stats = StudentStats {
                student_id: student_id.to_string(),
                attempts: subs.len(),
                graded: count(SubmissionStatus::Graded),
                pending: count(SubmissionStatus::Pending),
                reviewed: count(SubmissionStatus::Reviewed),
                perfect: scored.iter().filter(|s| s.result.correct).count(),
                average_ratio: mean(&ratios),
                points_earned: round_to_tenth(scored.iter().map(|s| s.result.score).sum()),
                points_possible: scored.iter().map(|s| s.max_points as u64).sum(),
            };
            (student_id.to_string(), stats)
        })
        .collect();

    let per_exercise = by_exercise
        .into_iter()
        .map(|(exercise_id, subs)| {
            let scored: Vec<&&Submission> = subs.iter().filter(|s| is_scored(s)).collect();
            let ratios: Vec<f64> = scored.iter().map(|s| s.ratio()).collect();
            let correct = scored.iter().filter(|s| s.result.correct).count();

            let stats = ExerciseStats {
                exercise_id: exercise_id.to_string(),
                exercise_type: subs[0].exercise_type,
                attempts: subs.len(),
                scored: scored.len(),
                average_ratio: mean(&ratios),
                correct_rate: if scored.is_empty() {
                    0.0
                } else {
                    correct as f64 / scored.len() as f64
                },
            };
            (exercise_id.to_string(), stats)
        })
        .collect();

    ProgressReport {
        per_student,
        per_exercise,
    }
}
