//! The `tutorgrade grade` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use tutorgrade_core::model::{Answer, Exercise};
use tutorgrade_core::parser::load_exercise_sets;
use tutorgrade_core::results::ExerciseResult;
use tutorgrade_core::submission::{Submission, SubmissionLog};

use crate::config::{load_config_from, OutputFormat};

pub struct GradeArgs {
    pub exercise_set: PathBuf,
    pub exercise: String,
    pub answer: String,
    pub student: Option<String>,
    pub time_spent: Option<u64>,
    pub record: bool,
    pub format: Option<OutputFormat>,
    pub config: Option<PathBuf>,
}

pub fn execute(args: GradeArgs) -> Result<()> {
    let config = load_config_from(args.config.as_deref())?;
    let sets = load_exercise_sets(&args.exercise_set)?;

    let exercise = sets
        .iter()
        .find_map(|set| set.exercise(&args.exercise))
        .with_context(|| {
            format!(
                "exercise '{}' not found in {}",
                args.exercise,
                args.exercise_set.display()
            )
        })?;

    let raw: serde_json::Value =
        serde_json::from_str(&args.answer).context("answer is not valid JSON")?;
    let answer = Answer::from_json(exercise.exercise_type(), raw)?;
    let student = args.student.unwrap_or(config.default_student);

    let mut submission = Submission::grade(exercise, &student, answer)?;
    submission.time_spent_secs = args.time_spent;

    if args.record {
        let mut log = SubmissionLog::load_json(&config.submissions_path)?;
        submission = log.push(submission).clone();
        log.save_json(&config.submissions_path)?;
    }

    match args.format.unwrap_or(config.output_format) {
        OutputFormat::Json => {
            if args.record {
                println!("{}", serde_json::to_string_pretty(&submission)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&submission.result)?);
            }
        }
        OutputFormat::Text => {
            print_result(exercise, &submission.result);
            if args.record {
                println!(
                    "\nRecorded submission {} (attempt {}, {})",
                    submission.id, submission.attempt, submission.status
                );
            }
        }
    }

    Ok(())
}

fn print_result(exercise: &Exercise, result: &ExerciseResult) {
    println!("Exercise: {} ({})", exercise.id, exercise.exercise_type());
    println!("Score: {}/{}", result.score, exercise.points);
    if result.is_pending() {
        println!("Status: pending review");
    } else {
        println!(
            "Correct: {} ({}/{})",
            if result.correct { "yes" } else { "no" },
            result.details.correct_answers,
            result.details.total_questions
        );
    }
    if let Some(feedback) = &result.feedback {
        println!("Feedback: {feedback}");
    }
    if let Some(items) = result.details.incorrect_items.as_ref().filter(|i| !i.is_empty()) {
        println!("Incorrect: {}", items.join(", "));
    }
    if let Some(suggestions) = result.details.suggestions.as_ref().filter(|s| !s.is_empty()) {
        println!("Suggestions:");
        for s in suggestions {
            println!("  - {s}");
        }
    }
}
