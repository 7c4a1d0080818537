//! The `tutorgrade stats` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use tutorgrade_core::statistics::{compute_progress, ProgressReport};
use tutorgrade_core::submission::SubmissionLog;

use crate::config::{load_config_from, OutputFormat};

pub fn execute(format: Option<OutputFormat>, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let log = SubmissionLog::load_json(&config.submissions_path)?;
    let report = compute_progress(&log.submissions);

    match format.unwrap_or(config.output_format) {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            if log.submissions.is_empty() {
                println!("No submissions recorded.");
            } else {
                print_tables(&report);
            }
        }
    }

    Ok(())
}

fn print_tables(report: &ProgressReport) {
    let mut students = Table::new();
    students.set_header(vec![
        "Student", "Attempts", "Graded", "Pending", "Reviewed", "Perfect", "Average", "Points",
    ]);
    for (student, stats) in &report.per_student {
        students.add_row(vec![
            Cell::new(student),
            Cell::new(stats.attempts),
            Cell::new(stats.graded),
            Cell::new(stats.pending),
            Cell::new(stats.reviewed),
            Cell::new(stats.perfect),
            Cell::new(format!("{:.1}%", stats.average_ratio * 100.0)),
            Cell::new(format!("{}/{}", stats.points_earned, stats.points_possible)),
        ]);
    }

    let mut exercises = Table::new();
    exercises.set_header(vec!["Exercise", "Type", "Attempts", "Scored", "Average", "Correct %"]);
    for (exercise, stats) in &report.per_exercise {
        exercises.add_row(vec![
            Cell::new(exercise),
            Cell::new(stats.exercise_type),
            Cell::new(stats.attempts),
            Cell::new(stats.scored),
            Cell::new(format!("{:.1}%", stats.average_ratio * 100.0)),
            Cell::new(format!("{:.1}%", stats.correct_rate * 100.0)),
        ]);
    }

    println!("Students\n{students}");
    println!("\nExercises\n{exercises}");
}
