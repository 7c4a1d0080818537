//! The `tutorgrade pending` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use tutorgrade_core::review::pending_reviews;
use tutorgrade_core::submission::SubmissionLog;

use crate::config::{load_config_from, OutputFormat};

pub fn execute(format: Option<OutputFormat>, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let log = SubmissionLog::load_json(&config.submissions_path)?;
    let pending = pending_reviews(&log.submissions);

    if format.unwrap_or(config.output_format) == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&pending)?);
        return Ok(());
    }

    if pending.is_empty() {
        println!("No submissions awaiting review.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Submission", "Student", "Exercise", "Points", "Submitted"]);
    for s in &pending {
        table.add_row(vec![
            Cell::new(s.id),
            Cell::new(&s.student_id),
            Cell::new(&s.exercise_id),
            Cell::new(s.max_points),
            Cell::new(s.submitted_at.format("%Y-%m-%d %H:%M")),
        ]);
    }

    println!("{table}");
    println!("{} submission(s) awaiting review.", pending.len());

    Ok(())
}
