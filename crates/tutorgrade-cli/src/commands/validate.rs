//! The `tutorgrade validate` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(exercise_set_path: PathBuf) -> Result<()> {
    let sets = tutorgrade_core::parser::load_exercise_sets(&exercise_set_path)?;

    if sets.is_empty() {
        anyhow::bail!("no exercise sets found in {}", exercise_set_path.display());
    }

    let mut total_warnings = 0;

    for set in &sets {
        println!("Exercise set: {} ({} exercises)", set.name, set.exercises.len());

        let warnings = tutorgrade_core::parser::validate_exercise_set(set);
        for w in &warnings {
            let prefix = w
                .exercise_id
                .as_ref()
                .map(|id| format!("  [{id}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All exercise sets valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
