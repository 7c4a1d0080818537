//! TOML exercise set parser.
//!
//! Loads exercise sets from TOML files and directories, and validates them.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{Exercise, ExerciseKind, ExerciseSet, BLANK_MARKER};

/// Intermediate TOML structure for parsing exercise set files.
#[derive(Debug, Deserialize)]
struct TomlExerciseFile {
    exercise_set: TomlExerciseSetHeader,
    #[serde(default)]
    exercises: Vec<toml::Table>,
}

#[derive(Debug, Deserialize)]
struct TomlExerciseSetHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    language: Option<String>,
}

/// Parse a single TOML file into an `ExerciseSet`.
pub fn parse_exercise_set(path: &Path) -> Result<ExerciseSet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read exercise set file: {}", path.display()))?;

    parse_exercise_set_str(&content, path)
}

/// Parse a TOML string into an `ExerciseSet` (useful for testing).
///
/// Exercises use the same field names as stored exercise records, so each
/// table goes through the record decoder and an unknown `type` is reported
/// as an unsupported exercise type.
pub fn parse_exercise_set_str(content: &str, source_path: &Path) -> Result<ExerciseSet> {
    let parsed: TomlExerciseFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let exercises = parsed
        .exercises
        .into_iter()
        .enumerate()
        .map(|(index, table)| {
            let label = table
                .get("id")
                .and_then(|id| id.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| format!("#{}", index + 1));
            let record = serde_json::to_value(&table)
                .with_context(|| format!("exercise {label}: not representable as a record"))?;
            Exercise::from_json(&record).with_context(|| {
                format!("exercise {label} in {}", source_path.display())
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ExerciseSet {
        id: parsed.exercise_set.id,
        name: parsed.exercise_set.name,
        description: parsed.exercise_set.description,
        language: parsed.exercise_set.language,
        exercises,
    })
}

/// Recursively load all `.toml` exercise set files from a directory.
pub fn load_exercise_directory(dir: &Path) -> Result<Vec<ExerciseSet>> {
    let mut sets = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            sets.extend(load_exercise_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_exercise_set(&path) {
                Ok(set) => sets.push(set),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(sets)
}

/// Load a file or every exercise set under a directory.
pub fn load_exercise_sets(path: &Path) -> Result<Vec<ExerciseSet>> {
    if path.is_dir() {
        load_exercise_directory(path)
    } else {
        Ok(vec![parse_exercise_set(path)?])
    }
}

/// A warning from exercise set validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The exercise ID (if applicable).
    pub exercise_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate an exercise set for authoring mistakes the engine would
/// otherwise grade as zero or grade surprisingly.
pub fn validate_exercise_set(set: &ExerciseSet) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let mut seen_ids = HashSet::new();
    for exercise in &set.exercises {
        if !seen_ids.insert(&exercise.id) {
            warnings.push(ValidationWarning {
                exercise_id: Some(exercise.id.clone()),
                message: format!("duplicate exercise ID: {}", exercise.id),
            });
        }
    }

    for exercise in &set.exercises {
        let mut warn = |message: String| {
            warnings.push(ValidationWarning {
                exercise_id: Some(exercise.id.clone()),
                message,
            })
        };

        if exercise.points == 0 {
            warn("points must be greater than 0".into());
        }

        match &exercise.kind {
            ExerciseKind::MultipleChoice(mc) => {
                let correct = mc.correct_option_ids().len();
                if correct == 0 {
                    warn("no option is marked correct".into());
                } else if correct > 1 && !mc.allow_multiple {
                    warn(format!(
                        "{correct} options are correct but allowMultiple is false"
                    ));
                }
                let mut option_ids = HashSet::new();
                for option in &mc.options {
                    if !option_ids.insert(&option.id) {
                        warn(format!("duplicate option ID: {}", option.id));
                    }
                }
            }
            ExerciseKind::FillInBlanks(fib) => {
                if fib.blanks.is_empty() {
                    warn("exercise has no blanks".into());
                }
                let markers = fib.text.matches(BLANK_MARKER).count();
                if markers != fib.blanks.len() {
                    warn(format!(
                        "text has {markers} blank marker(s) but {} blank(s) are defined",
                        fib.blanks.len()
                    ));
                }
            }
            ExerciseKind::Matching(m) => {
                if m.pairs.is_empty() {
                    warn("exercise has no pairs".into());
                }
                let mut lefts = HashSet::new();
                for pair in &m.pairs {
                    if !lefts.insert(pair.left.as_str()) {
                        warn(format!("left item '{}' appears more than once", pair.left));
                    }
                }
            }
            ExerciseKind::Ordering(o) => {
                if o.items.is_empty() {
                    warn("exercise has no items".into());
                }
                let mut sorted = o.correct_order.clone();
                sorted.sort_unstable();
                if sorted != (0..o.items.len()).collect::<Vec<_>>() {
                    warn(format!(
                        "correctOrder is not a permutation of 0..{}",
                        o.items.len()
                    ));
                }
            }
            ExerciseKind::Translation(t) => {
                if t.acceptable_translations.is_empty() {
                    warn("no acceptable translations provided".into());
                }
            }
            ExerciseKind::FreeWriting(fw) => {
                if let (Some(min), Some(max)) = (fw.min_words, fw.max_words) {
                    if min > max {
                        warn(format!("minWords ({min}) exceeds maxWords ({max})"));
                    }
                }
            }
        }
    }

    warnings
}
