//! Constraint report for free-writing answers.
//!
//! Free writing is never auto-scored. This only tells the student (and the
//! reviewing teacher) whether the declared length limits and required
//! elements are met.

use serde::{Deserialize, Serialize};

use crate::model::FreeWriting;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WritingCheck {
    pub word_count: u32,
    pub within_limits: bool,
    /// Required elements not found in the text.
    pub missing_elements: Vec<String>,
}

/// Count whitespace-separated words.
pub fn word_count(text: &str) -> u32 {
    text.split_whitespace().count() as u32
}

/// Check an answer against the exercise's word limits and required elements.
pub fn check_writing(exercise: &FreeWriting, text: &str) -> WritingCheck {
    let words = word_count(text);
    let within_limits = exercise.min_words.map_or(true, |min| words >= min)
        && exercise.max_words.map_or(true, |max| words <= max);

    let lowered = text.to_lowercase();
    let missing_elements = exercise
        .required_elements
        .iter()
        .flatten()
        .filter(|element| !lowered.contains(&element.to_lowercase()))
        .cloned()
        .collect();

    WritingCheck {
        word_count: words,
        within_limits,
        missing_elements,
    }
}

impl WritingCheck {
    /// Student-facing notes for every unmet constraint.
    pub fn notes(&self, exercise: &FreeWriting) -> Vec<String> {
        let mut notes = Vec::new();
        if let Some(min) = exercise.min_words {
            if self.word_count < min {
                notes.push(format!(
                    "Write at least {min} words (currently {}).",
                    self.word_count
                ));
            }
        }
        if let Some(max) = exercise.max_words {
            if self.word_count > max {
                notes.push(format!(
                    "Keep it to at most {max} words (currently {}).",
                    self.word_count
                ));
            }
        }
        for element in &self.missing_elements {
            notes.push(format!("Include: {element}"));
        }
        notes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise() -> FreeWriting {
        FreeWriting {
            prompt: "Describe your weekend".into(),
            min_words: Some(5),
            max_words: Some(8),
            required_elements: Some(vec!["Sábado".into(), "porque".into()]),
        }
    }

    #[test]
    fn counts_words_across_whitespace() {
        assert_eq!(word_count("  uno\tdos\n tres "), 3);
        assert_eq!(word_count(""), 0);
    }

    #[test]
    fn reports_short_text_and_missing_elements() {
        let ex = exercise();
        let check = check_writing(&ex, "El sábado fui");
        assert_eq!(check.word_count, 3);
        assert!(!check.within_limits);
        assert_eq!(check.missing_elements, vec!["porque".to_string()]);

        let notes = check.notes(&ex);
        assert_eq!(notes.len(), 2);
        assert!(notes[0].contains("at least 5 words"));
        assert_eq!(notes[1], "Include: porque");
    }

    #[test]
    fn satisfied_constraints_produce_no_notes() {
        let ex = exercise();
        let check = check_writing(&ex, "El sábado fui al parque porque hacía sol");
        assert!(check.within_limits);
        assert!(check.missing_elements.is_empty());
        assert!(check.notes(&ex).is_empty());
    }

    #[test]
    fn unconstrained_exercise_is_always_within_limits() {
        let ex = FreeWriting {
            prompt: "Anything".into(),
            min_words: None,
            max_words: None,
            required_elements: None,
        };
        let check = check_writing(&ex, "");
        assert!(check.within_limits);
        assert!(check.notes(&ex).is_empty());
    }
}
