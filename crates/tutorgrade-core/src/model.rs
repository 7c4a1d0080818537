//! Core data model types for tutorgrade.
//!
//! Exercises are stored as plain records with a `type` discriminant. Here they
//! become a sum type with one payload per exercise type, so every consumer
//! has to handle all six.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EvaluationError;

/// The six supported exercise types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExerciseType {
    MultipleChoice,
    FillInBlanks,
    Matching,
    Ordering,
    Translation,
    FreeWriting,
}

impl ExerciseType {
    pub const ALL: [ExerciseType; 6] = [
        ExerciseType::MultipleChoice,
        ExerciseType::FillInBlanks,
        ExerciseType::Matching,
        ExerciseType::Ordering,
        ExerciseType::Translation,
        ExerciseType::FreeWriting,
    ];

    /// The record tag for this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseType::MultipleChoice => "multiple-choice",
            ExerciseType::FillInBlanks => "fill-in-blanks",
            ExerciseType::Matching => "matching",
            ExerciseType::Ordering => "ordering",
            ExerciseType::Translation => "translation",
            ExerciseType::FreeWriting => "free-writing",
        }
    }
}

impl fmt::Display for ExerciseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExerciseType {
    type Err = EvaluationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExerciseType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| EvaluationError::UnsupportedExerciseType(s.to_string()))
    }
}

/// Exercise difficulty level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Beginner => write!(f, "beginner"),
            Difficulty::Intermediate => write!(f, "intermediate"),
            Difficulty::Advanced => write!(f, "advanced"),
        }
    }
}

/// A gradable exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    /// Unique identifier for this exercise.
    pub id: String,
    /// Human-readable title.
    #[serde(default)]
    pub title: String,
    /// Instructions shown to the student.
    #[serde(default)]
    pub instructions: String,
    /// Maximum achievable score.
    pub points: u32,
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Time limit in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Type-specific content, tagged by `type`.
    #[serde(flatten)]
    pub kind: ExerciseKind,
}

impl Exercise {
    pub fn exercise_type(&self) -> ExerciseType {
        self.kind.exercise_type()
    }

    /// Decode a raw exercise record as stored in the document store.
    ///
    /// The `type` tag is checked before the payload, so an unknown type is
    /// reported as such rather than as a generic decoding failure.
    pub fn from_json(record: &serde_json::Value) -> Result<Self, EvaluationError> {
        let tag = record
            .get("type")
            .and_then(|t| t.as_str())
            .ok_or_else(|| EvaluationError::InvalidRecord("missing `type` tag".into()))?;
        tag.parse::<ExerciseType>()?;

        serde_json::from_value(record.clone())
            .map_err(|e| EvaluationError::InvalidRecord(e.to_string()))
    }
}

/// Type-specific exercise content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ExerciseKind {
    MultipleChoice(MultipleChoice),
    FillInBlanks(FillInBlanks),
    Matching(Matching),
    Ordering(Ordering),
    Translation(Translation),
    FreeWriting(FreeWriting),
}

impl ExerciseKind {
    pub fn exercise_type(&self) -> ExerciseType {
        match self {
            ExerciseKind::MultipleChoice(_) => ExerciseType::MultipleChoice,
            ExerciseKind::FillInBlanks(_) => ExerciseType::FillInBlanks,
            ExerciseKind::Matching(_) => ExerciseType::Matching,
            ExerciseKind::Ordering(_) => ExerciseType::Ordering,
            ExerciseKind::Translation(_) => ExerciseType::Translation,
            ExerciseKind::FreeWriting(_) => ExerciseType::FreeWriting,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultipleChoice {
    #[serde(default)]
    pub question: String,
    pub options: Vec<ExerciseOption>,
    /// Whether more than one option may be selected.
    #[serde(default)]
    pub allow_multiple: bool,
}

impl MultipleChoice {
    /// Ids of the options marked correct.
    pub fn correct_option_ids(&self) -> BTreeSet<&str> {
        self.options
            .iter()
            .filter(|o| o.is_correct)
            .map(|o| o.id.as_str())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseOption {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub is_correct: bool,
}

/// Marker that stands for a blank inside a fill-in-blanks template.
pub const BLANK_MARKER: &str = "_____";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillInBlanks {
    /// Template text containing one `_____` marker per blank.
    pub text: String,
    pub blanks: Vec<Blank>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blank {
    pub id: String,
    /// Expected text, compared after normalization.
    pub answer: String,
    #[serde(default)]
    pub position: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Matching {
    pub pairs: Vec<MatchingPair>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchingPair {
    pub id: String,
    pub left: String,
    pub right: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ordering {
    pub items: Vec<String>,
    /// Indices into `items` in the canonical order.
    pub correct_order: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Translation {
    pub source_text: String,
    pub target_language: String,
    /// Equally valid reference translations.
    pub acceptable_translations: Vec<String>,
    /// Partial-credit signal used when no reference matches exactly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreeWriting {
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_words: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_words: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_elements: Option<Vec<String>>,
}

/// A collection of exercises, usually one lesson's worth.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseSet {
    /// Unique identifier for this exercise set.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Language being taught (e.g. "es").
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

impl ExerciseSet {
    /// Look up an exercise by id.
    pub fn exercise(&self, id: &str) -> Option<&Exercise> {
        self.exercises.iter().find(|e| e.id == id)
    }
}

/// A student's answer. The expected variant depends on the exercise type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum Answer {
    /// Selected option ids (multiple-choice).
    Selection(Vec<String>),
    /// Blank id to typed text (fill-in-blanks).
    Blanks(BTreeMap<String, String>),
    /// Pair id to chosen right-hand item (matching).
    Matches(BTreeMap<String, String>),
    /// Item indices in the submitted order (ordering).
    Order(Vec<usize>),
    /// Free text (translation, free-writing).
    Text(String),
}

impl Answer {
    /// Description of the answer shape an exercise type expects.
    pub fn expected_shape(exercise_type: ExerciseType) -> &'static str {
        match exercise_type {
            ExerciseType::MultipleChoice => "a list of selected option ids",
            ExerciseType::FillInBlanks => "an object mapping blank ids to text",
            ExerciseType::Matching => "an object mapping pair ids to the chosen item",
            ExerciseType::Ordering => "a list of item indices",
            ExerciseType::Translation | ExerciseType::FreeWriting => "a text string",
        }
    }

    /// Decode a raw answer as submitted by the exercise form.
    ///
    /// Single-choice forms submit the selected id as a bare string, which is
    /// accepted for multiple-choice exercises.
    pub fn from_json(
        exercise_type: ExerciseType,
        value: serde_json::Value,
    ) -> Result<Self, EvaluationError> {
        let mismatch = || EvaluationError::AnswerShapeMismatch {
            exercise_type,
            expected: Answer::expected_shape(exercise_type),
        };

        match exercise_type {
            ExerciseType::MultipleChoice => match value {
                serde_json::Value::String(id) => Ok(Answer::Selection(vec![id])),
                other => serde_json::from_value(other)
                    .map(Answer::Selection)
                    .map_err(|_| mismatch()),
            },
            ExerciseType::FillInBlanks => serde_json::from_value(value)
                .map(Answer::Blanks)
                .map_err(|_| mismatch()),
            ExerciseType::Matching => serde_json::from_value(value)
                .map(Answer::Matches)
                .map_err(|_| mismatch()),
            ExerciseType::Ordering => serde_json::from_value(value)
                .map(Answer::Order)
                .map_err(|_| mismatch()),
            ExerciseType::Translation | ExerciseType::FreeWriting => match value {
                serde_json::Value::String(text) => Ok(Answer::Text(text)),
                _ => Err(mismatch()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn exercise_type_display_and_parse() {
        assert_eq!(ExerciseType::FillInBlanks.to_string(), "fill-in-blanks");
        assert_eq!(
            "free-writing".parse::<ExerciseType>().unwrap(),
            ExerciseType::FreeWriting
        );
        assert_eq!(
            "essay".parse::<ExerciseType>().unwrap_err(),
            EvaluationError::UnsupportedExerciseType("essay".into())
        );
    }

    #[test]
    fn decode_document_store_record() {
        let record = json!({
            "id": "ex-1",
            "title": "Colours",
            "type": "multiple-choice",
            "points": 10,
            "difficulty": "intermediate",
            "question": "Which are colours?",
            "allowMultiple": true,
            "lessonId": "lesson-7",
            "options": [
                {"id": "a", "text": "rojo", "isCorrect": true},
                {"id": "b", "text": "perro", "isCorrect": false},
                {"id": "c", "text": "azul", "isCorrect": true}
            ]
        });

        let exercise = Exercise::from_json(&record).unwrap();
        assert_eq!(exercise.exercise_type(), ExerciseType::MultipleChoice);
        assert_eq!(exercise.difficulty, Difficulty::Intermediate);
        let ExerciseKind::MultipleChoice(mc) = &exercise.kind else {
            panic!("expected multiple-choice payload");
        };
        assert!(mc.allow_multiple);
        assert_eq!(
            mc.correct_option_ids().into_iter().collect::<Vec<_>>(),
            vec!["a", "c"]
        );
    }

    #[test]
    fn decode_unknown_type_is_unsupported() {
        let record = json!({"id": "x", "type": "crossword", "points": 5});
        assert_eq!(
            Exercise::from_json(&record).unwrap_err(),
            EvaluationError::UnsupportedExerciseType("crossword".into())
        );
    }

    #[test]
    fn decode_missing_payload_is_invalid_record() {
        let record = json!({"id": "x", "type": "ordering", "points": 5});
        assert!(matches!(
            Exercise::from_json(&record),
            Err(EvaluationError::InvalidRecord(_))
        ));
    }

    #[test]
    fn exercise_serializes_with_type_tag() {
        let exercise = Exercise {
            id: "ord-1".into(),
            title: String::new(),
            instructions: String::new(),
            points: 4,
            difficulty: Difficulty::Beginner,
            time_limit: None,
            tags: vec![],
            kind: ExerciseKind::Ordering(Ordering {
                items: vec!["uno".into(), "dos".into()],
                correct_order: vec![0, 1],
            }),
        };
        let value = serde_json::to_value(&exercise).unwrap();
        assert_eq!(value["type"], "ordering");
        assert_eq!(value["correctOrder"], json!([0, 1]));
        assert!(value.get("timeLimit").is_none());
    }

    #[test]
    fn answer_shapes_follow_exercise_type() {
        assert_eq!(
            Answer::from_json(ExerciseType::MultipleChoice, json!("b")).unwrap(),
            Answer::Selection(vec!["b".into()])
        );
        assert_eq!(
            Answer::from_json(ExerciseType::Ordering, json!([2, 0, 1])).unwrap(),
            Answer::Order(vec![2, 0, 1])
        );
        assert!(matches!(
            Answer::from_json(ExerciseType::Matching, json!({"p1": "dog"})).unwrap(),
            Answer::Matches(_)
        ));
        assert_eq!(
            Answer::from_json(ExerciseType::Translation, json!(["the", "cat"])).unwrap_err(),
            EvaluationError::AnswerShapeMismatch {
                exercise_type: ExerciseType::Translation,
                expected: "a text string",
            }
        );
        assert!(Answer::from_json(ExerciseType::Ordering, json!([-1, 0])).is_err());
    }
}
