//! Exercise evaluation engine.
//!
//! `evaluate` dispatches on the exercise type to one scoring strategy per
//! type. Every strategy defines its own correctness unit (options, blanks,
//! pairs, positions, reference translations) and turns the earned fraction
//! into points rounded to one decimal place. Evaluation is pure: no I/O and no
//! state kept between calls, so it may run concurrently without coordination.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::EvaluationError;
use crate::feedback::{general_feedback, translation_feedback, PENDING_REVIEW};
use crate::model::{
    Answer, Exercise, ExerciseKind, FillInBlanks, FreeWriting, Matching, MultipleChoice,
    Ordering, Translation,
};
use crate::normalize::{answers_match, normalize_answer};
use crate::results::{ExerciseResult, ResultDetails};
use crate::writing::check_writing;

/// Share of the points available through keyword matches alone.
pub const KEYWORD_CREDIT_CAP: f64 = 0.8;

/// Grade an answer against an exercise.
///
/// Returns an error only when the answer variant does not fit the exercise
/// type. Wrong answers are results with a low score.
pub fn evaluate(exercise: &Exercise, answer: &Answer) -> Result<ExerciseResult, EvaluationError> {
    let points = exercise.points;
    let result = match (&exercise.kind, answer) {
        (ExerciseKind::MultipleChoice(mc), Answer::Selection(selected)) => {
            score_multiple_choice(mc, selected, points)
        }
        (ExerciseKind::FillInBlanks(fib), Answer::Blanks(answers)) => {
            score_fill_in_blanks(fib, answers, points)
        }
        (ExerciseKind::Matching(m), Answer::Matches(matches)) => score_matching(m, matches, points),
        (ExerciseKind::Ordering(o), Answer::Order(order)) => score_ordering(o, order, points),
        (ExerciseKind::Translation(t), Answer::Text(text)) => score_translation(t, text, points),
        (ExerciseKind::FreeWriting(fw), Answer::Text(text)) => pending_review(fw, text),
        (kind, _) => {
            let exercise_type = kind.exercise_type();
            return Err(EvaluationError::AnswerShapeMismatch {
                exercise_type,
                expected: Answer::expected_shape(exercise_type),
            });
        }
    };

    if result.details.total_questions == 0 {
        tracing::warn!(
            "exercise '{}' ({}) has nothing to answer, scoring 0",
            exercise.id,
            exercise.exercise_type()
        );
    }
    tracing::debug!(
        exercise_id = %exercise.id,
        exercise_type = %exercise.exercise_type(),
        score = result.score,
        correct = result.correct,
        "evaluated answer"
    );

    Ok(result)
}

/// Grade raw records: an exercise as loaded from the document store and an
/// answer as submitted by the exercise form.
pub fn evaluate_record(
    exercise: &serde_json::Value,
    answer: serde_json::Value,
) -> Result<ExerciseResult, EvaluationError> {
    let exercise = Exercise::from_json(exercise)?;
    let answer = Answer::from_json(exercise.exercise_type(), answer)?;
    evaluate(&exercise, &answer)
}

/// Round half away from zero at one decimal place.
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// `hits / total`, or 0 when there is nothing to count.
fn fraction(hits: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        hits as f64 / total as f64
    }
}

fn points_for(ratio: f64, points: u32) -> f64 {
    round_to_tenth(ratio * points as f64)
}

fn score_multiple_choice(exercise: &MultipleChoice, selected: &[String], points: u32) -> ExerciseResult {
    let correct_ids = exercise.correct_option_ids();
    let selected: BTreeSet<&str> = selected.iter().map(String::as_str).collect();
    let overlap = selected.intersection(&correct_ids).count();

    let correct = !correct_ids.is_empty() && selected == correct_ids;
    let ratio = if correct {
        1.0
    } else {
        fraction(overlap, correct_ids.len())
    };

    ExerciseResult {
        correct,
        score: points_for(ratio, points),
        details: ResultDetails {
            correct_answers: overlap as u32,
            total_questions: correct_ids.len() as u32,
            ..Default::default()
        },
        feedback: Some(general_feedback(correct, ratio).to_string()),
    }
}

fn score_fill_in_blanks(
    exercise: &FillInBlanks,
    answers: &BTreeMap<String, String>,
    points: u32,
) -> ExerciseResult {
    let (hits, misses): (Vec<_>, Vec<_>) = exercise.blanks.iter().partition(|blank| {
        answers
            .get(&blank.id)
            .is_some_and(|given| answers_match(given, &blank.answer))
    });

    unit_result(
        hits.len(),
        exercise.blanks.len(),
        points,
        misses.into_iter().map(|b| b.id.clone()).collect(),
    )
}

/// Answers are keyed by pair id; `left` is authored text and may repeat.
fn score_matching(
    exercise: &Matching,
    matches: &BTreeMap<String, String>,
    points: u32,
) -> ExerciseResult {
    let (hits, misses): (Vec<_>, Vec<_>) = exercise
        .pairs
        .iter()
        .partition(|pair| matches.get(&pair.id) == Some(&pair.right));

    unit_result(
        hits.len(),
        exercise.pairs.len(),
        points,
        misses.into_iter().map(|p| p.id.clone()).collect(),
    )
}

fn score_ordering(exercise: &Ordering, order: &[usize], points: u32) -> ExerciseResult {
    let expected = &exercise.correct_order;
    let span = expected.len().max(order.len());
    let misplaced: Vec<String> = (0..span)
        .filter(|&i| order.get(i) != expected.get(i))
        .map(|i| i.to_string())
        .collect();
    let hits = (0..expected.len())
        .filter(|&i| order.get(i) == Some(&expected[i]))
        .count();

    let mut result = unit_result(hits, expected.len(), points, misplaced);
    // A longer answer hits every expected position but is still not the sequence.
    if result.correct && order.len() != expected.len() {
        result.correct = false;
        result.feedback = Some(general_feedback(false, fraction(hits, expected.len())).to_string());
    }
    result
}

/// Shared shape for strategies that count independent units.
fn unit_result(hits: usize, total: usize, points: u32, incorrect_items: Vec<String>) -> ExerciseResult {
    let correct = total > 0 && hits == total;
    let ratio = fraction(hits, total);

    ExerciseResult {
        correct,
        score: points_for(ratio, points),
        details: ResultDetails {
            correct_answers: hits as u32,
            total_questions: total as u32,
            incorrect_items: Some(incorrect_items),
            ..Default::default()
        },
        feedback: Some(general_feedback(correct, ratio).to_string()),
    }
}

fn score_translation(exercise: &Translation, text: &str, points: u32) -> ExerciseResult {
    let normalized = normalize_answer(text);
    let exact_match = exercise
        .acceptable_translations
        .iter()
        .any(|t| normalize_answer(t) == normalized);

    let ratio = if exact_match {
        1.0
    } else {
        match &exercise.keywords {
            Some(keywords) if !keywords.is_empty() => {
                let found = keywords
                    .iter()
                    .filter(|k| normalized.contains(&normalize_answer(k)))
                    .count();
                fraction(found, keywords.len()) * KEYWORD_CREDIT_CAP
            }
            _ => 0.0,
        }
    };

    ExerciseResult {
        correct: exact_match,
        score: points_for(ratio, points),
        details: ResultDetails {
            correct_answers: u32::from(exact_match),
            total_questions: 1,
            suggestions: (!exact_match).then(|| exercise.acceptable_translations.clone()),
            ..Default::default()
        },
        feedback: Some(translation_feedback(exact_match, ratio).to_string()),
    }
}

/// Free writing waits for a teacher; only the constraint notes are computed.
fn pending_review(exercise: &FreeWriting, text: &str) -> ExerciseResult {
    let notes = check_writing(exercise, text).notes(exercise);

    ExerciseResult {
        correct: false,
        score: 0.0,
        details: ResultDetails {
            correct_answers: 0,
            total_questions: 1,
            suggestions: (!notes.is_empty()).then_some(notes),
            pending: Some(true),
            ..Default::default()
        },
        feedback: Some(PENDING_REVIEW.to_string()),
    }
}
