//! Feedback messages tiered by the fraction of points earned.

pub const PERFECT: &str = "Perfect! You got everything correct.";
pub const GREAT: &str = "Great work! Just a few minor mistakes.";
pub const GOOD: &str = "Good effort! There's room for improvement.";
pub const KEEP_PRACTICING: &str = "Keep practicing! Review the topics and try again.";
pub const REVIEW_MATERIAL: &str = "You might want to review the material before trying again.";

pub const TRANSLATION_PERFECT: &str = "Perfect translation!";
pub const TRANSLATION_GREAT: &str =
    "Very good translation! You captured most of the key elements.";
pub const TRANSLATION_GOOD: &str =
    "Good attempt! Consider the suggested translations for improvement.";
pub const TRANSLATION_REVIEW: &str = "Review the suggested translations and key vocabulary.";

/// Shown on every free-writing result until a teacher grades it.
pub const PENDING_REVIEW: &str =
    "This submission requires teacher review. Your score will be updated once reviewed.";

/// Feedback shared by every auto-graded type except translation.
///
/// `ratio` is the earned fraction of the exercise's points, before rounding.
pub fn general_feedback(correct: bool, ratio: f64) -> &'static str {
    if correct {
        PERFECT
    } else if ratio >= 0.8 {
        GREAT
    } else if ratio >= 0.6 {
        GOOD
    } else if ratio >= 0.4 {
        KEEP_PRACTICING
    } else {
        REVIEW_MATERIAL
    }
}

/// Translation wording. The keyword path tops out at 0.8, which is exactly
/// the "very good" threshold.
pub fn translation_feedback(exact_match: bool, ratio: f64) -> &'static str {
    if exact_match {
        TRANSLATION_PERFECT
    } else if ratio >= 0.8 {
        TRANSLATION_GREAT
    } else if ratio >= 0.6 {
        TRANSLATION_GOOD
    } else {
        TRANSLATION_REVIEW
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn general_tiers() {
        assert_eq!(general_feedback(true, 0.0), PERFECT);
        assert_eq!(general_feedback(false, 1.0), GREAT);
        assert_eq!(general_feedback(false, 0.8), GREAT);
        assert_eq!(general_feedback(false, 0.79), GOOD);
        assert_eq!(general_feedback(false, 0.6), GOOD);
        assert_eq!(general_feedback(false, 0.5), KEEP_PRACTICING);
        assert_eq!(general_feedback(false, 0.4), KEEP_PRACTICING);
        assert_eq!(general_feedback(false, 0.39), REVIEW_MATERIAL);
        assert_eq!(general_feedback(false, 0.0), REVIEW_MATERIAL);
    }

    #[test]
    fn translation_tiers() {
        assert_eq!(translation_feedback(true, 0.0), TRANSLATION_PERFECT);
        assert_eq!(translation_feedback(false, 0.8), TRANSLATION_GREAT);
        assert_eq!(translation_feedback(false, 0.6), TRANSLATION_GOOD);
        assert_eq!(translation_feedback(false, 0.4), TRANSLATION_REVIEW);
    }
}
