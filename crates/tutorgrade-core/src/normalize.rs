//! Free-text canonicalization used before comparing answers.

/// Punctuation removed before comparison.
pub const STRIPPED_PUNCTUATION: [char; 8] = ['.', ',', '!', '?', ';', ':', '\'', '"'];

/// Normalize text for comparison: lowercase, strip punctuation, trim, and
/// collapse whitespace runs to a single space.
///
/// Punctuation is removed before whitespace is collapsed so that
/// `"hola , amigo"` does not leave a double space behind. This keeps the
/// function idempotent.
pub fn normalize_answer(text: &str) -> String {
    let stripped: String = text
        .to_lowercase()
        .chars()
        .filter(|c| !STRIPPED_PUNCTUATION.contains(c))
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Compare two texts after normalizing both sides.
pub fn answers_match(candidate: &str, reference: &str) -> bool {
    normalize_answer(candidate) == normalize_answer(reference)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_whitespace_and_punctuation_variants_agree() {
        assert_eq!(normalize_answer("Hello,  World!"), normalize_answer("hello world"));
        assert_eq!(normalize_answer("  The Cat Sat. "), "the cat sat");
        assert_eq!(normalize_answer("\"¿Dónde   está?\""), "¿dónde está");
        assert_eq!(normalize_answer("it's"), "its");
    }

    #[test]
    fn normalization_is_idempotent() {
        for input in [
            "Hello,  World!",
            "hola , amigo",
            " ; leading punctuation",
            "tabs\tand\nnewlines",
            "",
            "ÉCOLE",
        ] {
            let once = normalize_answer(input);
            assert_eq!(normalize_answer(&once), once, "input: {input:?}");
        }
    }

    #[test]
    fn punctuation_surrounded_by_spaces_collapses() {
        assert_eq!(normalize_answer("hola , amigo"), "hola amigo");
        assert_eq!(normalize_answer(" . "), "");
    }

    #[test]
    fn other_symbols_are_kept() {
        assert_eq!(normalize_answer("rock-and-roll"), "rock-and-roll");
        assert_eq!(normalize_answer("¡Hola!"), "¡hola");
    }

    #[test]
    fn answers_match_is_symmetric() {
        assert!(answers_match("The Cat Sat.", "the cat sat"));
        assert!(answers_match("the cat sat", "The Cat Sat."));
        assert!(!answers_match("the cat", "the cat sat"));
    }
}
