//! Word lists for prompt analysis.
//!
//! Vague pronouns, subjective terms, and the cue phrases whose absence the
//! suggestion rules look for.

use std::sync::LazyLock;

use regex::Regex;

/// Pronouns that usually hide the noun they refer to.
pub const VAGUE_PRONOUNS: &[&str] = &["it", "this", "that", "these", "those"];

/// Judgement words with no measurable criterion behind them.
pub const SUBJECTIVE_TERMS: &[&str] = &[
    "good", "bad", "nice", "great", "terrible", "amazing", "awful",
];

/// Politeness cue.
pub const PLEASE_CUES: &[&str] = &["please"];

/// Cues that the prompt asks for a particular output shape.
pub const FORMAT_CUES: &[&str] = &["format", "output"];

/// Cues that the prompt assigns the model a role or persona.
pub const ROLE_CUES: &[&str] = &["role", "act as", "you are"];

/// Cues that the prompt asks for a stepwise answer. Also matches "steps".
pub const STEP_CUES: &[&str] = &["step"];

/// Cues that the prompt includes examples.
pub const EXAMPLE_CUES: &[&str] = &["example", "for instance", "such as"];

/// Cues that the prompt supplies context or assumptions.
pub const CONTEXT_CUES: &[&str] = &["context", "background", "assume", "given", "considering"];

/// Whole-word matcher for [`VAGUE_PRONOUNS`].
pub static VAGUE_PRONOUN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| whole_word_pattern(VAGUE_PRONOUNS));

/// Whole-word matcher for [`SUBJECTIVE_TERMS`].
pub static SUBJECTIVE_TERM_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| whole_word_pattern(SUBJECTIVE_TERMS));

/// Build `\b(?:a|b|c)\b` from a literal word list.
fn whole_word_pattern(words: &[&str]) -> Regex {
    let alternation = words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"\b(?:{alternation})\b")).expect("valid regex")
}

/// Returns `true` if any cue appears as a substring of `lower`.
///
/// `lower` must already be lower-cased.
pub fn mentions_any(lower: &str, cues: &[&str]) -> bool {
    cues.iter().any(|cue| lower.contains(cue))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pronoun_pattern_matches_whole_words_only() {
        let text = "it is this, not that. itinerary thistle";
        assert_eq!(VAGUE_PRONOUN_PATTERN.find_iter(text).count(), 3);
    }

    #[test]
    fn subjective_pattern_matches_each_term() {
        for term in SUBJECTIVE_TERMS {
            assert!(SUBJECTIVE_TERM_PATTERN.is_match(term), "{term} not matched");
        }
        assert!(!SUBJECTIVE_TERM_PATTERN.is_match("goodbye badge"));
    }

    #[test]
    fn cues_match_as_substrings() {
        assert!(mentions_any("list the steps", STEP_CUES));
        assert!(mentions_any("you are a chef", ROLE_CUES));
        assert!(!mentions_any("write a poem", FORMAT_CUES));
    }
}
