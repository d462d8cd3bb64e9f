//! Readability scoring using Flesch Reading Ease.
//!
//! Formula: `206.835 - 1.015 * (words/sentences) - 84.6 * (syllables/words)`
//!
//! Higher score = easier to read. The raw value is clamped to `0..=100` and
//! rounded, so prompts always get a whole-number score.

use crate::text;

/// Score reported when there is nothing to measure.
pub const EMPTY_SCORE: u8 = 100;

/// Raw counts behind a readability score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextCounts {
    /// Whitespace-separated words.
    pub words: usize,
    /// Sentences split on `.`, `!`, `?`.
    pub sentences: usize,
    /// Heuristic syllable total.
    pub syllables: usize,
}

impl TextCounts {
    /// Measure `text`.
    pub fn measure(text: &str) -> Self {
        Self {
            words: text::count_words(text),
            sentences: text::count_sentences(text),
            syllables: text::count_syllables(text),
        }
    }

    /// Average words per sentence, if there is at least one sentence.
    pub fn words_per_sentence(&self) -> Option<f64> {
        (self.sentences > 0).then(|| self.words as f64 / self.sentences as f64)
    }
}

/// Flesch Reading Ease for `text`, clamped and rounded.
pub fn reading_ease(text: &str) -> u8 {
    score_counts(&TextCounts::measure(text))
}

/// Flesch Reading Ease from precomputed counts.
///
/// Returns [`EMPTY_SCORE`] when there are no words or no sentences.
pub fn score_counts(counts: &TextCounts) -> u8 {
    if counts.words == 0 || counts.sentences == 0 {
        return EMPTY_SCORE;
    }

    let words_per_sentence = counts.words as f64 / counts.sentences as f64;
    let syllables_per_word = counts.syllables as f64 / counts.words as f64;
    let raw = 1.015f64.mul_add(-words_per_sentence, 206.835) - 84.6 * syllables_per_word;

    // Clamped to 0..=100 first, so the cast cannot truncate.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let score = raw.clamp(0.0, 100.0).round() as u8;
    score
}
