//! Heuristic prompt-quality analysis.
//!
//! [`analyze`] measures a prompt (words, characters, estimated tokens,
//! Flesch Reading Ease) and runs the suggestion [`rules`] over it. The
//! triggered suggestions are shuffled and cut to [`MAX_SUGGESTIONS`], so a
//! prompt that trips many rules shows a different sample on each call.
//!
//! Analysis is pure: no I/O, no shared state, safe to call from any thread.
//!
//! ```
//! use promptshelf_core::analyzer;
//!
//! let result = analyzer::analyze("Summarize this article.");
//! assert_eq!(result.word_count, 3);
//! assert!(result.suggestions.len() <= analyzer::MAX_SUGGESTIONS);
//! ```

pub mod rules;
pub mod suggestion;

use rand::Rng;
use rand::seq::SliceRandom;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub use rules::PromptContext;
pub use suggestion::{Priority, Suggestion, SuggestionCategory, UnknownVariant};

use crate::readability::{self, TextCounts};
use crate::text;

/// Most suggestions returned by one analysis.
pub const MAX_SUGGESTIONS: usize = 6;

/// Rough language-model tokens per word.
pub const TOKENS_PER_WORD: f64 = 1.3;

/// Result of analyzing one prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AnalysisResult {
    /// Whitespace-separated words.
    pub word_count: usize,
    /// Length of the content as given, in UTF-16 code units.
    pub character_count: usize,
    /// `ceil(word_count * 1.3)`.
    pub estimated_tokens: usize,
    /// Flesch Reading Ease, `0..=100`.
    pub readability_score: u8,
    /// Up to [`MAX_SUGGESTIONS`] suggestions in random order.
    pub suggestions: Vec<Suggestion>,
}

impl AnalysisResult {
    /// Highest priority among the returned suggestions.
    pub fn top_priority(&self) -> Option<Priority> {
        self.suggestions.iter().map(|s| s.priority).max()
    }
}

/// Analyze `content` using the thread-local RNG for suggestion order.
pub fn analyze(content: &str) -> AnalysisResult {
    analyze_with_rng(content, &mut rand::rng())
}

/// Analyze `content`, drawing the suggestion shuffle from `rng`.
#[tracing::instrument(skip_all, fields(text_len = content.len()))]
pub fn analyze_with_rng<R: Rng + ?Sized>(content: &str, rng: &mut R) -> AnalysisResult {
    let (metrics, mut suggestions) = measure_and_evaluate(content);
    let triggered = suggestions.len();

    suggestions.shuffle(rng);
    suggestions.truncate(MAX_SUGGESTIONS);

    tracing::debug!(
        words = metrics.word_count,
        readability = metrics.readability_score,
        triggered,
        returned = suggestions.len(),
        "prompt analyzed"
    );

    AnalysisResult {
        suggestions,
        ..metrics
    }
}

/// Every suggestion `content` triggers, in rule order, without sampling.
pub fn all_suggestions(content: &str) -> Vec<Suggestion> {
    measure_and_evaluate(content).1
}

/// Like [`analyze`], but keeps every triggered suggestion in rule order.
pub fn analyze_unsampled(content: &str) -> AnalysisResult {
    let (metrics, suggestions) = measure_and_evaluate(content);
    AnalysisResult {
        suggestions,
        ..metrics
    }
}

/// `ceil(words * 1.3)`.
pub fn estimate_tokens(words: usize) -> usize {
    // Non-negative and far below 2^53 for any real input.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let tokens = (words as f64 * TOKENS_PER_WORD).ceil() as usize;
    tokens
}

fn measure_and_evaluate(content: &str) -> (AnalysisResult, Vec<Suggestion>) {
    let counts = TextCounts::measure(content);
    let readability_score = readability::score_counts(&counts);

    let ctx = PromptContext::new(content, counts, readability_score);
    let suggestions = rules::evaluate(&ctx);

    let metrics = AnalysisResult {
        word_count: counts.words,
        character_count: text::utf16_len(content),
        estimated_tokens: estimate_tokens(counts.words),
        readability_score,
        suggestions: Vec::new(),
    };
    (metrics, suggestions)
}
