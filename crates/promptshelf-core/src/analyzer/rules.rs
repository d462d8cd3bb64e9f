//! Suggestion rules.
//!
//! Each rule inspects a [`PromptContext`] and yields at most one
//! [`Suggestion`]. Rules are independent: [`evaluate`] runs every one of them
//! on every call.

use std::collections::HashMap;

use crate::readability::TextCounts;
use crate::text;
use crate::word_lists::{
    CONTEXT_CUES, EXAMPLE_CUES, FORMAT_CUES, PLEASE_CUES, ROLE_CUES, STEP_CUES,
    SUBJECTIVE_TERM_PATTERN, VAGUE_PRONOUN_PATTERN, mentions_any,
};

use super::suggestion::{Priority, Suggestion, SuggestionCategory};

/// Words of at most this many characters never count as repeated.
const REPEATED_MIN_LEN: usize = 4;

/// A word repeated more often than this is flagged.
const REPEATED_MAX_OCCURRENCES: usize = 3;

/// Maximum number of repeated words listed in the message.
const REPEATED_LISTED: usize = 3;

/// Everything a rule may look at, computed once per analysis.
#[derive(Debug, Clone)]
pub struct PromptContext {
    /// Lower-cased content.
    pub lower: String,
    /// Word, sentence and syllable counts.
    pub counts: TextCounts,
    /// Flesch Reading Ease, `0..=100`.
    pub readability: u8,
}

impl PromptContext {
    /// Build the context for `content`.
    pub fn new(content: &str, counts: TextCounts, readability: u8) -> Self {
        Self {
            lower: content.to_lowercase(),
            counts,
            readability,
        }
    }

    const fn words(&self) -> usize {
        self.counts.words
    }
}

/// A single suggestion rule.
pub type Rule = fn(&PromptContext) -> Option<Suggestion>;

/// Every rule, in evaluation order.
pub const RULES: &[Rule] = &[
    vague_pronouns,
    subjective_terms,
    too_short,
    too_long,
    missing_please,
    missing_format,
    missing_role,
    missing_steps,
    missing_examples,
    missing_context,
    low_readability,
    excess_exclamations,
    long_sentences,
    repeated_words,
];

/// Run every rule and collect the suggestions that fired, in rule order.
pub fn evaluate(ctx: &PromptContext) -> Vec<Suggestion> {
    RULES.iter().filter_map(|rule| rule(ctx)).collect()
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

// -- Clarity ----------------------------------------------------------------

fn vague_pronouns(ctx: &PromptContext) -> Option<Suggestion> {
    let count = VAGUE_PRONOUN_PATTERN.find_iter(&ctx.lower).count();
    let priority = match count {
        0 => return None,
        1..=2 => Priority::Medium,
        _ => Priority::High,
    };
    Some(Suggestion::new(
        SuggestionCategory::Clarity,
        priority,
        format!(
            "Found {count} vague pronoun{} (it, this, that, these, those). \
             Replace them with the specific nouns they refer to.",
            plural(count)
        ),
    ))
}

fn subjective_terms(ctx: &PromptContext) -> Option<Suggestion> {
    let count = SUBJECTIVE_TERM_PATTERN.find_iter(&ctx.lower).count();
    let priority = match count {
        0 => return None,
        1..=3 => Priority::Medium,
        _ => Priority::High,
    };
    Some(Suggestion::new(
        SuggestionCategory::Clarity,
        priority,
        format!(
            "Found {count} subjective term{} like \"good\" or \"great\". \
             Replace them with specific, measurable criteria.",
            plural(count)
        ),
    ))
}

fn long_sentences(ctx: &PromptContext) -> Option<Suggestion> {
    let average = ctx.counts.words_per_sentence()?;
    (average > 25.0).then(|| {
        Suggestion::new(
            SuggestionCategory::Clarity,
            Priority::Medium,
            format!(
                "Sentences average {average:.0} words. \
                 Break long sentences into shorter, separate instructions."
            ),
        )
    })
}

fn repeated_words(ctx: &PromptContext) -> Option<Suggestion> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for word in text::extract_words(&ctx.lower) {
        if word.chars().count() >= REPEATED_MIN_LEN {
            *counts.entry(word).or_insert(0) += 1;
        }
    }

    let mut repeated: Vec<(String, usize)> = counts
        .into_iter()
        .filter(|(_, count)| *count > REPEATED_MAX_OCCURRENCES)
        .collect();
    if repeated.is_empty() {
        return None;
    }
    repeated.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let listed = repeated
        .iter()
        .take(REPEATED_LISTED)
        .map(|(word, _)| format!("\"{word}\""))
        .collect::<Vec<_>>()
        .join(", ");
    Some(Suggestion::new(
        SuggestionCategory::Clarity,
        Priority::Medium,
        format!("Repeated words: {listed}. Vary the wording or merge the repeated instructions."),
    ))
}

// -- Specificity ------------------------------------------------------------

fn too_short(ctx: &PromptContext) -> Option<Suggestion> {
    let words = ctx.words();
    match words {
        // Blank content is a baseline, not a short prompt.
        0 => None,
        1..=14 => Some(Suggestion::new(
            SuggestionCategory::Specificity,
            Priority::High,
            format!(
                "Your prompt is very short ({words} word{}). Add context, constraints, \
                 or an example so the model knows exactly what you want.",
                plural(words)
            ),
        )),
        15..=29 => Some(Suggestion::new(
            SuggestionCategory::Specificity,
            Priority::Medium,
            "Your prompt is fairly short. Consider adding specific requirements \
             or describing the expected result.",
        )),
        _ => None,
    }
}

fn too_long(ctx: &PromptContext) -> Option<Suggestion> {
    let words = ctx.words();
    match words {
        0..=150 => None,
        151..=300 => Some(Suggestion::new(
            SuggestionCategory::Specificity,
            Priority::Low,
            "Your prompt is getting long. Check for instructions that repeat \
             or could be removed.",
        )),
        _ => Some(Suggestion::new(
            SuggestionCategory::Specificity,
            Priority::Medium,
            format!(
                "Your prompt is very long ({words} words). Split it into smaller, \
                 focused prompts or cut redundant detail."
            ),
        )),
    }
}

fn missing_examples(ctx: &PromptContext) -> Option<Suggestion> {
    (ctx.words() > 60 && !mentions_any(&ctx.lower, EXAMPLE_CUES)).then(|| {
        Suggestion::new(
            SuggestionCategory::Specificity,
            Priority::Medium,
            "Include an example of the input or output you expect so the model can match it.",
        )
    })
}

// -- Structure --------------------------------------------------------------

fn missing_please(ctx: &PromptContext) -> Option<Suggestion> {
    (ctx.words() > 20 && !mentions_any(&ctx.lower, PLEASE_CUES)).then(|| {
        Suggestion::new(
            SuggestionCategory::Structure,
            Priority::Low,
            "Consider phrasing the request with \"please\" for a clearer, more polite instruction.",
        )
    })
}

fn missing_format(ctx: &PromptContext) -> Option<Suggestion> {
    (ctx.words() > 50 && !mentions_any(&ctx.lower, FORMAT_CUES)).then(|| {
        Suggestion::new(
            SuggestionCategory::Structure,
            Priority::Medium,
            "Specify the desired output format (list, table, JSON, length) \
             to get structured responses.",
        )
    })
}

fn missing_role(ctx: &PromptContext) -> Option<Suggestion> {
    (ctx.words() > 40 && !mentions_any(&ctx.lower, ROLE_CUES)).then(|| {
        Suggestion::new(
            SuggestionCategory::Structure,
            Priority::Medium,
            "Define a role or persona for the model to adopt, \
             for instance \"You are a senior editor\".",
        )
    })
}

fn missing_steps(ctx: &PromptContext) -> Option<Suggestion> {
    (ctx.words() > 80 && !mentions_any(&ctx.lower, STEP_CUES)).then(|| {
        Suggestion::new(
            SuggestionCategory::Structure,
            Priority::Low,
            "For multi-part tasks, ask for a step-by-step approach to get more thorough answers.",
        )
    })
}

// -- Context ----------------------------------------------------------------

fn missing_context(ctx: &PromptContext) -> Option<Suggestion> {
    (ctx.words() > 30 && !mentions_any(&ctx.lower, CONTEXT_CUES)).then(|| {
        Suggestion::new(
            SuggestionCategory::Context,
            Priority::Medium,
            "Provide background about your situation so the model can tailor its answer.",
        )
    })
}

// -- Tone -------------------------------------------------------------------

fn low_readability(ctx: &PromptContext) -> Option<Suggestion> {
    let score = ctx.readability;
    match score {
        0..=19 => Some(Suggestion::new(
            SuggestionCategory::Tone,
            Priority::High,
            format!(
                "Readability score is {score}/100, which is very hard to read. \
                 Use shorter sentences and simpler words."
            ),
        )),
        20..=39 => Some(Suggestion::new(
            SuggestionCategory::Tone,
            Priority::Medium,
            format!(
                "Readability score is {score}/100. Simplifying complex sentences \
                 would make the prompt easier to follow."
            ),
        )),
        _ => None,
    }
}

fn excess_exclamations(ctx: &PromptContext) -> Option<Suggestion> {
    let count = ctx.lower.matches('!').count();
    match count {
        0..=1 => None,
        2..=3 => Some(Suggestion::new(
            SuggestionCategory::Tone,
            Priority::Low,
            "Consider using fewer exclamation marks to keep a professional tone.",
        )),
        _ => Some(Suggestion::new(
            SuggestionCategory::Tone,
            Priority::Medium,
            format!(
                "Found {count} exclamation marks. Fewer exclamation marks keep the tone professional."
            ),
        )),
    }
}
