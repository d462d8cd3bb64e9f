//! Text processing utilities.
//!
//! Word, sentence, and syllable counting shared by the readability scorer
//! and the suggestion rules. Every function here is a single linear scan and
//! accepts any input, including empty strings.

/// Letters that keep a trailing `e`/`es` audible (`table`, `goes`).
const SOFT_LETTERS: &[char] = &['l', 'a', 'e', 'i', 'o', 'u', 'y'];

/// Vowels counted when estimating syllables.
const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u', 'y'];

/// Count whitespace-separated words.
///
/// Leading and trailing whitespace never produces empty words, so blank input
/// counts as zero.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Count sentences by splitting on runs of `.`, `!`, and `?`.
///
/// Segments that are blank after trimming are ignored, so `"Wait... what?!"`
/// counts as two sentences and text with no terminator counts as one.
pub fn count_sentences(text: &str) -> usize {
    text.split(is_sentence_terminator)
        .filter(|segment| !segment.trim().is_empty())
        .count()
}

/// Length of `text` in UTF-16 code units.
///
/// This is the length an editor widget reports, which is what the character
/// count shown next to a prompt means.
pub fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Estimate the total syllables in `text`.
///
/// Tokens of three characters or fewer count as one syllable each; longer
/// tokens go through [`estimate_syllables`].
pub fn count_syllables(text: &str) -> usize {
    text.to_lowercase()
        .split_whitespace()
        .map(|token| {
            if token.chars().count() <= 3 {
                1
            } else {
                estimate_syllables(token)
            }
        })
        .sum()
}

/// Heuristic syllable estimate for a single lower-cased token.
///
/// Drops everything outside `a-z`, strips a silent suffix (`ed`, or `e`/`es`
/// after a hard consonant) and a leading `y`, then counts runs of vowels.
/// Always returns at least 1.
pub fn estimate_syllables(token: &str) -> usize {
    let letters: String = token.chars().filter(char::is_ascii_lowercase).collect();
    let stem = strip_silent_suffix(&letters);
    let stem = stem.strip_prefix('y').unwrap_or(stem);

    let runs = vowel_runs(stem);
    runs.max(1)
}

/// Extract lower-cased words with surrounding punctuation removed.
pub fn extract_words(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'' && c != '-'))
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

const fn is_sentence_terminator(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?')
}

fn strip_silent_suffix(word: &str) -> &str {
    if let Some(stem) = word.strip_suffix("ed") {
        return stem;
    }
    for suffix in ["es", "e"] {
        if let Some(stem) = word.strip_suffix(suffix)
            && stem.chars().last().is_some_and(|c| !SOFT_LETTERS.contains(&c))
        {
            return stem;
        }
    }
    word
}

fn vowel_runs(word: &str) -> usize {
    let mut runs = 0;
    let mut in_run = false;
    for ch in word.chars() {
        let vowel = VOWELS.contains(&ch);
        if vowel && !in_run {
            runs += 1;
        }
        in_run = vowel;
    }
    runs
}
