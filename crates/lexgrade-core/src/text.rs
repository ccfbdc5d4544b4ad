//! Text processing utilities.
//!
//! Provides word tokenization and sentence splitting. Every downstream
//! calculator consumes the output of these two functions; neither ever
//! reconstructs sentences from tokens.

use regex::Regex;
use std::sync::LazyLock;

/// A maximal run of word characters (letters, digits, underscore).
static WORD_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").expect("valid regex"));

/// Terminal punctuation followed by the whitespace that separates sentences.
static SENTENCE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]\s+").expect("valid regex"));

/// Split text into lower-cased word tokens, in order of appearance.
///
/// Punctuation and whitespace are discarded. Apostrophes and hyphens split
/// words (`don't` yields `don` and `t`).
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    WORD_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Split text into sentences at whitespace that follows `.`, `!`, or `?`.
///
/// The terminal punctuation stays with its sentence. A trailing fragment
/// without punctuation is still a sentence. Empty and whitespace-only
/// pieces are dropped, so blank input yields no sentences.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for m in SENTENCE_BREAK.find_iter(text) {
        // The punctuation mark is a single ASCII byte.
        push_piece(&mut sentences, &text[start..=m.start()]);
        start = m.end();
    }
    push_piece(&mut sentences, &text[start..]);

    sentences
}

fn push_piece<'a>(sentences: &mut Vec<&'a str>, piece: &'a str) {
    if !piece.trim().is_empty() {
        sentences.push(piece);
    }
}

/// Count whitespace-separated words, the measure used for length targets.
pub fn whitespace_word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
