//! Readability formulas: Flesch-Kincaid Grade, Flesch Reading Ease,
//! Gunning Fog, and SMOG.
//!
//! All four work from the same [`TextCounts`]: words `W`, sentences `S`,
//! syllables `Y`, and polysyllabic words `P` (three or more syllables).
//!
//! | Metric | Formula |
//! |---|---|
//! | Flesch-Kincaid Grade | `0.39 * (W/S) + 11.8 * (Y/W) - 15.59` |
//! | Flesch Reading Ease | `206.835 - 1.015 * (W/S) - 84.6 * (Y/W)` |
//! | Gunning Fog | `0.4 * ((W/S) + 100 * (P/W))` |
//! | SMOG | `1.0430 * sqrt(P * (30/S)) + 3.1291` |
//!
//! Every score is rounded to one decimal and is `0.0` when `W` or `S` is
//! zero. SMOG is only defined for samples of at least
//! [`SMOG_MIN_SENTENCES`] sentences; below that it reports `0.0`, which
//! means "not computed" rather than "trivially simple".

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::syllables;
use crate::text;

/// Minimum sentence count for a SMOG estimate.
pub const SMOG_MIN_SENTENCES: usize = 30;

/// Raw counts the readability formulas are built from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TextCounts {
    /// Number of word tokens.
    pub words: usize,
    /// Number of sentences.
    pub sentences: usize,
    /// Total estimated syllables across all tokens.
    pub syllables: usize,
    /// Tokens with three or more syllables.
    pub polysyllables: usize,
}

impl TextCounts {
    /// Build counts from an already tokenized text.
    pub fn from_parts(tokens: &[String], sentence_count: usize) -> Self {
        Self {
            words: tokens.len(),
            sentences: sentence_count,
            syllables: syllables::total_syllables(tokens),
            polysyllables: syllables::polysyllable_count(tokens),
        }
    }

    /// Tokenize and split `text`, then count.
    pub fn from_text(text: &str) -> Self {
        let tokens = text::tokenize(text);
        let sentences = text::split_sentences(text);
        Self::from_parts(&tokens, sentences.len())
    }

    const fn is_degenerate(&self) -> bool {
        self.words == 0 || self.sentences == 0
    }

    fn words_per_sentence(&self) -> f64 {
        self.words as f64 / self.sentences as f64
    }

    fn syllables_per_word(&self) -> f64 {
        self.syllables as f64 / self.words as f64
    }
}

/// The four readability scores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReadabilityScores {
    /// Flesch-Kincaid Grade Level (US school grade).
    pub flesch_kincaid_grade: f64,
    /// Flesch Reading Ease (higher = easier, typically 0–100).
    pub flesch_reading_ease: f64,
    /// Gunning Fog Index (years of schooling).
    pub gunning_fog_index: f64,
    /// SMOG Index; `0.0` below [`SMOG_MIN_SENTENCES`] sentences.
    pub smog_index: f64,
}

impl ReadabilityScores {
    /// Compute all four scores from the same counts.
    pub fn from_counts(counts: &TextCounts) -> Self {
        Self {
            flesch_kincaid_grade: flesch_kincaid_grade(counts),
            flesch_reading_ease: flesch_reading_ease(counts),
            gunning_fog_index: gunning_fog_index(counts),
            smog_index: smog_index(counts),
        }
    }
}

/// Readability scores together with the counts that produced them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReadabilityReport {
    /// Word, sentence, and syllable counts.
    #[serde(flatten)]
    pub counts: TextCounts,
    /// The computed scores.
    #[serde(flatten)]
    pub scores: ReadabilityScores,
    /// Whether the SMOG score was actually computed.
    pub smog_reliable: bool,
}

/// Score the readability of `text`.
///
/// Never fails: empty input yields zero counts and zero scores.
#[tracing::instrument(skip(text), fields(text_len = text.len()))]
pub fn check_readability(text: &str) -> ReadabilityReport {
    let counts = TextCounts::from_text(text);
    let scores = ReadabilityScores::from_counts(&counts);
    tracing::debug!(
        words = counts.words,
        sentences = counts.sentences,
        grade = scores.flesch_kincaid_grade,
        "readability scored"
    );

    ReadabilityReport {
        counts,
        scores,
        smog_reliable: smog_is_reliable(&counts),
    }
}

/// Flesch-Kincaid Grade Level, rounded to one decimal.
// Keep unfused: mul_add moves some grades across an x.x5 rounding boundary.
#[allow(clippy::suboptimal_flops)]
pub fn flesch_kincaid_grade(counts: &TextCounts) -> f64 {
    if counts.is_degenerate() {
        return 0.0;
    }
    let grade = 0.39 * counts.words_per_sentence() + 11.8 * counts.syllables_per_word() - 15.59;
    round1(grade)
}

/// Flesch Reading Ease, rounded to one decimal.
pub fn flesch_reading_ease(counts: &TextCounts) -> f64 {
    if counts.is_degenerate() {
        return 0.0;
    }
    let ease = 206.835
        - 1.015 * counts.words_per_sentence()
        - 84.6 * counts.syllables_per_word();
    round1(ease)
}

/// Gunning Fog Index, rounded to one decimal.
pub fn gunning_fog_index(counts: &TextCounts) -> f64 {
    if counts.is_degenerate() {
        return 0.0;
    }
    let complex_ratio = counts.polysyllables as f64 / counts.words as f64;
    round1(0.4 * (counts.words_per_sentence() + 100.0 * complex_ratio))
}

/// SMOG Index, rounded to one decimal; `0.0` for short samples.
#[allow(clippy::suboptimal_flops)]
pub fn smog_index(counts: &TextCounts) -> f64 {
    if !smog_is_reliable(counts) {
        return 0.0;
    }
    let scaled = counts.polysyllables as f64 * (30.0 / counts.sentences as f64);
    round1(1.0430 * scaled.sqrt() + 3.1291)
}

const fn smog_is_reliable(counts: &TextCounts) -> bool {
    !counts.is_degenerate() && counts.sentences >= SMOG_MIN_SENTENCES
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}
