//! Full vocabulary and complexity analysis.
//!
//! [`analyze`] tokenizes and splits the text once, fans out to every
//! calculator, and assembles a single [`AnalysisReport`]. Each calculator is
//! a pure function in its own module and can also be called directly.
//!
//! The report is a pure function of the text and the cloze random source.
//! Pass a seed in [`AnalyzeOptions`] (or use [`analyze_with_rng`]) for
//! reproducible output.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::cloze::{self, ClozeTest, DEFAULT_BLANKS};
use crate::diversity;
use crate::level::{self, CefrLevel, ComplexityBreakdown, ComplexityInputs};
use crate::ngrams::{self, NgramCount};
use crate::pos::{self, PosDistribution};
use crate::readability::{ReadabilityScores, TextCounts};
use crate::syntax;
use crate::text;

/// Knobs for a single [`analyze`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyzeOptions {
    /// Number of distinct words to blank in the cloze test.
    pub cloze_blanks: usize,
    /// Seed for cloze word selection. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            cloze_blanks: DEFAULT_BLANKS,
            seed: None,
        }
    }
}

impl AnalyzeOptions {
    /// Set the number of cloze blanks.
    pub const fn with_blanks(mut self, blanks: usize) -> Self {
        self.cloze_blanks = blanks;
        self
    }

    /// Fix the cloze seed.
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The random source these options describe.
    pub fn rng(&self) -> ChaCha8Rng {
        match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        }
    }
}

/// Everything computed for one text.
///
/// Always fully populated; for empty input every number is zero, the
/// histograms are empty, and the level is [`CefrLevel::A1`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AnalysisReport {
    /// Level derived from [`complexity_score`](Self::complexity_score).
    pub overall_level: CefrLevel,
    /// Flesch-Kincaid Grade Level.
    pub flesch_kincaid_grade: f64,
    /// Flesch Reading Ease.
    pub flesch_reading_ease: f64,
    /// Gunning Fog Index.
    pub gunning_fog_index: f64,
    /// SMOG Index; `0.0` for fewer than 30 sentences.
    pub smog_index: f64,
    /// Distinct tokens over total tokens.
    pub type_token_ratio: f64,
    /// Measure of Textual Lexical Diversity.
    pub mtld: f64,
    /// Words per sentence.
    pub avg_sentence_length: f64,
    /// Clauses per sentence.
    pub clause_density: f64,
    /// Tag histogram; sums to the token count.
    pub pos_distribution: PosDistribution,
    /// Up to ten most frequent bigrams, most frequent first.
    pub top_bigrams: Vec<NgramCount>,
    /// Cloze text: tokens joined by spaces with chosen words blanked.
    pub cloze_text: String,
    /// Words blanked in [`cloze_text`](Self::cloze_text).
    pub blanked_words: Vec<String>,
    /// Composite score the level was derived from.
    pub complexity_score: f64,
    /// Counts the readability formulas used.
    pub counts: TextCounts,
    /// The weighted terms summing to the complexity score.
    pub complexity_breakdown: ComplexityBreakdown,
}

impl AnalysisReport {
    /// The four readability scores as one value.
    pub const fn readability_scores(&self) -> ReadabilityScores {
        ReadabilityScores {
            flesch_kincaid_grade: self.flesch_kincaid_grade,
            flesch_reading_ease: self.flesch_reading_ease,
            gunning_fog_index: self.gunning_fog_index,
            smog_index: self.smog_index,
        }
    }
}

/// Analyze `text`.
///
/// Infallible: any string, including an empty one, produces a report.
#[tracing::instrument(skip(text), fields(text_len = text.len()))]
pub fn analyze(text: &str, options: &AnalyzeOptions) -> AnalysisReport {
    let mut rng = options.rng();
    analyze_with_rng(text, options.cloze_blanks, &mut rng)
}

/// Analyze `text`, drawing cloze words from the supplied random source.
#[tracing::instrument(skip(text, rng), fields(text_len = text.len()))]
pub fn analyze_with_rng<R: Rng + ?Sized>(
    text: &str,
    cloze_blanks: usize,
    rng: &mut R,
) -> AnalysisReport {
    let tokens = text::tokenize(text);
    let sentences = text::split_sentences(text);

    let counts = TextCounts::from_parts(&tokens, sentences.len());
    let scores = ReadabilityScores::from_counts(&counts);

    let type_token_ratio = diversity::type_token_ratio(&tokens);
    let mtld = diversity::mtld(&tokens);

    let avg_sentence_length = syntax::avg_sentence_length(tokens.len(), sentences.len());
    let clause_density = syntax::clause_density(&sentences);

    let tags = pos::tag_tokens(&tokens);
    let pos_distribution = PosDistribution::from_tags(&tags);

    let top_bigrams = ngrams::top_bigrams(&tokens);

    let cloze = cloze::generate_cloze(&tokens, &tags, cloze_blanks, rng);

    let complexity_breakdown = ComplexityBreakdown::from_inputs(&ComplexityInputs {
        scores: &scores,
        type_token_ratio,
        avg_sentence_length,
        clause_density,
        pos: &pos_distribution,
    });
    let complexity_score = complexity_breakdown.score();
    let overall_level = level::classify(complexity_score);

    tracing::debug!(
        words = counts.words,
        sentences = counts.sentences,
        complexity_score,
        level = %overall_level,
        "analysis complete"
    );

    AnalysisReport {
        overall_level,
        flesch_kincaid_grade: scores.flesch_kincaid_grade,
        flesch_reading_ease: scores.flesch_reading_ease,
        gunning_fog_index: scores.gunning_fog_index,
        smog_index: scores.smog_index,
        type_token_ratio,
        mtld,
        avg_sentence_length,
        clause_density,
        pos_distribution,
        top_bigrams,
        cloze_text: cloze.text,
        blanked_words: cloze.blanked_words,
        complexity_score,
        counts,
        complexity_breakdown,
    }
}

/// Build only the cloze test for `text`, skipping the metrics.
#[tracing::instrument(skip(text), fields(text_len = text.len()))]
pub fn build_cloze(text: &str, options: &AnalyzeOptions) -> ClozeTest {
    let tokens = text::tokenize(text);
    let tags = pos::tag_tokens(&tokens);
    cloze::generate_cloze(&tokens, &tags, options.cloze_blanks, &mut options.rng())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pos::PosTag;

    const SIMPLE: &str = "I like cats. My cat is small. It is black. We play every day.";

    const COMPLEX: &str = "Although contemporary epidemiological investigations \
        have substantially illuminated the multifactorial determinants of \
        cardiovascular morbidity, considerable uncertainty persists regarding \
        the comparative contributions of socioeconomic deprivation, environmental \
        exposures, and heritable predispositions, particularly because \
        longitudinal observational methodologies frequently encounter \
        confounding variables whose interrelationships remain insufficiently \
        characterized.";

    fn seeded() -> AnalyzeOptions {
        AnalyzeOptions::default().with_seed(11)
    }

    #[test]
    fn empty_input_is_all_zero() {
        let report = analyze("", &seeded());
        assert_eq!(report.overall_level, CefrLevel::A1);
        assert_eq!(report.flesch_kincaid_grade, 0.0);
        assert_eq!(report.flesch_reading_ease, 0.0);
        assert_eq!(report.gunning_fog_index, 0.0);
        assert_eq!(report.smog_index, 0.0);
        assert_eq!(report.type_token_ratio, 0.0);
        assert_eq!(report.mtld, 0.0);
        assert_eq!(report.avg_sentence_length, 0.0);
        assert_eq!(report.clause_density, 0.0);
        assert_eq!(report.complexity_score, 0.0);
        assert!(report.pos_distribution.is_empty());
        assert!(report.top_bigrams.is_empty());
        assert!(report.cloze_text.is_empty());
        assert!(report.blanked_words.is_empty());
    }

    #[test]
    fn whitespace_only_is_all_zero() {
        let report = analyze("  \n ", &seeded());
        assert_eq!(report.counts, TextCounts::default());
        assert_eq!(report.complexity_score, 0.0);
    }

    #[test]
    fn simple_text_is_easier_than_complex_text() {
        let simple = analyze(SIMPLE, &seeded());
        let complex = analyze(COMPLEX, &seeded());
        assert!(simple.complexity_score < complex.complexity_score);
        assert!(simple.overall_level < complex.overall_level);
        assert_eq!(simple.overall_level, CefrLevel::A1);
        assert_eq!(complex.overall_level, CefrLevel::B2);
    }

    #[test]
    fn level_matches_score() {
        for text in [SIMPLE, COMPLEX] {
            let report = analyze(text, &seeded());
            assert_eq!(report.overall_level, level::classify(report.complexity_score));
        }
    }

    #[test]
    fn pos_histogram_sums_to_tokens() {
        let report = analyze(SIMPLE, &seeded());
        assert_eq!(report.pos_distribution.total(), report.counts.words);
        assert_eq!(report.pos_distribution.count(PosTag::Vb), 2);
        assert_eq!(report.pos_distribution.count(PosTag::Jj), 0);
    }

    #[test]
    fn same_seed_is_deterministic() {
        let first = analyze(COMPLEX, &seeded());
        let second = analyze(COMPLEX, &seeded());
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn requested_blanks_are_honored() {
        let report = analyze(COMPLEX, &AnalyzeOptions::default().with_blanks(3).with_seed(5));
        assert_eq!(report.blanked_words.len(), 3);
        for word in &report.blanked_words {
            assert!(!report.cloze_text.split(' ').any(|w| w == word));
        }
    }

    #[test]
    fn standalone_cloze_matches_full_analysis() {
        let options = AnalyzeOptions::default().with_blanks(3).with_seed(21);
        let report = analyze(COMPLEX, &options);
        let cloze = build_cloze(COMPLEX, &options);
        assert_eq!(cloze.text, report.cloze_text);
        assert_eq!(cloze.blanked_words, report.blanked_words);
    }

    #[test]
    fn readability_scores_agree_with_standalone_check() {
        let report = analyze(COMPLEX, &seeded());
        let standalone = crate::readability::check_readability(COMPLEX);
        assert_eq!(report.readability_scores(), standalone.scores);
    }

    #[test]
    fn bigram_example() {
        let report = analyze("the cat sat. the cat ran.", &seeded());
        let top = &report.top_bigrams[0];
        assert_eq!(top.ngram, vec!["the", "cat"]);
        assert_eq!(top.count, 2);
        assert_eq!(report.counts.sentences, 2);
    }

    #[test]
    fn breakdown_sums_to_score() {
        let report = analyze(COMPLEX, &seeded());
        assert_eq!(report.complexity_breakdown.score(), report.complexity_score);
        assert_eq!(report.complexity_breakdown.adjectives, 0.0);
    }

    #[test]
    fn serializes_expected_fields() {
        let report = analyze("The cat sat.", &seeded());
        let json = serde_json::to_value(&report).unwrap();
        for field in [
            "overall_level",
            "flesch_kincaid_grade",
            "flesch_reading_ease",
            "gunning_fog_index",
            "smog_index",
            "type_token_ratio",
            "mtld",
            "avg_sentence_length",
            "clause_density",
            "pos_distribution",
            "top_bigrams",
            "cloze_text",
            "blanked_words",
            "complexity_score",
        ] {
            assert!(json.get(field).is_some(), "missing {field}");
        }
        assert_eq!(json["overall_level"], "A1");
    }
}
