//! Property tests for the analysis engine.

use std::collections::HashSet;

use lexgrade_core::cloze::{BLANK, content_words};
use lexgrade_core::level::classify;
use lexgrade_core::pos::tag_tokens;
use lexgrade_core::syllables::count_syllables;
use lexgrade_core::text::tokenize;
use lexgrade_core::{AnalyzeOptions, analyze};
use proptest::prelude::*;

/// Prose-like text: lower-case words with occasional sentence breaks.
fn prose() -> impl Strategy<Value = String> {
    let separator = prop::sample::select(vec![" ", " ", " ", ". ", "! ", ", "]);
    prop::collection::vec(("[a-z]{1,12}", separator), 0..80).prop_map(|pieces| {
        pieces
            .into_iter()
            .map(|(word, sep)| format!("{word}{sep}"))
            .collect()
    })
}

proptest! {
    #[test]
    fn never_panics(text in ".*", seed in any::<u64>()) {
        let report = analyze(&text, &AnalyzeOptions::default().with_seed(seed));
        prop_assert_eq!(report.pos_distribution.total(), report.counts.words);
    }

    #[test]
    fn histogram_sums_to_token_count(text in prose()) {
        let report = analyze(&text, &AnalyzeOptions::default().with_seed(0));
        prop_assert_eq!(report.pos_distribution.total(), tokenize(&text).len());
    }

    #[test]
    fn type_token_ratio_is_bounded(text in prose()) {
        let report = analyze(&text, &AnalyzeOptions::default().with_seed(0));
        prop_assert!((0.0..=1.0).contains(&report.type_token_ratio));
        if report.counts.words > 0 {
            prop_assert!(report.type_token_ratio > 0.0);
            prop_assert!(report.counts.sentences > 0);
        }
    }

    #[test]
    fn level_follows_score(text in prose()) {
        let report = analyze(&text, &AnalyzeOptions::default().with_seed(0));
        prop_assert_eq!(report.overall_level, classify(report.complexity_score));
    }

    #[test]
    fn same_seed_same_report(text in prose(), seed in any::<u64>()) {
        let options = AnalyzeOptions::default().with_seed(seed);
        prop_assert_eq!(analyze(&text, &options), analyze(&text, &options));
    }

    #[test]
    fn cloze_blanks_are_sound(text in prose(), blanks in 0usize..12, seed in any::<u64>()) {
        let report = analyze(&text, &AnalyzeOptions::default().with_blanks(blanks).with_seed(seed));

        let tokens = tokenize(&text);
        let candidates = content_words(&tokens, &tag_tokens(&tokens)).len();
        prop_assert_eq!(report.blanked_words.len(), blanks.min(candidates));
        let distinct: HashSet<_> = report.blanked_words.iter().collect();
        prop_assert_eq!(distinct.len(), report.blanked_words.len());

        let cloze_words: Vec<&str> = if report.cloze_text.is_empty() {
            Vec::new()
        } else {
            report.cloze_text.split(' ').collect()
        };
        prop_assert_eq!(cloze_words.len(), report.counts.words);
        for word in &report.blanked_words {
            prop_assert!(!cloze_words.contains(&word.as_str()));
        }
        if !report.blanked_words.is_empty() {
            prop_assert!(cloze_words.contains(&BLANK));
        }
    }

    #[test]
    fn every_word_has_a_syllable(word in "[a-z]{1,20}") {
        prop_assert!(count_syllables(&word) >= 1);
    }
}
