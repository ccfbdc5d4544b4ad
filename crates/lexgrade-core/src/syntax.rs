//! Syntactic metrics: average sentence length and clause density.

/// Words whose presence in a sentence signals an additional clause.
pub const CLAUSE_MARKERS: &[&str] = &[
    "and", "but", "because", "if", "when", "while", "although", "as", "since", "unless", "though",
    "whereas", "whether",
];

/// Words per sentence; `0.0` when there are no sentences.
pub fn avg_sentence_length(word_count: usize, sentence_count: usize) -> f64 {
    if sentence_count == 0 {
        return 0.0;
    }
    word_count as f64 / sentence_count as f64
}

/// Estimated clauses in one sentence: 1 plus the number of distinct
/// markers found.
///
/// Markers are matched case-insensitively as substrings, so `as` is found
/// in "was" and `if` in "different". A marker counts once however often it
/// appears.
pub fn clause_count(sentence: &str) -> usize {
    let lowered = sentence.to_lowercase();
    1 + CLAUSE_MARKERS
        .iter()
        .filter(|marker| lowered.contains(*marker))
        .count()
}

/// Mean [`clause_count`] over all sentences; `0.0` when there are none.
pub fn clause_density<S: AsRef<str>>(sentences: &[S]) -> f64 {
    if sentences.is_empty() {
        return 0.0;
    }
    let total: usize = sentences.iter().map(|s| clause_count(s.as_ref())).sum();
    total as f64 / sentences.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_length() {
        assert_eq!(avg_sentence_length(12, 3), 4.0);
        assert_eq!(avg_sentence_length(7, 2), 3.5);
    }

    #[test]
    fn average_length_without_sentences() {
        assert_eq!(avg_sentence_length(0, 0), 0.0);
        assert_eq!(avg_sentence_length(5, 0), 0.0);
    }

    #[test]
    fn simple_sentence_has_one_clause() {
        assert_eq!(clause_count("The cat sat."), 1);
    }

    #[test]
    fn each_marker_type_counts_once() {
        assert_eq!(clause_count("Tom and Ann and Bob and Sue left."), 2);
    }

    #[test]
    fn distinct_markers_add_up() {
        // because, but, and "as" inside "was"
        assert_eq!(clause_count("I stayed home because it rained, but I was happy."), 4);
    }

    #[test]
    fn markers_are_case_insensitive_substrings() {
        assert_eq!(clause_count("BUT"), 2);
        // "band" contains "and"; "passive" contains "as"
        assert_eq!(clause_count("A passive band"), 3);
    }

    #[test]
    fn density_is_mean_over_sentences() {
        let sentences = ["Run.", "Stop but wait."];
        assert_eq!(clause_density(&sentences), 1.5);
    }

    #[test]
    fn density_without_sentences() {
        let empty: [&str; 0] = [];
        assert_eq!(clause_density(&empty), 0.0);
    }
}
