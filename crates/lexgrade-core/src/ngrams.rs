//! N-gram frequency counting.

use std::collections::HashMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Number of bigrams kept in an analysis report.
pub const TOP_BIGRAMS: usize = 10;

/// One n-gram and how often it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct NgramCount {
    /// The consecutive tokens, in text order.
    pub ngram: Vec<String>,
    /// Occurrences in the token sequence.
    pub count: usize,
}

/// Count every run of `n` consecutive tokens.
///
/// Entries are in order of first appearance. `n == 0` or fewer than `n`
/// tokens yields an empty table.
pub fn ngram_frequency(tokens: &[String], n: usize) -> Vec<NgramCount> {
    if n == 0 {
        return Vec::new();
    }

    let mut index: HashMap<&[String], usize> = HashMap::new();
    let mut counts: Vec<NgramCount> = Vec::new();

    for window in tokens.windows(n) {
        if let Some(&slot) = index.get(window) {
            counts[slot].count += 1;
        } else {
            index.insert(window, counts.len());
            counts.push(NgramCount {
                ngram: window.to_vec(),
                count: 1,
            });
        }
    }

    counts
}

/// Count consecutive token pairs.
pub fn bigram_frequency(tokens: &[String]) -> Vec<NgramCount> {
    ngram_frequency(tokens, 2)
}

/// The `limit` most frequent entries, highest count first.
///
/// Ties keep first-appearance order.
pub fn most_common(mut counts: Vec<NgramCount>, limit: usize) -> Vec<NgramCount> {
    // sort_by is stable, so equal counts stay in appearance order.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(limit);
    counts
}

/// The [`TOP_BIGRAMS`] most frequent bigrams.
#[tracing::instrument(skip_all, fields(tokens = tokens.len()))]
pub fn top_bigrams(tokens: &[String]) -> Vec<NgramCount> {
    most_common(bigram_frequency(tokens), TOP_BIGRAMS)
}
