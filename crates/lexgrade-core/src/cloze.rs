//! Cloze (fill-in-the-blank) test generation.
//!
//! Words to blank are sampled from the distinct content words of the text
//! (see [`PosTag::is_content`]). Every occurrence of a chosen word is
//! replaced, so the answer list never contains duplicates. The random
//! source is always passed in; there is no global generator.

use std::collections::HashSet;

use rand::Rng;
use rand::seq::index;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::pos::PosTag;

/// Marker that replaces a blanked word.
pub const BLANK: &str = "_____";

/// Blanks requested when the caller does not say otherwise.
pub const DEFAULT_BLANKS: usize = 5;

/// A generated cloze test.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ClozeTest {
    /// The tokens joined by single spaces, with chosen words replaced by [`BLANK`].
    pub text: String,
    /// The chosen words, in the order they were drawn.
    pub blanked_words: Vec<String>,
}

impl ClozeTest {
    /// Number of blank positions in the text.
    pub fn blank_count(&self) -> usize {
        self.text.split(' ').filter(|w| *w == BLANK).count()
    }
}

/// Distinct content words, in order of first appearance.
pub fn content_words<'a>(tokens: &'a [String], tags: &[PosTag]) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    tokens
        .iter()
        .zip(tags)
        .filter(|(_, tag)| tag.is_content())
        .map(|(token, _)| token.as_str())
        .filter(|token| seen.insert(*token))
        .collect()
}

/// Blank up to `blanks` distinct content words chosen uniformly at random.
///
/// The count is clamped to the number of distinct content words, so asking
/// for more than exist (or for zero) is never an error.
#[tracing::instrument(skip(tokens, tags, rng), fields(tokens = tokens.len()))]
pub fn generate_cloze<R: Rng + ?Sized>(
    tokens: &[String],
    tags: &[PosTag],
    blanks: usize,
    rng: &mut R,
) -> ClozeTest {
    let candidates = content_words(tokens, tags);
    let amount = blanks.min(candidates.len());

    let blanked_words: Vec<String> = index::sample(rng, candidates.len(), amount)
        .into_iter()
        .map(|i| candidates[i].to_string())
        .collect();

    let chosen: HashSet<&str> = blanked_words.iter().map(String::as_str).collect();
    let text = tokens
        .iter()
        .map(|token| {
            if chosen.contains(token.as_str()) {
                BLANK
            } else {
                token.as_str()
            }
        })
        .collect::<Vec<_>>()
        .join(" ");

    tracing::debug!(
        candidates = candidates.len(),
        blanked = blanked_words.len(),
        "cloze generated"
    );

    ClozeTest {
        text,
        blanked_words,
    }
}
