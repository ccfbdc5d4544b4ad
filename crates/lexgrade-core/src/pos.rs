//! Rule-based part-of-speech tagging.
//!
//! A fixed list of rules, first match wins:
//!
//! 1. `the`, `a`, `an` → [`PosTag::Dt`]
//! 2. `is`, `am`, `are`, `was`, `were` → [`PosTag::Vb`]
//! 3. ends in `ly` → [`PosTag::Rb`]
//! 4. ends in `ed` → [`PosTag::Vbd`]
//! 5. ends in `ing` → [`PosTag::Vbg`]
//! 6. `i`, `you`, `he`, `she`, `it`, `we`, `they` → [`PosTag::Prp`]
//! 7. anything else → [`PosTag::Nn`]
//!
//! This is a coarse approximation: "family" is tagged as an adverb and
//! "thing" as a gerund. It never produces [`PosTag::Jj`].

use std::collections::BTreeMap;
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

const DETERMINERS: &[&str] = &["the", "a", "an"];
const BE_FORMS: &[&str] = &["is", "am", "are", "was", "were"];
const PRONOUNS: &[&str] = &["i", "you", "he", "she", "it", "we", "they"];

/// Word-class tag assigned by [`tag_word`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum PosTag {
    /// Determiner.
    #[serde(rename = "DT")]
    Dt,
    /// Form of "to be".
    #[serde(rename = "VB")]
    Vb,
    /// Adverb-like (`-ly`).
    #[serde(rename = "RB")]
    Rb,
    /// Past-tense-like (`-ed`).
    #[serde(rename = "VBD")]
    Vbd,
    /// Gerund-like (`-ing`).
    #[serde(rename = "VBG")]
    Vbg,
    /// Personal pronoun.
    #[serde(rename = "PRP")]
    Prp,
    /// Default class; anything no other rule matched.
    #[serde(rename = "NN")]
    Nn,
    /// Adjective. Part of the tag vocabulary but never emitted by the rules.
    #[serde(rename = "JJ")]
    Jj,
}

impl PosTag {
    /// Every tag, in display order.
    pub const ALL: [Self; 8] = [
        Self::Dt,
        Self::Vb,
        Self::Rb,
        Self::Vbd,
        Self::Vbg,
        Self::Prp,
        Self::Nn,
        Self::Jj,
    ];

    /// Returns the conventional tag name (`"DT"`, `"VBG"`, ...).
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Dt => "DT",
            Self::Vb => "VB",
            Self::Rb => "RB",
            Self::Vbd => "VBD",
            Self::Vbg => "VBG",
            Self::Prp => "PRP",
            Self::Nn => "NN",
            Self::Jj => "JJ",
        }
    }

    /// Whether words with this tag carry lexical meaning.
    ///
    /// True for every tag whose name starts with `NN`, `VB`, `JJ`, or `RB`.
    pub fn is_content(&self) -> bool {
        ["NN", "VB", "JJ", "RB"]
            .iter()
            .any(|prefix| self.as_str().starts_with(prefix))
    }
}

impl fmt::Display for PosTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tag a single lower-cased token.
pub fn tag_word(word: &str) -> PosTag {
    if DETERMINERS.contains(&word) {
        PosTag::Dt
    } else if BE_FORMS.contains(&word) {
        PosTag::Vb
    } else if word.ends_with("ly") {
        PosTag::Rb
    } else if word.ends_with("ed") {
        PosTag::Vbd
    } else if word.ends_with("ing") {
        PosTag::Vbg
    } else if PRONOUNS.contains(&word) {
        PosTag::Prp
    } else {
        PosTag::Nn
    }
}

/// Tag every token, preserving order.
pub fn tag_tokens(tokens: &[String]) -> Vec<PosTag> {
    tokens.iter().map(|t| tag_word(t)).collect()
}

/// Histogram of tags. Only tags that occurred are present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct PosDistribution(BTreeMap<PosTag, usize>);

impl PosDistribution {
    /// Count the tags in `tags`.
    pub fn from_tags(tags: &[PosTag]) -> Self {
        let mut counts = BTreeMap::new();
        for tag in tags {
            *counts.entry(*tag).or_insert(0) += 1;
        }
        Self(counts)
    }

    /// Occurrences of `tag`; zero if absent.
    pub fn count(&self, tag: PosTag) -> usize {
        self.0.get(&tag).copied().unwrap_or(0)
    }

    /// Share of all tagged tokens carrying `tag`; `0.0` when empty.
    pub fn proportion(&self, tag: PosTag) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.count(tag) as f64 / total as f64
    }

    /// Sum of all counts; equals the number of tagged tokens.
    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    /// Whether no tokens were tagged.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate `(tag, count)` pairs in tag order.
    pub fn iter(&self) -> impl Iterator<Item = (PosTag, usize)> + '_ {
        self.0.iter().map(|(tag, count)| (*tag, *count))
    }
}
