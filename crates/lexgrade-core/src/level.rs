//! Composite complexity scoring and CEFR level classification.
//!
//! The readability scores are first normalized into a single
//! `readability_score`:
//!
//! ```text
//! (FK/12 + (100 - FRE)/100 + Fog/18 + SMOG/18) / 4
//! ```
//!
//! which is then weighted with lexical, syntactic, and tag-ratio terms:
//!
//! | Term | Weight |
//! |---|---|
//! | readability score | 0.40 |
//! | `1 - TTR` | 0.20 |
//! | `min(avg sentence length / 20, 1)` | 0.20 |
//! | `min(clause density / 3, 1)` | 0.10 |
//! | share of `VB` tags | 0.05 |
//! | share of `JJ` tags | 0.05 |
//!
//! The tagger never emits `JJ`, so the last term is always zero. It is kept
//! so that scores stay comparable with previously reported values.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::pos::{PosDistribution, PosTag};
use crate::readability::ReadabilityScores;

/// Scores below this are [`CefrLevel::A1`].
pub const A2_THRESHOLD: f64 = 0.35;
/// Scores below this (and at least [`A2_THRESHOLD`]) are [`CefrLevel::A2`].
pub const B1_THRESHOLD: f64 = 0.55;
/// Scores below this (and at least [`B1_THRESHOLD`]) are [`CefrLevel::B1`].
pub const B2_THRESHOLD: f64 = 0.75;

/// CEFR proficiency level, ordered from easiest to hardest.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum CefrLevel {
    /// Beginner.
    #[default]
    #[cfg_attr(feature = "clap", value(name = "A1", alias = "a1"))]
    A1,
    /// Elementary.
    #[cfg_attr(feature = "clap", value(name = "A2", alias = "a2"))]
    A2,
    /// Intermediate.
    #[cfg_attr(feature = "clap", value(name = "B1", alias = "b1"))]
    B1,
    /// Upper intermediate.
    #[cfg_attr(feature = "clap", value(name = "B2", alias = "b2"))]
    B2,
}

impl CefrLevel {
    /// Every level, easiest first.
    pub const ALL: [Self; 4] = [Self::A1, Self::A2, Self::B1, Self::B2];

    /// Returns the level code (`"A1"`, ...).
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::A1 => "A1",
            Self::A2 => "A2",
            Self::B1 => "B1",
            Self::B2 => "B2",
        }
    }

    /// Short human-readable name of the level.
    pub const fn description(&self) -> &'static str {
        match self {
            Self::A1 => "beginner",
            Self::A2 => "elementary",
            Self::B1 => "intermediate",
            Self::B2 => "upper intermediate",
        }
    }
}

impl fmt::Display for CefrLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown level code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown CEFR level: {0} (expected A1, A2, B1, or B2)")]
pub struct ParseLevelError(String);

impl FromStr for CefrLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseLevelError(s.to_string()))
    }
}

/// Map a complexity score to a level. Lower bounds are inclusive.
pub fn classify(score: f64) -> CefrLevel {
    if score < A2_THRESHOLD {
        CefrLevel::A1
    } else if score < B1_THRESHOLD {
        CefrLevel::A2
    } else if score < B2_THRESHOLD {
        CefrLevel::B1
    } else {
        CefrLevel::B2
    }
}

/// Collapse the four readability scores into one roughly 0–1 value.
pub fn readability_score(scores: &ReadabilityScores) -> f64 {
    (scores.flesch_kincaid_grade / 12.0
        + (100.0 - scores.flesch_reading_ease) / 100.0
        + scores.gunning_fog_index / 18.0
        + scores.smog_index / 18.0)
        / 4.0
}

/// Everything the composite score is computed from.
#[derive(Debug, Clone, Copy)]
pub struct ComplexityInputs<'a> {
    /// Rounded readability scores.
    pub scores: &'a ReadabilityScores,
    /// Type-token ratio.
    pub type_token_ratio: f64,
    /// Words per sentence.
    pub avg_sentence_length: f64,
    /// Clauses per sentence.
    pub clause_density: f64,
    /// Tag histogram; its total is the token count.
    pub pos: &'a PosDistribution,
}

/// Each weighted term of the composite score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ComplexityBreakdown {
    /// `0.40 * readability_score`.
    pub readability: f64,
    /// `0.20 * (1 - TTR)`.
    pub lexical: f64,
    /// `0.20 * min(avg sentence length / 20, 1)`.
    pub sentence_length: f64,
    /// `0.10 * min(clause density / 3, 1)`.
    pub clauses: f64,
    /// `0.05 * share of VB tags`.
    pub verbs: f64,
    /// `0.05 * share of JJ tags`.
    pub adjectives: f64,
}

impl ComplexityBreakdown {
    /// Weigh the inputs. With no tokens every term is zero.
    pub fn from_inputs(inputs: &ComplexityInputs<'_>) -> Self {
        if inputs.pos.total() == 0 {
            return Self::default();
        }
        Self {
            readability: 0.40 * readability_score(inputs.scores),
            lexical: 0.20 * (1.0 - inputs.type_token_ratio),
            sentence_length: 0.20 * (inputs.avg_sentence_length / 20.0).min(1.0),
            clauses: 0.10 * (inputs.clause_density / 3.0).min(1.0),
            verbs: 0.05 * inputs.pos.proportion(PosTag::Vb),
            adjectives: 0.05 * inputs.pos.proportion(PosTag::Jj),
        }
    }

    /// Sum of the terms.
    pub fn score(&self) -> f64 {
        self.readability
            + self.lexical
            + self.sentence_length
            + self.clauses
            + self.verbs
            + self.adjectives
    }
}

/// Composite complexity score; `0.0` when there are no tokens.
pub fn complexity_score(inputs: &ComplexityInputs<'_>) -> f64 {
    ComplexityBreakdown::from_inputs(inputs).score()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_boundaries() {
        assert_eq!(classify(0.0), CefrLevel::A1);
        assert_eq!(classify(0.34), CefrLevel::A1);
        assert_eq!(classify(0.35), CefrLevel::A2);
        assert_eq!(classify(0.549), CefrLevel::A2);
        assert_eq!(classify(0.55), CefrLevel::B1);
        assert_eq!(classify(0.75), CefrLevel::B2);
        assert_eq!(classify(1.4), CefrLevel::B2);
    }

    #[test]
    fn negative_scores_are_a1() {
        assert_eq!(classify(-0.2), CefrLevel::A1);
    }

    #[test]
    fn levels_are_ordered() {
        assert!(CefrLevel::A1 < CefrLevel::A2);
        assert!(CefrLevel::A2 < CefrLevel::B1);
        assert!(CefrLevel::B1 < CefrLevel::B2);
    }

    #[test]
    fn parse_and_display() {
        assert_eq!("b1".parse::<CefrLevel>().unwrap(), CefrLevel::B1);
        assert_eq!(" A2 ".parse::<CefrLevel>().unwrap(), CefrLevel::A2);
        assert!("C1".parse::<CefrLevel>().is_err());
        assert_eq!(CefrLevel::B2.to_string(), "B2");
    }

    #[test]
    fn readability_score_normalization() {
        let scores = ReadabilityScores {
            flesch_kincaid_grade: 12.0,
            flesch_reading_ease: 0.0,
            gunning_fog_index: 18.0,
            smog_index: 18.0,
        };
        assert_eq!(readability_score(&scores), 1.0);
    }

    #[test]
    fn weighted_terms() {
        let scores = ReadabilityScores {
            flesch_kincaid_grade: 12.0,
            flesch_reading_ease: 0.0,
            gunning_fog_index: 18.0,
            smog_index: 18.0,
        };
        let pos = PosDistribution::from_tags(&[PosTag::Vb, PosTag::Nn, PosTag::Nn, PosTag::Nn]);
        let inputs = ComplexityInputs {
            scores: &scores,
            type_token_ratio: 0.5,
            avg_sentence_length: 40.0,
            clause_density: 1.5,
            pos: &pos,
        };
        let breakdown = ComplexityBreakdown::from_inputs(&inputs);
        assert_eq!(breakdown.readability, 0.4);
        assert_eq!(breakdown.lexical, 0.1);
        assert_eq!(breakdown.sentence_length, 0.2);
        assert_eq!(breakdown.clauses, 0.05);
        assert_eq!(breakdown.verbs, 0.0125);
        assert_eq!(breakdown.adjectives, 0.0);
        assert!((complexity_score(&inputs) - 0.7625).abs() < 1e-12);
    }

    #[test]
    fn no_tokens_scores_zero() {
        let scores = ReadabilityScores::default();
        let pos = PosDistribution::default();
        let inputs = ComplexityInputs {
            scores: &scores,
            type_token_ratio: 0.0,
            avg_sentence_length: 0.0,
            clause_density: 0.0,
            pos: &pos,
        };
        assert_eq!(complexity_score(&inputs), 0.0);
    }
}
