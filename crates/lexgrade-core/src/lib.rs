//! Core library for lexgrade.
//!
//! This crate estimates how hard an English text is for a language learner.
//! It computes readability formulas, lexical diversity, sentence structure,
//! a coarse part-of-speech histogram, and bigram frequencies, combines them
//! into a composite complexity score, and maps that score to a CEFR level
//! (A1 through B2). It can also blank content words to build a cloze test.
//!
//! # Modules
//!
//! - [`analysis`] - One-call full analysis producing an [`AnalysisReport`]
//! - [`readability`] - Flesch-Kincaid, Flesch Reading Ease, Gunning Fog, SMOG
//! - [`diversity`] - Type-token ratio and MTLD
//! - [`syntax`] - Sentence length and clause density
//! - [`pos`] - Suffix-based part-of-speech tagging
//! - [`ngrams`] - N-gram frequency tables
//! - [`level`] - Composite score and CEFR classification
//! - [`cloze`] - Fill-in-the-blank generation
//! - [`retarget`] - Rewrite/generate loops against an external text service
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use lexgrade_core::{AnalyzeOptions, CefrLevel, analyze};
//!
//! let report = analyze("I like cats. My cat is small.", &AnalyzeOptions::default().with_seed(1));
//! assert_eq!(report.overall_level, CefrLevel::A1);
//! ```
#![deny(unsafe_code)]

pub mod analysis;
pub mod cloze;
pub mod config;
pub mod diversity;
pub mod error;
pub mod level;
pub mod ngrams;
pub mod pos;
pub mod readability;
pub mod retarget;
pub mod syllables;
pub mod syntax;
pub mod text;

pub use analysis::{AnalysisReport, AnalyzeOptions, analyze};
pub use config::{Config, ConfigLoader, LogLevel};
pub use error::{
    ConfigError, ConfigResult, RetargetError, RetargetResult, ServiceError, ServiceResult,
};
pub use level::CefrLevel;
pub use readability::{ReadabilityReport, check_readability};

/// Default maximum input size in bytes (5 MiB).
///
/// Applied by the CLI and MCP server unless configuration overrides it.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;
