//! Bounded retry loops that drive an external text service toward a level.
//!
//! The engine never talks to a language model itself. Callers hand in a
//! [`TextService`] (typically a client for a hosted model) and these loops
//! repeatedly ask it for text, [`analyze`] each candidate, and stop as soon
//! as one lands on the requested [`CefrLevel`].
//!
//! Prompt wording, model choice, and transport all belong to the service
//! implementation.

use std::fmt;
use std::ops::RangeInclusive;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analysis::{AnalysisReport, AnalyzeOptions, analyze};
use crate::error::{RetargetError, RetargetResult, ServiceError, ServiceResult};
use crate::level::CefrLevel;
use crate::text;

/// Ask for a rewrite of existing text at a target level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewriteRequest<'a> {
    /// The text to rewrite.
    pub text: &'a str,
    /// Level the rewrite should read at.
    pub target: CefrLevel,
    /// 1-based attempt number.
    pub attempt: usize,
}

/// Ask for a new passage on a topic at a target level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationRequest<'a> {
    /// What the passage should be about.
    pub topic: &'a str,
    /// Level the passage should read at.
    pub level: CefrLevel,
    /// Length band the passage should fall in.
    pub length: TextLength,
    /// 1-based attempt number.
    pub attempt: usize,
}

/// A source of candidate text, usually backed by a language model.
pub trait TextService {
    /// Rewrite `request.text` so it reads at `request.target`.
    fn rewrite(&self, request: &RewriteRequest<'_>) -> ServiceResult<String>;

    /// Write a new passage for `request`.
    fn generate(&self, request: &GenerationRequest<'_>) -> ServiceResult<String>;
}

impl<T: TextService + ?Sized> TextService for &T {
    fn rewrite(&self, request: &RewriteRequest<'_>) -> ServiceResult<String> {
        (**self).rewrite(request)
    }

    fn generate(&self, request: &GenerationRequest<'_>) -> ServiceResult<String> {
        (**self).generate(request)
    }
}

/// Requested passage length, as a whitespace word-count band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum TextLength {
    /// 100–150 words.
    Short,
    /// 150–250 words.
    #[default]
    Medium,
    /// 250–350 words.
    Long,
}

impl TextLength {
    /// Inclusive word-count band.
    pub const fn word_range(&self) -> RangeInclusive<usize> {
        match self {
            Self::Short => 100..=150,
            Self::Medium => 150..=250,
            Self::Long => 250..=350,
        }
    }

    /// Returns the length name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
        }
    }
}

impl fmt::Display for TextLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let range = self.word_range();
        write!(f, "{} ({}-{} words)", self.as_str(), range.start(), range.end())
    }
}

/// What happened on one attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Attempt {
    /// 1-based attempt number.
    pub number: usize,
    /// Level of the candidate; `None` when the service failed.
    pub level: Option<CefrLevel>,
    /// Complexity score of the candidate.
    pub complexity_score: Option<f64>,
    /// Whitespace word count of the candidate.
    pub word_count: Option<usize>,
    /// Service error message, if the attempt failed.
    pub error: Option<String>,
}

/// Result of a retargeting loop that produced at least one candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RetargetOutcome {
    /// The accepted candidate, or the last analysed one if none matched.
    pub text: String,
    /// Analysis of [`text`](Self::text).
    pub report: AnalysisReport,
    /// Whether [`text`](Self::text) met the acceptance criteria.
    pub matched: bool,
    /// Every attempt, in order.
    pub attempts: Vec<Attempt>,
}

/// Rewrite `text` until it analyzes at `target`, up to `max_attempts` times.
///
/// Returns on the first match. If no candidate matches, the last analysed
/// one comes back with `matched == false`. Service failures use up an
/// attempt; only when every attempt failed is an error returned.
#[tracing::instrument(skip(service, text, options), fields(text_len = text.len()))]
pub fn retarget<S: TextService + ?Sized>(
    service: &S,
    text: &str,
    target: CefrLevel,
    max_attempts: usize,
    options: &AnalyzeOptions,
) -> RetargetResult<RetargetOutcome> {
    run_attempts(
        max_attempts,
        options,
        |attempt| {
            service.rewrite(&RewriteRequest {
                text,
                target,
                attempt,
            })
        },
        |_, report| report.overall_level == target,
    )
}

/// Generate a passage on `topic` that analyzes at `level` and fits `length`.
///
/// Same loop as [`retarget`], but a candidate is only accepted when its
/// whitespace word count is also inside [`TextLength::word_range`].
#[tracing::instrument(skip(service, options))]
pub fn generate_for_level<S: TextService + ?Sized>(
    service: &S,
    topic: &str,
    level: CefrLevel,
    length: TextLength,
    max_attempts: usize,
    options: &AnalyzeOptions,
) -> RetargetResult<RetargetOutcome> {
    let range = length.word_range();
    run_attempts(
        max_attempts,
        options,
        |attempt| {
            service.generate(&GenerationRequest {
                topic,
                level,
                length,
                attempt,
            })
        },
        |candidate, report| {
            report.overall_level == level
                && range.contains(&text::whitespace_word_count(candidate))
        },
    )
}

fn run_attempts<P, A>(
    max_attempts: usize,
    options: &AnalyzeOptions,
    mut produce: P,
    accept: A,
) -> RetargetResult<RetargetOutcome>
where
    P: FnMut(usize) -> ServiceResult<String>,
    A: Fn(&str, &AnalysisReport) -> bool,
{
    if max_attempts == 0 {
        return Err(RetargetError::NoAttempts);
    }

    let mut attempts = Vec::with_capacity(max_attempts);
    let mut last_candidate: Option<(String, AnalysisReport)> = None;
    let mut last_error: Option<ServiceError> = None;

    for number in 1..=max_attempts {
        let candidate = match produce(number).and_then(non_empty) {
            Ok(candidate) => candidate,
            Err(err) => {
                tracing::warn!(attempt = number, error = %err, "text service attempt failed");
                attempts.push(Attempt {
                    number,
                    level: None,
                    complexity_score: None,
                    word_count: None,
                    error: Some(err.to_string()),
                });
                last_error = Some(err);
                continue;
            }
        };

        let report = analyze(&candidate, options);
        let word_count = text::whitespace_word_count(&candidate);
        let matched = accept(&candidate, &report);
        tracing::info!(
            attempt = number,
            word_count,
            level = %report.overall_level,
            complexity_score = report.complexity_score,
            matched,
            "candidate analysed"
        );
        attempts.push(Attempt {
            number,
            level: Some(report.overall_level),
            complexity_score: Some(report.complexity_score),
            word_count: Some(word_count),
            error: None,
        });

        if matched {
            return Ok(RetargetOutcome {
                text: candidate,
                report,
                matched: true,
                attempts,
            });
        }
        last_candidate = Some((candidate, report));
    }

    match (last_candidate, last_error) {
        (Some((text, report)), _) => {
            tracing::info!(attempts = max_attempts, "no candidate matched; returning last");
            Ok(RetargetOutcome {
                text,
                report,
                matched: false,
                attempts,
            })
        }
        (None, Some(last)) => Err(RetargetError::AllAttemptsFailed {
            attempts: max_attempts,
            last,
        }),
        (None, None) => Err(RetargetError::NoAttempts),
    }
}

fn non_empty(candidate: String) -> ServiceResult<String> {
    let trimmed = candidate.trim();
    if trimmed.is_empty() {
        Err(ServiceError::EmptyResponse)
    } else if trimmed.len() == candidate.len() {
        Ok(candidate)
    } else {
        Ok(trimmed.to_string())
    }
}
