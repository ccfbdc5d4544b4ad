//! Level command — CEFR level estimate with an optional expectation gate.

use anyhow::bail;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use lexgrade_core::analysis::{self, AnalyzeOptions};
use lexgrade_core::level::{CefrLevel, ComplexityBreakdown};

use super::read_input_file;

/// Arguments for the `level` subcommand.
#[derive(Args, Debug)]
pub struct LevelArgs {
    /// File to analyze (`-` for stdin).
    pub file: Utf8PathBuf,

    /// Fail unless the text is at this level.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub expect: Option<CefrLevel>,
}

/// Level estimate, as printed with `--json`.
#[derive(Debug, Serialize)]
pub struct LevelReport {
    /// Estimated level.
    pub level: CefrLevel,
    /// Composite score the level was derived from.
    pub complexity_score: f64,
    /// Weighted terms of the score.
    pub breakdown: ComplexityBreakdown,
    /// The level the caller expected, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<CefrLevel>,
    /// Whether the estimate matched the expectation (`true` without one).
    pub matched: bool,
}

impl LevelReport {
    /// Estimate the level of `text` and compare with `expected`.
    pub fn evaluate(text: &str, expected: Option<CefrLevel>) -> Self {
        // Cloze output is not part of this report, so skip the sampling.
        let options = AnalyzeOptions::default().with_blanks(0).with_seed(0);
        let report = analysis::analyze(text, &options);
        let level = report.overall_level;
        Self {
            level,
            complexity_score: report.complexity_score,
            breakdown: report.complexity_breakdown,
            expected,
            matched: expected.is_none_or(|want| want == level),
        }
    }
}

/// Estimate the CEFR level of a file.
#[instrument(name = "cmd_level", skip_all, fields(file = %args.file))]
pub fn cmd_level(
    args: LevelArgs,
    global_json: bool,
    config_expect: Option<CefrLevel>,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    let expected = args.expect.or(config_expect);
    debug!(expected = ?expected, "executing level command");

    let content = read_input_file(&args.file, max_input_bytes)?;
    let report = LevelReport::evaluate(&content, expected);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if report.expected.is_some() && report.matched {
        println!(
            "{} {} is {} (score {:.3})",
            "PASS:".green(),
            args.file,
            report.level,
            report.complexity_score,
        );
    } else if report.expected.is_none() {
        println!(
            "{} ({}, score {:.3})",
            report.level.as_str().bold(),
            report.level.description(),
            report.complexity_score,
        );
    }

    if let Some(want) = report.expected
        && !report.matched
    {
        bail!(
            "{} is {} (score {:.3}), expected {}.",
            args.file,
            report.level,
            report.complexity_score,
            want,
        );
    }

    Ok(())
}
