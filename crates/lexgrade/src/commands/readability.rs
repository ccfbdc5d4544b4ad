//! Readability command — the four classic readability formulas.

use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use lexgrade_core::readability::{self, SMOG_MIN_SENTENCES};

use super::read_input_file;

/// Arguments for the `readability` subcommand.
#[derive(Args, Debug)]
pub struct ReadabilityArgs {
    /// File to analyze (`-` for stdin).
    pub file: Utf8PathBuf,
}

/// Score readability of a file.
#[instrument(name = "cmd_readability", skip_all, fields(file = %args.file))]
pub fn cmd_readability(
    args: ReadabilityArgs,
    global_json: bool,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!("executing readability command");

    let content = read_input_file(&args.file, max_input_bytes)?;
    let report = readability::check_readability(&content);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{}: {} words, {} sentences, {} syllables",
        args.file.bold(),
        report.counts.words,
        report.counts.sentences,
        report.counts.syllables,
    );
    println!(
        "  {:<22} {:.1}",
        "Flesch-Kincaid grade".dimmed(),
        report.scores.flesch_kincaid_grade
    );
    println!(
        "  {:<22} {:.1}",
        "Flesch reading ease".dimmed(),
        report.scores.flesch_reading_ease
    );
    println!(
        "  {:<22} {:.1}",
        "Gunning Fog".dimmed(),
        report.scores.gunning_fog_index
    );
    if report.smog_reliable {
        println!("  {:<22} {:.1}", "SMOG".dimmed(), report.scores.smog_index);
    } else {
        println!(
            "  {:<22} {}",
            "SMOG".dimmed(),
            format!("n/a (needs {SMOG_MIN_SENTENCES} sentences)").yellow()
        );
    }

    Ok(())
}
