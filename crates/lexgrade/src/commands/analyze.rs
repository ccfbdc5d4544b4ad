//! Analyze command — full vocabulary and complexity analysis.

use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use lexgrade_core::analysis::{self, AnalysisReport, AnalyzeOptions};

use super::read_input_file;

/// Arguments for the `analyze` subcommand.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// File to analyze (`-` for stdin).
    pub file: Utf8PathBuf,

    /// Number of distinct words to blank in the cloze test.
    #[arg(long, value_name = "N")]
    pub blanks: Option<usize>,

    /// Seed for cloze word selection (reproducible output).
    #[arg(long)]
    pub seed: Option<u64>,
}

impl AnalyzeArgs {
    /// Flags override the configured defaults.
    pub(crate) fn options(&self, defaults: AnalyzeOptions) -> AnalyzeOptions {
        AnalyzeOptions {
            cloze_blanks: self.blanks.unwrap_or(defaults.cloze_blanks),
            seed: self.seed.or(defaults.seed),
        }
    }
}

/// Run the full analysis on a file.
#[instrument(name = "cmd_analyze", skip_all, fields(file = %args.file))]
pub fn cmd_analyze(
    args: AnalyzeArgs,
    global_json: bool,
    defaults: AnalyzeOptions,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(blanks = ?args.blanks, seed = ?args.seed, "executing analyze command");

    let content = read_input_file(&args.file, max_input_bytes)?;
    let report = analysis::analyze(&content, &args.options(defaults));

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_report(&args.file, &report);
    Ok(())
}

fn print_report(file: &Utf8PathBuf, report: &AnalysisReport) {
    println!(
        "{}: {} ({}, score {:.3})",
        file.bold(),
        report.overall_level.as_str().green().bold(),
        report.overall_level.description(),
        report.complexity_score,
    );

    println!(
        "\n  {} {} words, {} sentences, {} syllables",
        "Counts:".cyan(),
        report.counts.words,
        report.counts.sentences,
        report.counts.syllables,
    );
    let scores = report.readability_scores();
    println!(
        "  {} FK grade {:.1}, reading ease {:.1}, Fog {:.1}, SMOG {:.1}",
        "Readability:".cyan(),
        scores.flesch_kincaid_grade,
        scores.flesch_reading_ease,
        scores.gunning_fog_index,
        scores.smog_index,
    );
    println!(
        "  {} TTR {:.3}, MTLD {:.1}",
        "Lexical:".cyan(),
        report.type_token_ratio,
        report.mtld,
    );
    println!(
        "  {} {:.1} words/sentence, {:.2} clauses/sentence",
        "Syntax:".cyan(),
        report.avg_sentence_length,
        report.clause_density,
    );

    if !report.pos_distribution.is_empty() {
        let tags: Vec<String> = report
            .pos_distribution
            .iter()
            .map(|(tag, count)| format!("{tag} {count}"))
            .collect();
        println!("  {} {}", "Tags:".cyan(), tags.join(", "));
    }

    if !report.top_bigrams.is_empty() {
        println!("\n  {}", "Top bigrams:".cyan());
        for bigram in &report.top_bigrams {
            println!("    {:>3}  {}", bigram.count, bigram.ngram.join(" "));
        }
    }

    if !report.blanked_words.is_empty() {
        println!("\n  {}", "Cloze:".cyan());
        println!("    {}", report.cloze_text);
        println!(
            "    {} {}",
            "Answers:".dimmed(),
            report.blanked_words.join(", ")
        );
    }
}
