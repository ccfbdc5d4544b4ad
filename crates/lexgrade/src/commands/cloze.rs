//! Cloze command — fill-in-the-blank exercise generation.

use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use lexgrade_core::analysis::{self, AnalyzeOptions};

use super::read_input_file;

/// Arguments for the `cloze` subcommand.
#[derive(Args, Debug)]
pub struct ClozeArgs {
    /// File to build the exercise from (`-` for stdin).
    pub file: Utf8PathBuf,

    /// Number of distinct words to blank.
    #[arg(long, value_name = "N")]
    pub blanks: Option<usize>,

    /// Seed for word selection (reproducible output).
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Generate a cloze test from a file.
#[instrument(name = "cmd_cloze", skip_all, fields(file = %args.file))]
pub fn cmd_cloze(
    args: ClozeArgs,
    global_json: bool,
    defaults: AnalyzeOptions,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    let options = AnalyzeOptions {
        cloze_blanks: args.blanks.unwrap_or(defaults.cloze_blanks),
        seed: args.seed.or(defaults.seed),
    };
    debug!(blanks = options.cloze_blanks, seed = ?options.seed, "executing cloze command");

    let content = read_input_file(&args.file, max_input_bytes)?;
    let test = analysis::build_cloze(&content, &options);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&test)?);
        return Ok(());
    }

    println!("{}", test.text);
    if test.blanked_words.is_empty() {
        println!("\n{}", "No content words to blank.".yellow());
    } else {
        println!();
        for (i, word) in test.blanked_words.iter().enumerate() {
            println!("  {}. {}", (i + 1).dimmed(), word);
        }
    }

    Ok(())
}
