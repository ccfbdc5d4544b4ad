//! Development tasks for lexgrade.
//!
//! Run with `cargo xtask <task>`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "xtask", about = "Development tasks for lexgrade")]
struct Xtask {
    #[command(subcommand)]
    task: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Generate man pages for the CLI and every subcommand
    Man {
        /// Output directory
        #[arg(long, default_value = "target/dist/man")]
        out: PathBuf,
    },
    /// Generate shell completion scripts
    Completions {
        /// Output directory
        #[arg(long, default_value = "target/dist/completions")]
        out: PathBuf,
        /// Shells to generate for (default: all)
        #[arg(long, value_enum)]
        shell: Vec<Shell>,
    },
}

fn main() -> io::Result<()> {
    match Xtask::parse().task {
        Task::Man { out } => generate_man(&out),
        Task::Completions { out, shell } => {
            let shells = if shell.is_empty() {
                Shell::value_variants().to_vec()
            } else {
                shell
            };
            generate_completions(&out, &shells)
        }
    }
}

fn generate_man(out: &Path) -> io::Result<()> {
    fs::create_dir_all(out)?;
    let cmd = lexgrade::command();
    clap_mangen::generate_to(cmd, out)?;
    println!("man pages written to {}", out.display());
    Ok(())
}

fn generate_completions(out: &Path, shells: &[Shell]) -> io::Result<()> {
    fs::create_dir_all(out)?;
    let mut cmd = lexgrade::command();
    let name = cmd.get_name().to_string();
    for shell in shells {
        let path = clap_complete::generate_to(*shell, &mut cmd, &name, out)?;
        println!("{shell} completions written to {}", path.display());
    }
    Ok(())
}
