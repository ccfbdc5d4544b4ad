//! Logging setup for the CLI.
//!
//! Human-readable events always go to stderr, so stdout stays clean for
//! command output and the MCP protocol. When a log location is configured,
//! events are also written as JSON lines through a non-blocking appender.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Explicit log file path.
const ENV_LOG_PATH: &str = "LEXGRADE_LOG_PATH";
/// Log directory; files rotate daily.
const ENV_LOG_DIR: &str = "LEXGRADE_LOG_DIR";
/// File name prefix inside a log directory.
const LOG_FILE_PREFIX: &str = "lexgrade.jsonl";

/// Where JSON log lines go, if anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// A single file, never rotated.
    File(PathBuf),
    /// A directory with one file per day.
    Dir(PathBuf),
}

/// Resolved logging destinations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// JSON lines destination; `None` logs to stderr only.
    pub log_target: Option<LogTarget>,
}

impl ObservabilityConfig {
    /// Resolve from the environment, falling back to the configured `log_dir`.
    ///
    /// `LEXGRADE_LOG_PATH` wins over `LEXGRADE_LOG_DIR`, which wins over config.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        Self::resolve(
            std::env::var_os(ENV_LOG_PATH).map(PathBuf::from),
            std::env::var_os(ENV_LOG_DIR).map(PathBuf::from),
            config_log_dir,
        )
    }

    fn resolve(
        env_path: Option<PathBuf>,
        env_dir: Option<PathBuf>,
        config_dir: Option<PathBuf>,
    ) -> Self {
        let log_target = env_path
            .filter(|p| !p.as_os_str().is_empty())
            .map(LogTarget::File)
            .or_else(|| {
                env_dir
                    .filter(|p| !p.as_os_str().is_empty())
                    .or(config_dir)
                    .map(LogTarget::Dir)
            });
        Self { log_target }
    }
}

/// Holds the background writer; dropping it flushes pending file output.
#[derive(Debug)]
pub struct ObservabilityGuard {
    _file: Option<WorkerGuard>,
}

fn filter_directive(quiet: bool, verbose: u8, config_level: &str) -> String {
    if quiet {
        return "error".to_string();
    }
    match verbose {
        0 => config_level.to_string(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Build the event filter.
///
/// `RUST_LOG` takes precedence; otherwise `-q` selects errors only, `-v`
/// debug, `-vv` trace, and without flags the configured level applies.
pub fn env_filter(quiet: bool, verbose: u8, config_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(quiet, verbose, config_level)))
}

fn file_writer(target: &LogTarget) -> anyhow::Result<RollingFileAppender> {
    let (dir, rotation, prefix) = match target {
        LogTarget::File(path) => {
            let name = path
                .file_name()
                .with_context(|| format!("log path has no file name: {}", path.display()))?;
            let dir = path
                .parent()
                .filter(|d| !d.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            (dir, Rotation::NEVER, name.to_string_lossy().into_owned())
        }
        LogTarget::Dir(dir) => (dir.as_path(), Rotation::DAILY, LOG_FILE_PREFIX.to_string()),
    };
    RollingFileAppender::builder()
        .rotation(rotation)
        .filename_prefix(prefix)
        .build(dir)
        .with_context(|| format!("failed to open log file in {}", dir.display()))
}

/// Install the global subscriber.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
) -> anyhow::Result<ObservabilityGuard> {
    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let (file_layer, guard) = match config.log_target {
        Some(ref target) => {
            let (writer, guard) = tracing_appender::non_blocking(file_writer(target)?);
            let layer = fmt::layer().json().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(ObservabilityGuard { _file: guard })
}
