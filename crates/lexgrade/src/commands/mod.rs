//! Command implementations.

use std::io::Read;

use anyhow::Context;
use camino::Utf8Path;

pub mod analyze;
pub mod cloze;
pub mod info;
pub mod level;
pub mod readability;
#[cfg(feature = "mcp")]
pub mod serve;

/// Path argument meaning "read standard input".
pub const STDIN_PATH: &str = "-";

/// Read a file (or stdin for `-`) and validate its size against the configured limit.
pub fn read_input_file(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    if path.as_str() == STDIN_PATH {
        return read_stdin(max_bytes);
    }

    // Preflight: check file size via metadata before reading into memory.
    let metadata =
        std::fs::metadata(path.as_std_path()).with_context(|| format!("failed to read {path}"))?;
    if let Some(max) = max_bytes {
        let size = metadata.len();
        if size > max as u64 {
            anyhow::bail!("input too large: {path} is {size} bytes (limit: {max} bytes)");
        }
    }

    let content = std::fs::read_to_string(path.as_std_path())
        .with_context(|| format!("failed to read {path}"))?;
    Ok(content)
}

fn read_stdin(max_bytes: Option<usize>) -> anyhow::Result<String> {
    let mut content = String::new();
    let stdin = std::io::stdin().lock();
    match max_bytes {
        Some(max) => {
            // One byte past the limit is enough to know it was exceeded.
            stdin
                .take(max as u64 + 1)
                .read_to_string(&mut content)
                .context("failed to read standard input")?;
            if content.len() > max {
                anyhow::bail!("input too large: standard input exceeds {max} bytes");
            }
        }
        None => {
            let mut stdin = stdin;
            stdin
                .read_to_string(&mut content)
                .context("failed to read standard input")?;
        }
    }
    Ok(content)
}

/// Reject input larger than `max_bytes`. Used where text arrives in memory.
pub fn check_input_size(text: &str, max_bytes: Option<usize>) -> anyhow::Result<()> {
    if let Some(max) = max_bytes
        && text.len() > max
    {
        anyhow::bail!("input too large: {} bytes (limit: {max} bytes)", text.len());
    }
    Ok(())
}
