use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;

pub const LOG_PATH: &str = "code_log.txt";

// Year-Monthname-Day-Hour:Minute:Second, e.g. 2024-Mar-05-14:22:01
const TIMESTAMP_FORMAT: &str = "%Y-%b-%d-%H:%M:%S";

/// Append one timestamped status line to the run log.
pub fn log_progress(message: &str) -> Result<()> {
    append_line(Path::new(LOG_PATH), message)
}

fn append_line(path: &Path, message: &str) -> Result<()> {
    let timestamp = Local::now().format(TIMESTAMP_FORMAT);
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {:?}", path))?;
    writeln!(file, "{} : {}", timestamp, message)?;
    Ok(())
}

// ── Tests ──
