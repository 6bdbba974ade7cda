//! Append-only timestamped event log, mirrored to the console

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, Utc};

// ISO-8601 UTC with an explicit +00:00 offset suffix.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f+00:00";

/// The persistent outage log. Every append opens the file in append-create
/// mode, writes one line and closes it again, so everything written so far
/// survives a crash between calls.
pub struct EventLog {
    path: PathBuf,
    print_to_console: bool,
}

impl EventLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            print_to_console: true,
        }
    }

    #[cfg(test)]
    pub(crate) fn silent(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            print_to_console: false,
        }
    }

    /// Append `line` prefixed with the current UTC timestamp, mirroring the
    /// composed text to stdout. Write errors propagate: losing the audit
    /// trail defeats the program's purpose, so callers fail fast.
    pub fn append(&self, line: &str) -> anyhow::Result<()> {
        self.append_at(Utc::now(), line)
    }

    fn append_at(&self, now: DateTime<Utc>, line: &str) -> anyhow::Result<()> {
        let text = format!("{}: {}", now.format(TIMESTAMP_FORMAT), line);

        if self.print_to_console {
            println!("{text}");
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open log file {}", self.path.display()))?;
        writeln!(file, "{text}")
            .with_context(|| format!("Failed to append to log file {}", self.path.display()))?;
        Ok(())
    }
}
