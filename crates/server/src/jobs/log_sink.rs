//! Append-only log sink with a fallback cascade.

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::warn;

/// Durable append-only sink for job audit lines.
///
/// Writes go to the primary path; if that is unwritable (the `/tmp`
/// convention does not exist on every platform) the fallback path is tried,
/// and as a last resort the lines go to the process's standard output.
/// Appends are not synchronized against concurrent writers; interleaved
/// lines across overlapping job runs are acceptable.
#[derive(Debug, Clone)]
pub struct LogSink {
    primary: PathBuf,
    fallback: PathBuf,
}

impl LogSink {
    /// Create a sink with explicit primary and fallback paths.
    #[must_use]
    pub fn new(primary: impl Into<PathBuf>, fallback: impl Into<PathBuf>) -> Self {
        Self {
            primary: primary.into(),
            fallback: fallback.into(),
        }
    }

    /// Conventional sink for a job log file: `/tmp/<file_name>` primary,
    /// `<fallback_dir>/<file_name>` fallback.
    #[must_use]
    pub fn for_job(file_name: &str, fallback_dir: &Path) -> Self {
        Self {
            primary: Path::new("/tmp").join(file_name),
            fallback: fallback_dir.join(file_name),
        }
    }

    /// Append the lines, one per line, following the cascade. Never fails.
    pub fn append(&self, lines: &[String]) {
        if let Err(primary_err) = append_to(&self.primary, lines) {
            warn!(
                path = %self.primary.display(),
                error = %primary_err,
                "primary log path unwritable, using fallback"
            );
            if let Err(fallback_err) = append_to(&self.fallback, lines) {
                warn!(
                    path = %self.fallback.display(),
                    error = %fallback_err,
                    "fallback log path unwritable, emitting to stdout"
                );
                emit_stdout(lines);
            }
        }
    }
}

fn append_to(path: &Path, lines: &[String]) -> std::io::Result<()> {
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    for line in lines {
        writeln!(file, "{line}")?;
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
fn emit_stdout(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}
