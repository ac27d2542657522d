//! Logging infrastructure for galleria.
//!
//! Uses the `tracing` crate with file-based output. Logs go to the platform
//! cache directory (`~/.cache/galleria/galleria.log` on Linux). Configure
//! verbosity via the `GALLERIA_LOG` environment variable (default: `info`).
//!
//! # Example
//!
//! ```bash
//! # Trace every dispatched gallery event
//! GALLERIA_LOG=galleria=trace galleria ~/Pictures
//!
//! # View logs while the terminal gallery is running
//! tail -f ~/.cache/galleria/galleria.log
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt::{self, format::FmtSpan}, prelude::*, EnvFilter};

/// Environment variable holding the log filter directive
pub const LOG_ENV: &str = "GALLERIA_LOG";

const LOG_FILENAME: &str = "galleria.log";
const DEFAULT_FILTER: &str = "info";

fn log_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "galleria").map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Get the path to the log file.
pub fn log_file_path() -> Option<PathBuf> {
    log_dir().map(|dir| dir.join(LOG_FILENAME))
}

/// Parse the `GALLERIA_LOG` directive, falling back to `info` when it is
/// unset or malformed.
fn env_filter(directive: Option<&str>) -> EnvFilter {
    directive
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize the logging system.
///
/// Logs always go to a file. When `GALLERIA_LOG` is set they are mirrored to
/// stderr as well; the terminal gallery owns the screen, so stderr stays quiet
/// unless asked for. The returned guard flushes pending lines when dropped.
pub fn init_logging() -> Result<WorkerGuard> {
    let cache_dir = log_dir().context("Failed to determine cache directory")?;
    std::fs::create_dir_all(&cache_dir)
        .with_context(|| format!("Failed to create cache directory: {}", cache_dir.display()))?;

    let log_file = cache_dir.join(LOG_FILENAME);
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)
        .with_context(|| format!("Failed to open log file: {}", log_file.display()))?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    let directive = std::env::var(LOG_ENV).ok();

    // Span close events carry durations for the file only
    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE);

    let stderr_layer = directive.is_some().then(|| {
        fmt::layer()
            .compact()
            .with_writer(std::io::stderr)
            .with_target(false)
    });

    tracing_subscriber::registry()
        .with(env_filter(directive.as_deref()))
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .context("Failed to set global tracing subscriber")?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_lives_in_galleria_cache_dir() {
        if let Some(path) = log_file_path() {
            assert!(path.ends_with(LOG_FILENAME));
            assert!(path.to_string_lossy().contains("galleria"));
        }
    }

    #[test]
    fn test_env_filter_falls_back_on_bad_directive() {
        assert_eq!(env_filter(None).to_string(), DEFAULT_FILTER);
        assert_eq!(env_filter(Some("galleria=notalevel")).to_string(), DEFAULT_FILTER);
        assert_eq!(env_filter(Some("galleria=trace")).to_string(), "galleria=trace");
    }
}
