//! Logging
//!
//! tracing subscriber setup. The interactive UI owns the terminal, so it logs to a
//! file; one-shot commands log to stderr.

use crate::config::{LoggingConfig, blogwriter_home};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Where log lines go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// Human-readable lines on stderr
    Stderr,
    /// Log file (configured path, or daily-rotated under `~/.blogwriter/logs/`)
    File,
}

/// Keeps the non-blocking writer flushing until dropped
pub struct LogGuard {
    _guard: Option<WorkerGuard>,
    pub file: Option<PathBuf>,
}

/// Default log directory: `~/.blogwriter/logs/`
pub fn log_dir() -> PathBuf {
    blogwriter_home().join("logs")
}

/// Build the filter: `RUST_LOG` wins, then `--debug`, then the configured level
fn build_filter(config: &LoggingConfig, debug: bool) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let level = if debug { "debug" } else { config.level.as_str() };
    EnvFilter::new(format!("blogwriter={level},warn"))
}

/// Install the global subscriber. Call once, keep the guard alive.
pub fn init(config: &LoggingConfig, target: LogTarget, debug: bool) -> Result<LogGuard> {
    let filter = build_filter(config, debug);

    match target {
        LogTarget::Stderr => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
                .try_init()
                .context("Failed to install log subscriber")?;
            Ok(LogGuard {
                _guard: None,
                file: None,
            })
        }
        LogTarget::File => {
            let (appender, file) = match config.file {
                Some(ref path) => file_appender(path)?,
                None => {
                    let dir = log_dir();
                    std::fs::create_dir_all(&dir)
                        .with_context(|| format!("Failed to create log directory: {:?}", dir))?;
                    (
                        tracing_appender::rolling::daily(&dir, "blogwriter.log"),
                        dir.join("blogwriter.log"),
                    )
                }
            };
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(writer).with_ansi(false))
                .try_init()
                .context("Failed to install log subscriber")?;
            Ok(LogGuard {
                _guard: Some(guard),
                file: Some(file),
            })
        }
    }
}

fn file_appender(path: &Path) -> Result<(tracing_appender::rolling::RollingFileAppender, PathBuf)> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let name = path
        .file_name()
        .context("Log file path has no file name")?;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory: {:?}", dir))?;
    Ok((
        tracing_appender::rolling::never(dir, name),
        path.to_path_buf(),
    ))
}
