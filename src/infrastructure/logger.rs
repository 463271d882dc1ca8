use anyhow::{Context, Result};
use log::warn;
use std::fs::{File, OpenOptions};
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Mutex;
use tracing::Subscriber;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::util::SubscriberInitExt;

pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Warn about a date prop that could not be parsed. Never fails.
pub fn print_invalid_error_log(param_in_error: &str) {
    warn!(
        "Invalid {} input format. Must be a YYYY-MM-DD or RFC 3339 date string",
        param_in_error
    );
}

/// A bare level (`debug`) or `RUST_LOG` style directives (`kalender::domain=trace,warn`).
pub fn parse_log_filter(directives: &str) -> Option<EnvFilter> {
    EnvFilter::try_new(directives.trim()).ok()
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))
}

fn file_subscriber(filter: EnvFilter, file: File) -> impl Subscriber + Send + Sync + 'static {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .finish()
}

fn stderr_subscriber(filter: EnvFilter) -> impl Subscriber + Send + Sync + 'static {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(true)
        .finish()
}

/// Install the global subscriber, writing to `log_file` when given and stderr otherwise.
///
/// The `log` macros used across the crate reach the subscriber through the
/// `tracing-log` bridge that `try_init` installs.
pub fn init_logging(directives: &str, log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_new(directives.trim())
        .with_context(|| format!("Invalid log filter '{}'", directives))?;

    match log_file {
        Some(path) => file_subscriber(filter, open_log_file(path)?).try_init(),
        None => stderr_subscriber(filter).try_init(),
    }
    .context("Logger already installed")
}
