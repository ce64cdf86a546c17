use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

use crate::config::APP_DIR;
use crate::error::Result;

pub const LOG_ENV: &str = "PLANBOARD_LOG";

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level))
}

pub fn log_dir() -> PathBuf {
    dirs::state_dir()
        .or_else(dirs::data_local_dir)
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR)
}

/// Daily `planboard.<date>.log` files under `dir`, created if missing.
fn file_appender(dir: &Path) -> Result<RollingFileAppender> {
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(APP_DIR)
        .filename_suffix("log")
        .build(dir)?;
    Ok(appender)
}

/// File logging for the TUI, which owns the terminal. Keep the guard alive
/// until exit so buffered lines are flushed.
pub fn init_file(default_level: &str) -> Result<WorkerGuard> {
    let appender = file_appender(&log_dir())?;
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_env_filter(env_filter(default_level))
        .init();
    Ok(guard)
}

/// Logging to stderr, leaving stdout for command output.
pub fn init_stderr(default_level: &str) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter(default_level))
        .init();
}
