//! Diagnostic logging: a daily rolling file in the configured log directory.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use std::fs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Keep the returned guard alive until exit,
/// otherwise buffered lines are dropped.
pub fn init(cfg: &Config) -> AppResult<WorkerGuard> {
    let log_dir = cfg.log_path();
    fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("zlog")
        .filename_suffix("log")
        .build(&log_dir)
        .map_err(|e| AppError::Config(format!("cannot open log directory: {}", e)))?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(non_blocking)
        .try_init()
        .map_err(|e| AppError::Other(e.to_string()))?;

    Ok(guard)
}
