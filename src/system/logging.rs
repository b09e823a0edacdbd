//! Logging system initialization
//!
//! Installs the global tracing subscriber from [`LoggingConfig`]: level filter,
//! text or JSON lines, stdout or a (daily rotated) log file behind a
//! non-blocking writer.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;

use crate::config::LoggingConfig;
use crate::errors::{LinkbotError, Result};

const DEFAULT_LOG_NAME: &str = "linkbot.log";

/// Initialize logging. Call once, after the configuration has been loaded.
///
/// The returned `WorkerGuard` must stay alive for the life of the process so
/// buffered lines are flushed on exit.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let log_file = config.file.as_deref().filter(|f| !f.is_empty());
    let writer = make_writer(config, log_file)?;

    let (non_blocking_writer, guard) = tracing_appender::non_blocking(writer);
    let filter = tracing_subscriber::EnvFilter::try_new(&config.level)
        .map_err(|e| LinkbotError::logging(format!("invalid log level '{}': {}", config.level, e)))?;

    let subscriber_builder = tracing_subscriber::fmt()
        .with_writer(non_blocking_writer)
        .with_env_filter(filter)
        .with_level(true)
        .with_ansi(log_file.is_none());

    let installed = if config.format == "json" {
        subscriber_builder.json().try_init()
    } else {
        subscriber_builder.try_init()
    };
    installed.map_err(|e| LinkbotError::logging(format!("failed to install subscriber: {}", e)))?;

    Ok(guard)
}

fn make_writer(
    config: &LoggingConfig,
    log_file: Option<&str>,
) -> Result<Box<dyn std::io::Write + Send + Sync>> {
    let Some(log_file) = log_file else {
        return Ok(Box::new(std::io::stdout()));
    };

    if config.enable_rotation {
        let path = Path::new(log_file);
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let filename = path
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or(DEFAULT_LOG_NAME);

        let appender = rolling::Builder::new()
            .rotation(rolling::Rotation::DAILY)
            .filename_prefix(filename.trim_end_matches(".log"))
            .filename_suffix("log")
            .max_log_files((config.max_backups as usize).max(1))
            .build(dir)
            .map_err(|e| {
                LinkbotError::logging(format!("failed to create rolling appender: {}", e))
            })?;
        Ok(Box::new(appender))
    } else {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file)
            .map_err(|e| {
                LinkbotError::file_operation(format!("failed to open log file {}: {}", log_file, e))
            })?;
        Ok(Box::new(file))
    }
}
