use crate::config::LoggingConfig;
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
///
/// Logs go to stderr, or to `config.file` through a non-blocking writer whose
/// guard must be held until exit so buffered lines are flushed.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .with_context(|| format!("invalid log level '{}'", config.level))?;

    let registry = tracing_subscriber::registry().with(filter);

    match &config.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            let file_layer = fmt::layer()
                .with_target(true)
                .with_writer(non_blocking)
                .with_ansi(false);
            registry
                .with(file_layer)
                .try_init()
                .context("logging already initialised")?;
            Ok(Some(guard))
        }
        None => {
            let stderr_layer = fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr);
            registry
                .with(stderr_layer)
                .try_init()
                .context("logging already initialised")?;
            Ok(None)
        }
    }
}
