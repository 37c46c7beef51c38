//! Tracing setup for the `checkin` binary.
//!
//! Logs always go to stderr. When file logging is enabled they are also
//! written to a daily-rotated file under [`crate::checkin_dirs::logs_dir`].

use crate::config::LoggingConfig;
use crate::error::{CheckinError, Result};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Log file name prefix; the appender adds the date suffix.
const LOG_FILE_PREFIX: &str = "checkin.log";

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over the configured filter. Keep the returned
/// guard alive for the life of the process so buffered file output is
/// flushed on exit.
///
/// # Errors
///
/// Returns an error if the log directory cannot be created or a global
/// subscriber is already installed.
pub fn init(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    init_with_dir(config, &crate::checkin_dirs::logs_dir())
}

fn init_with_dir(config: &LoggingConfig, logs_dir: &Path) -> Result<Option<WorkerGuard>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter));

    let (file_layer, guard) = if config.file_enabled {
        std::fs::create_dir_all(logs_dir)?;
        let appender = tracing_appender::rolling::daily(logs_dir, LOG_FILE_PREFIX);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(writer);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init()
        .map_err(|e| CheckinError::Config(format!("cannot install log subscriber: {e}")))?;

    Ok(guard)
}
