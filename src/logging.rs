// Logging setup - rotating JSON log files
//
// The TUI owns the terminal, so logs never go to stdout. When file logging
// is enabled, events are written as JSON Lines to a rotating file through a
// non-blocking background writer. RUST_LOG overrides the configured level.

use crate::config::{LogRotation, LoggingConfig};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log file name prefix (rotation appends the date)
const LOG_FILE_PREFIX: &str = "telly.log";

/// Initialize tracing. Returns the writer guard, which must be kept alive
/// for the duration of the program so buffered logs flush on exit.
pub fn init(config: &LoggingConfig) -> Option<WorkerGuard> {
    // Precedence: RUST_LOG env var > config file > default "info"
    let default_filter = format!("telly={}", config.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    if !config.file_enabled {
        // No file logging - events are filtered but go nowhere
        tracing_subscriber::registry().with(filter).init();
        return None;
    }

    if let Err(e) = std::fs::create_dir_all(&config.dir) {
        eprintln!(
            "Warning: Could not create log directory {:?}: {}",
            config.dir, e
        );
        tracing_subscriber::registry().with(filter).init();
        return None;
    }

    let file_appender = match config.rotation {
        LogRotation::Hourly => tracing_appender::rolling::hourly(&config.dir, LOG_FILE_PREFIX),
        LogRotation::Daily => tracing_appender::rolling::daily(&config.dir, LOG_FILE_PREFIX),
        LogRotation::Never => tracing_appender::rolling::never(&config.dir, LOG_FILE_PREFIX),
    };

    // Writes happen in a background thread
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_ansi(false),
        )
        .init();

    Some(guard)
}
