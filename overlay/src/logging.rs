//! Tracing setup for the overlay binary
//!
//! Logs go to stdout and to `<config dir>/spelltimer/spelltimer.log`, rotated
//! at 10 MB with one old file kept. `RUST_LOG` overrides the filter when set.
//! Otherwise `DEBUG_LOGGING=1` raises the spelltimer crates to debug.

use std::io;
use std::path::PathBuf;

use rolling_file::{BasicRollingFileAppender, RollingConditionBasic};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer, fmt,
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
};

const APP_DIR: &str = "spelltimer";
const LOG_FILE: &str = "spelltimer.log";
const MAX_LOG_BYTES: u64 = 10 * 1024 * 1024;
const KEEP_ROTATED: usize = 1;

/// Install the global subscriber
///
/// Hold the returned guard until exit so the file writer flushes. `None`
/// means the log file could not be opened and only stdout is active.
pub fn init() -> Option<WorkerGuard> {
    let debug_logging = std::env::var_os("DEBUG_LOGGING").is_some();

    let (log_path, appender) = match open_log_file() {
        Ok(opened) => opened,
        Err(e) => {
            // No subscriber yet
            eprintln!("File logging unavailable ({e}), logging to stdout only");
            tracing_subscriber::registry()
                .with(stdout_layer())
                .with(filter(debug_logging))
                .init();
            return None;
        }
    };

    let (writer, guard) = tracing_appender::non_blocking(appender);
    let file_layer = fmt::layer().with_writer(writer).with_ansi(false);

    tracing_subscriber::registry()
        .with(stdout_layer())
        .with(file_layer)
        .with(filter(debug_logging))
        .init();

    tracing::info!(log_file = ?log_path, debug_logging, "Logging started");
    Some(guard)
}

/// Where the log file lives, if the platform has a config dir
pub fn log_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(LOG_FILE))
}

fn open_log_file() -> io::Result<(PathBuf, BasicRollingFileAppender)> {
    let path = log_path()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no config directory"))?;
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }

    let condition = RollingConditionBasic::new().max_size(MAX_LOG_BYTES);
    let appender = BasicRollingFileAppender::new(&path, condition, KEEP_ROTATED)?;
    Ok((path, appender))
}

fn stdout_layer<S>() -> impl Layer<S>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer().with_target(true)
}

fn filter(debug_logging: bool) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(debug_logging)))
}

fn default_directive(debug_logging: bool) -> &'static str {
    if debug_logging {
        "info,spelltimer_core=debug,spelltimer_overlay=debug"
    } else {
        "info"
    }
}
