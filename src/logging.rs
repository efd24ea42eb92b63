use env_logger::Env;
use log::{debug, error, info, log_enabled, warn, Level, LevelFilter};

/// Level selected by a `-v` count when `RUST_LOG` is not set.
pub fn level_for_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Initializes the logger with the `env_logger` crate.
///
/// `RUST_LOG` takes precedence; otherwise `verbosity` picks the level.
/// Calling this more than once is harmless.
pub fn init_logger(verbosity: u8) {
    let default = level_for_verbosity(verbosity).to_string().to_lowercase();
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or(default))
        .format_timestamp(None)
        .try_init();
}

/// Logs an error message.
pub fn log_error(message: &str) {
    if log_enabled!(Level::Error) {
        error!("{message}");
    }
}

/// Logs a warning message.
pub fn log_warn(message: &str) {
    if log_enabled!(Level::Warn) {
        warn!("{message}");
    }
}

/// Logs an informational message.
pub fn log_info(message: &str) {
    if log_enabled!(Level::Info) {
        info!("{message}");
    }
}

/// Logs a debug message.
pub fn log_debug(message: &str) {
    if log_enabled!(Level::Debug) {
        debug!("{message}");
    }
}
