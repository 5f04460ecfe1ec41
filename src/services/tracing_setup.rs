//! Tracing subscriber setup
//!
//! Logs go to a file because the terminal belongs to the panels while the
//! binary runs.

use std::fmt as std_fmt;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Why the global subscriber was not installed
#[derive(Debug)]
pub enum LoggingInitError {
    /// The log file could not be created
    LogFile { path: PathBuf, source: io::Error },
    /// Another global subscriber is already set
    AlreadySet,
}

impl std_fmt::Display for LoggingInitError {
    fn fmt(&self, f: &mut std_fmt::Formatter<'_>) -> std_fmt::Result {
        match self {
            LoggingInitError::LogFile { path, source } => {
                write!(f, "cannot create log file {}: {}", path.display(), source)
            }
            LoggingInitError::AlreadySet => write!(f, "a global logger is already set"),
        }
    }
}

impl std::error::Error for LoggingInitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoggingInitError::LogFile { source, .. } => Some(source),
            LoggingInitError::AlreadySet => None,
        }
    }
}

/// Install the global subscriber writing to `log_file_path`.
///
/// On error the program can keep running without logging.
pub fn init_global(log_file_path: &Path) -> Result<(), LoggingInitError> {
    let log_file = File::create(log_file_path).map_err(|source| LoggingInitError::LogFile {
        path: log_file_path.to_path_buf(),
        source,
    })?;
    build_subscriber(log_file)
        .try_init()
        .map_err(|_| LoggingInitError::AlreadySet)
}

/// Build a subscriber with file logging.
///
/// Filtering follows `RUST_LOG`, with DEBUG as the default level.
pub fn build_subscriber(log_file: File) -> impl tracing::Subscriber + Send + Sync {
    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into());

    let fmt_layer = fmt::layer()
        .with_writer(Arc::new(log_file))
        .with_ansi(false);

    tracing_subscriber::registry().with(fmt_layer).with(env_filter)
}
