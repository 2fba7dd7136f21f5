//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! The library only emits `tracing` events; the binary decides where they
//! go. Interactive mode owns the terminal, so it logs to a file when one is
//! configured and nowhere otherwise.
//!
//! # Log Levels
//!
//! - `warn`: failed submissions
//! - `info`: submissions, closes, page actions
//! - `debug`: lifecycle transitions, ignored actions, stale timers

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, LoggingConfig};

/// Where log lines are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDestination {
    /// Standard error.
    Stderr,
    /// Appended to a file.
    File(PathBuf),
    /// Dropped.
    Disabled,
}

/// Resolved logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// Filter directive used when `RUST_LOG` is not set.
    pub filter: String,
    /// Line format.
    pub format: LogFormat,
    /// Whether to colour output.
    pub ansi: bool,
    /// Output destination.
    pub destination: LogDestination,
}

/// Error type for logging setup.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// The log file could not be opened.
    #[error("Failed to open log file: {0}")]
    Io(#[from] io::Error),
    /// A global subscriber was already installed.
    #[error("Failed to install logger: {0}")]
    Init(#[from] TryInitError),
}

impl LogSettings {
    /// Combine the config section with `-v` flags.
    ///
    /// - 0: the configured level
    /// - 1 (`-v`): debug
    /// - 2+ (`-vv`): trace
    ///
    /// `interactive` hosts own the terminal, so without a log file they
    /// log nowhere.
    pub fn from_config(config: &LoggingConfig, verbosity: u8, interactive: bool) -> Self {
        let filter = match verbosity {
            0 => config.level.clone(),
            1 => "debug".to_string(),
            _ => "trace".to_string(),
        };
        let destination = match (&config.file, interactive) {
            (Some(path), _) => LogDestination::File(PathBuf::from(path)),
            (None, true) => LogDestination::Disabled,
            (None, false) => LogDestination::Stderr,
        };
        Self {
            filter,
            format: config.format,
            ansi: config.ansi && destination == LogDestination::Stderr,
            destination,
        }
    }
}

/// Install the global subscriber. Call once at startup.
pub fn init_logging(settings: &LogSettings) -> Result<(), LoggingError> {
    let writer = match &settings.destination {
        LogDestination::Stderr => BoxMakeWriter::new(io::stderr),
        LogDestination::Disabled => BoxMakeWriter::new(io::sink),
        LogDestination::File(path) => BoxMakeWriter::new(Mutex::new(open_log_file(path)?)),
    };
    let filter = build_env_filter(&settings.filter);

    match settings.format {
        LogFormat::Json => {
            let layer = fmt::layer().json().with_writer(writer);
            tracing_subscriber::registry().with(filter).with(layer).try_init()?;
        }
        LogFormat::Compact => {
            let layer = fmt::layer()
                .compact()
                .with_writer(writer)
                .with_ansi(settings.ansi)
                .with_target(false);
            tracing_subscriber::registry().with(filter).with(layer).try_init()?;
        }
        LogFormat::Pretty => {
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(settings.ansi)
                .with_target(false);
            tracing_subscriber::registry().with(filter).with(layer).try_init()?;
        }
    }
    Ok(())
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// `RUST_LOG` wins; otherwise use the configured directive, falling back to
/// `info` if it does not parse.
fn build_env_filter(directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(directive))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}
