//! File logging. The terminal is busy drawing rain, so log output goes to
//! a file instead of stderr.

use clap::ValueEnum;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use thiserror::Error;

const LOG_FILE_NAME: &str = "matrix-cam.log";

/// Log verbosity, shared by the CLI and the config file.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Failed to open log file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Logger already initialized: {0}")]
    Init(#[from] log::SetLoggerError),
}

/// `<cache_dir>/matrix-cam/matrix-cam.log`, or the working directory when
/// the platform has no cache dir.
pub fn default_log_path() -> PathBuf {
    dirs::cache_dir()
        .map(|dir| dir.join("matrix-cam").join(LOG_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(LOG_FILE_NAME))
}

/// Install a [`WriteLogger`] appending to `path`.
pub fn init(level: LogLevel, path: &Path) -> Result<(), LoggingError> {
    let io_err = |source| LoggingError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(io_err)?;

    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Error)
        .build();
    WriteLogger::init(level.into(), config, log_file)?;

    log::info!("Logging to {}", path.display());
    Ok(())
}
