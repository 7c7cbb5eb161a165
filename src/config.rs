//! Configuration file handling for matrix-cam.
//!
//! Loads configuration from `<config_dir>/matrix-cam/config.toml` or a custom path.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::logging::LogLevel;

/// Configuration file structure.
///
/// Every field has a default, so a partial (or empty) file is valid.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub camera: CameraConfig,
    pub display: DisplayConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CameraConfig {
    pub device: u32,
    pub mirror: bool,
    pub fps: u32,
    pub width: u32,
    pub height: u32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            device: 0,
            mirror: true,
            fps: 30,
            width: 640,
            height: 480,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Display frames per second (how often the render loop is polled)
    pub fps: u32,
    pub status_bar: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            fps: 60,
            status_bar: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: LogLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

/// Commented template written by `config init`.
pub const DEFAULT_CONFIG: &str = r#"# matrix-cam configuration

[camera]
# Camera device index (see `matrix-cam list-cameras`)
device = 0
# Mirror horizontally (selfie mode)
mirror = true
# Requested capture frame rate
fps = 30
# Ideal capture resolution
width = 640
height = 480

[display]
# How often the rain is redrawn
fps = 60
# Show status bar
status_bar = true

[log]
# off, error, warn, info, debug, trace
level = "info"
# Log file (default: platform cache dir)
# file = "/tmp/matrix-cam.log"
"#;

/// Errors that can occur when loading or writing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Config file already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("Invalid config value: {0}")]
    Invalid(String),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl Config {
    /// Load configuration from a file path.
    ///
    /// A missing default file yields the defaults; a missing file that was
    /// asked for explicitly is an error, as is one that can't be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let explicit = path.is_some();
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if !path.exists() {
            if explicit {
                return Err(ConfigError::NotFound(path));
            }
            log::debug!("No config file at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;
        let config = Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.clone(),
                source,
            },
            other => other,
        })?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate TOML content.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.camera.fps == 0 {
            return Err(ConfigError::Invalid("camera.fps must be positive".into()));
        }
        if self.camera.width == 0 || self.camera.height == 0 {
            return Err(ConfigError::Invalid(
                "camera.width and camera.height must be positive".into(),
            ));
        }
        if self.display.fps == 0 {
            return Err(ConfigError::Invalid("display.fps must be positive".into()));
        }
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Write [`DEFAULT_CONFIG`] to `path`, creating parent directories.
/// Refuses to overwrite an existing file.
pub fn write_default(path: &Path) -> Result<(), ConfigError> {
    if path.exists() {
        return Err(ConfigError::AlreadyExists(path.to_path_buf()));
    }
    let io_err = |source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    std::fs::write(path, DEFAULT_CONFIG).map_err(io_err)
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("matrix-cam").join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/matrix-cam/config.toml")
        })
}
