//! Effective run settings: CLI flags over the config file over defaults.

use std::path::PathBuf;
use std::time::Duration;

use crate::cli::Args;
use crate::config::Config;
use crate::logging::{default_log_path, LogLevel};
use crate::render::{FacingMode, StreamConstraints};

#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    pub constraints: StreamConstraints,
    pub display_fps: u32,
    pub status_bar: bool,
    pub autostart: bool,
    pub log_level: LogLevel,
    pub log_file: PathBuf,
}

impl RunSettings {
    pub fn resolve(args: &Args, config: &Config) -> Self {
        let constraints = StreamConstraints {
            facing: FacingMode::User,
            ideal_width: config.camera.width,
            ideal_height: config.camera.height,
            device_index: args.camera.unwrap_or(config.camera.device),
            fps: config.camera.fps,
            mirror: args.mirror_override().unwrap_or(config.camera.mirror),
        };

        Self {
            constraints,
            display_fps: args.fps.unwrap_or(config.display.fps).max(1),
            status_bar: config.display.status_bar && !args.no_status,
            autostart: args.autostart,
            log_level: args.log_level.unwrap_or(config.log.level),
            log_file: args
                .log_file
                .clone()
                .or_else(|| config.log.file.clone())
                .unwrap_or_else(default_log_path),
        }
    }

    /// Time between display frames.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_micros(1_000_000 / u64::from(self.display_fps.max(1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn args(argv: &[&str]) -> Args {
        let mut full = vec!["matrix-cam"];
        full.extend_from_slice(argv);
        Args::parse_from(full)
    }

    #[test]
    fn test_defaults_without_file_or_flags() {
        let settings = RunSettings::resolve(&args(&[]), &Config::default());
        assert_eq!(settings.constraints, StreamConstraints::default());
        assert_eq!(settings.display_fps, 60);
        assert!(settings.status_bar);
        assert!(!settings.autostart);
        assert_eq!(settings.log_level, LogLevel::Info);
        assert_eq!(settings.log_file, default_log_path());
    }

    #[test]
    fn test_config_overrides_defaults() {
        let mut config = Config::default();
        config.camera.device = 2;
        config.camera.mirror = false;
        config.display.status_bar = false;
        config.log.level = LogLevel::Warn;
        config.log.file = Some(PathBuf::from("/tmp/rain.log"));

        let settings = RunSettings::resolve(&args(&[]), &config);
        assert_eq!(settings.constraints.device_index, 2);
        assert!(!settings.constraints.mirror);
        assert!(!settings.status_bar);
        assert_eq!(settings.log_level, LogLevel::Warn);
        assert_eq!(settings.log_file, PathBuf::from("/tmp/rain.log"));
    }

    #[test]
    fn test_cli_overrides_config() {
        let mut config = Config::default();
        config.camera.device = 2;
        config.camera.mirror = false;
        config.display.fps = 30;

        let settings = RunSettings::resolve(
            &args(&[
                "--camera", "5",
                "--mirror",
                "--fps", "24",
                "--log-level", "trace",
                "--log-file", "/tmp/cli.log",
            ]),
            &config,
        );
        assert_eq!(settings.constraints.device_index, 5);
        assert!(settings.constraints.mirror);
        assert_eq!(settings.display_fps, 24);
        assert_eq!(settings.log_level, LogLevel::Trace);
        assert_eq!(settings.log_file, PathBuf::from("/tmp/cli.log"));
    }

    #[test]
    fn test_no_status_flag_wins() {
        let settings = RunSettings::resolve(&args(&["--no-status"]), &Config::default());
        assert!(!settings.status_bar);
    }

    #[test]
    fn test_frame_interval() {
        let mut settings = RunSettings::resolve(&args(&[]), &Config::default());
        settings.display_fps = 50;
        assert_eq!(settings.frame_interval(), Duration::from_millis(20));
    }
}
