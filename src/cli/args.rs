//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::logging::LogLevel;

/// Renders your webcam as matrix-style digital rain in the terminal
#[derive(Parser, Debug)]
#[command(name = "matrix-cam")]
#[command(version, about = "Webcam digital rain for the terminal", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Camera device index (from list-cameras)
    #[arg(long)]
    pub camera: Option<u32>,

    /// Mirror camera horizontally
    #[arg(long, conflicts_with = "no_mirror")]
    pub mirror: bool,

    /// Don't mirror the camera
    #[arg(long)]
    pub no_mirror: bool,

    /// Display refresh rate in frames per second
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: Option<u32>,

    /// Hide status bar
    #[arg(long)]
    pub no_status: bool,

    /// Start the rain immediately instead of waiting for `s`
    #[arg(long, short)]
    pub autostart: bool,

    /// Config file path
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log verbosity
    #[arg(long)]
    pub log_level: Option<LogLevel>,
}

impl Args {
    /// Mirror override from the command line, if any.
    pub fn mirror_override(&self) -> Option<bool> {
        match (self.mirror, self.no_mirror) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List available cameras
    ListCameras,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Create default config file
    Init,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["matrix-cam"]);
        assert!(args.camera.is_none());
        assert!(args.mirror_override().is_none());
        assert!(args.fps.is_none());
        assert!(!args.no_status);
        assert!(!args.autostart);
        assert!(args.config.is_none());
        assert!(args.log_file.is_none());
        assert!(args.log_level.is_none());
        assert!(args.command.is_none());
    }

    #[test]
    fn test_args_mirror_flags() {
        let args = Args::parse_from(["matrix-cam", "--mirror"]);
        assert_eq!(args.mirror_override(), Some(true));

        let args = Args::parse_from(["matrix-cam", "--no-mirror"]);
        assert_eq!(args.mirror_override(), Some(false));

        assert!(Args::try_parse_from(["matrix-cam", "--mirror", "--no-mirror"]).is_err());
    }

    #[test]
    fn test_args_fps_range() {
        let args = Args::parse_from(["matrix-cam", "--fps", "30"]);
        assert_eq!(args.fps, Some(30));

        assert!(Args::try_parse_from(["matrix-cam", "--fps", "0"]).is_err());
    }

    #[test]
    fn test_args_log_level() {
        let args = Args::parse_from(["matrix-cam", "--log-level", "debug"]);
        assert_eq!(args.log_level, Some(LogLevel::Debug));
    }

    #[test]
    fn test_args_config_option() {
        let args = Args::parse_from(["matrix-cam", "--config", "/tmp/config.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/config.toml")));

        let args = Args::parse_from(["matrix-cam", "-c", "/tmp/test.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/test.toml")));
    }

    #[test]
    fn test_args_list_cameras_subcommand() {
        let args = Args::parse_from(["matrix-cam", "list-cameras"]);
        assert!(matches!(args.command, Some(Command::ListCameras)));
    }

    #[test]
    fn test_args_config_subcommands() {
        let args = Args::parse_from(["matrix-cam", "config", "show"]);
        assert!(matches!(
            args.command,
            Some(Command::Config { action: ConfigAction::Show })
        ));

        let args = Args::parse_from(["matrix-cam", "config", "init"]);
        assert!(matches!(
            args.command,
            Some(Command::Config { action: ConfigAction::Init })
        ));
    }

    #[test]
    fn test_args_combined_options() {
        let args = Args::parse_from([
            "matrix-cam",
            "--camera", "1",
            "--no-mirror",
            "--no-status",
            "-a",
        ]);
        assert_eq!(args.camera, Some(1));
        assert_eq!(args.mirror_override(), Some(false));
        assert!(args.no_status);
        assert!(args.autostart);
    }
}
