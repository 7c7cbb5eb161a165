//! Subcommand handlers for list-cameras and config actions.

use std::path::Path;

use super::args::ConfigAction;
use crate::camera::{self, CameraError};
use crate::config::{self, Config, ConfigError};

/// List available cameras and print them to stdout.
pub fn list_cameras() -> Result<(), CameraError> {
    let devices = camera::list_devices()?;
    if devices.is_empty() {
        println!("No cameras found.");
        println!();
        println!("Make sure your camera is connected and permissions are granted.");
        println!("On macOS, grant access in System Settings > Privacy & Security > Camera.");
    } else {
        println!("Available cameras:");
        for device in devices {
            println!("  {}", device);
        }
        println!();
        println!("Use --camera <index> to select a camera.");
    }
    Ok(())
}

/// Handle config subcommand actions against `path` (or the default path).
pub fn handle_config_action(action: ConfigAction, path: Option<&Path>) -> Result<(), ConfigError> {
    let config_path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(config::default_path);

    match action {
        ConfigAction::Show => {
            let config = Config::load(path)?;
            if config_path.exists() {
                println!("# Config file: {} (exists)", config_path.display());
            } else {
                println!("# Config file: {} (not found, showing defaults)", config_path.display());
            }
            println!();
            print!("{}", config.to_toml()?);
        }
        ConfigAction::Init => {
            config::write_default(&config_path)?;
            println!("Created config file: {}", config_path.display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_then_show() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        handle_config_action(ConfigAction::Init, Some(&path)).unwrap();
        assert!(path.exists());
        handle_config_action(ConfigAction::Show, Some(&path)).unwrap();
    }

    #[test]
    fn test_init_refuses_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "").unwrap();

        assert!(matches!(
            handle_config_action(ConfigAction::Init, Some(&path)),
            Err(ConfigError::AlreadyExists(_))
        ));
    }
}
