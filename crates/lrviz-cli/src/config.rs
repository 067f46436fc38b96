//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, local directory, system directory).

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use lrviz::{LrvizError, config::AppConfig};

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Invalid style: {0}")]
    Validation(String),
}

impl From<ConfigError> for LrvizError {
    fn from(err: ConfigError) -> Self {
        LrvizError::Config(err.to_string())
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (lrviz/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed or names an invalid color
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, LrvizError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("lrviz/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "lrviz", "lrviz") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Load configuration from a TOML file
fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, LrvizError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    let config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
    validate(&config)?;

    Ok(config)
}

/// Resolve every style color once so a typo fails at load time.
fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    let style = config.style();
    style.background_color().map_err(ConfigError::Validation)?;
    style.node_fill().map_err(ConfigError::Validation)?;
    style.node_stroke().map_err(ConfigError::Validation)?;
    style.edge_color().map_err(ConfigError::Validation)?;
    style.text_color().map_err(ConfigError::Validation)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn config_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_explicit_file() {
        let file = config_file(
            r##"
[reveal]
node_offset = 60.0

[style]
node_fill = "#fef3c7"
font_size = 11
"##,
        );

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.reveal().node_offset(), 60.0);
        assert_eq!(config.style().font_size(), 11);
        assert_eq!(config.style().font_family(), "Courier New");
    }

    #[test]
    fn test_missing_explicit_file() {
        let err = load_config(Some("no/such/config.toml")).unwrap_err();
        assert!(matches!(err, LrvizError::Config(_)));
    }

    #[test]
    fn test_invalid_toml() {
        let file = config_file("[reveal\nnode_offset = ");
        let err = load_config(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("Failed to parse TOML"));
    }

    #[test]
    fn test_invalid_color() {
        let file = config_file("[style]\nedge_color = \"not-a-color\"\n");
        let err = load_config(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("Invalid style"));
    }
}
