//! Configuration file parsing utilities

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{RegifyError, Result};
use crate::models::config::{RegifyConfig, CONFIG_FILE_NAME};
use super::settings::SettingsValidator;

/// Directory under the user config dir that may hold a global `regify.json`
pub const GLOBAL_CONFIG_DIR: &str = "regify";

/// Parse a `regify.json` file
pub fn parse_config_file<P: AsRef<Path>>(path: P) -> Result<RegifyConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(RegifyError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path).map_err(|e| RegifyError::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_config_content(&content, path)
}

/// Parse `regify.json` content; `path` is only used for error context
pub fn parse_config_content<P: AsRef<Path>>(content: &str, path: P) -> Result<RegifyConfig> {
    let path = path.as_ref();

    let config: RegifyConfig =
        serde_json::from_str(content).map_err(|e| RegifyError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })?;

    SettingsValidator::validate(&config).map_err(|e| {
        RegifyError::config_error(format!("{} (in {})", e.root_cause(), path.display()))
    })?;

    Ok(config)
}

/// Candidate config files, in lookup order
pub fn default_config_locations(cwd: &Path) -> Vec<PathBuf> {
    let mut locations = vec![cwd.join(CONFIG_FILE_NAME)];
    if let Some(config_dir) = dirs::config_dir() {
        locations.push(config_dir.join(GLOBAL_CONFIG_DIR).join(CONFIG_FILE_NAME));
    }
    locations
}

/// Find and load configuration from the default locations around `cwd`
pub fn find_default_config_in(cwd: &Path) -> Result<Option<RegifyConfig>> {
    find_first_config(&default_config_locations(cwd))
}

/// Load the first existing file among `locations`
pub fn find_first_config(locations: &[PathBuf]) -> Result<Option<RegifyConfig>> {
    match locations.iter().find(|path| path.is_file()) {
        Some(path) => parse_config_file(path).map(Some),
        None => Ok(None),
    }
}

/// Write the scaffold configuration to `path`
///
/// Returns `false` without touching anything if the file already exists.
pub fn create_default_config<P: AsRef<Path>>(path: P) -> Result<bool> {
    let path = path.as_ref();

    if path.exists() {
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(RegifyError::io_error)?;
        }
    }

    let content = serde_json::to_string_pretty(&RegifyConfig::scaffold())
        .map_err(|e| RegifyError::JsonSerialize { source: e })?;

    fs::write(path, content).map_err(|e| RegifyError::OutputWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(true)
}
