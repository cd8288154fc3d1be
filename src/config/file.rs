//! File and environment configuration sources

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{RegifyError, Result};
use crate::models::config::{RegifyConfig, CONFIG_FILE_NAME};
use super::{parser, ConfigSource};

/// Prefix for environment overrides (`REGIFY_OUTPUT_DIR`, `REGIFY_BASE_PATH`)
pub const ENV_PREFIX: &str = "REGIFY";

/// `regify.json` configuration source
pub struct FileConfig {
    path: PathBuf,
    name: String,
    priority: u8,
}

impl FileConfig {
    /// Source for `regify.json` in the current directory
    pub fn new() -> Self {
        Self {
            path: PathBuf::from(CONFIG_FILE_NAME),
            name: "default config file".to_string(),
            priority: 20,
        }
    }

    /// Source for an explicit config file
    pub fn with_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            name: format!("config file ({})", path.as_ref().display()),
            priority: 20,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the scaffold configuration at this location
    pub fn create_default(&self) -> Result<bool> {
        parser::create_default_config(&self.path)
    }
}

impl ConfigSource for FileConfig {
    fn load(&self) -> Result<RegifyConfig> {
        if !self.is_available() {
            return Err(RegifyError::ConfigNotFound {
                path: self.path.clone(),
            });
        }

        parser::parse_config_file(&self.path)
    }

    fn is_available(&self) -> bool {
        self.path.is_file()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Environment variable configuration source
pub struct EnvConfig {
    prefix: String,
    name: String,
    priority: u8,
    vars: Option<HashMap<String, String>>,
}

impl EnvConfig {
    /// Source reading `<prefix>_*` from the process environment
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        Self {
            name: format!("{} environment variables", &prefix),
            prefix,
            priority: 10,
            vars: None,
        }
    }

    /// Read from a fixed set of variables instead of the process environment
    pub fn with_vars(mut self, vars: HashMap<String, String>) -> Self {
        self.vars = Some(vars);
        self
    }

    fn var(&self, suffix: &str) -> Option<String> {
        let key = format!("{}_{}", self.prefix, suffix);
        let value = match &self.vars {
            Some(vars) => vars.get(&key).cloned(),
            None => std::env::var(&key).ok(),
        };
        value.filter(|v| !v.is_empty())
    }
}

impl ConfigSource for EnvConfig {
    fn load(&self) -> Result<RegifyConfig> {
        Ok(RegifyConfig {
            output_dir: self.var("OUTPUT_DIR").map(PathBuf::from),
            base_path: self.var("BASE_PATH"),
            ..Default::default()
        })
    }

    fn is_available(&self) -> bool {
        self.var("OUTPUT_DIR").is_some() || self.var("BASE_PATH").is_some()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }
}
