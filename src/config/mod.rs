//! Configuration management
//!
//! `regify.json` (explicit `--config` or discovered), then `REGIFY_*`
//! environment variables, then CLI flags, lowest precedence first.

pub mod cli;
pub mod file;
pub mod parser;
pub mod settings;

use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::models::config::RegifyConfig;

pub use cli::{CliArgs, CliConfig};
pub use file::{EnvConfig, FileConfig, ENV_PREFIX};
pub use parser::{
    create_default_config, find_default_config_in, parse_config_content, parse_config_file,
};
pub use settings::SettingsValidator;

/// Trait for configuration sources
pub trait ConfigSource {
    /// Load configuration from this source
    fn load(&self) -> Result<RegifyConfig>;

    /// Check if this configuration source is available
    fn is_available(&self) -> bool;

    /// Name of this source for logging
    fn name(&self) -> &str;

    /// Priority of this source (higher numbers take precedence)
    fn priority(&self) -> u8 {
        10
    }
}

/// Configuration builder for merging multiple sources
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: RegifyConfig,
}

impl ConfigBuilder {
    /// Start from the empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Overlay a higher-precedence layer
    pub fn merge(mut self, layer: RegifyConfig) -> Self {
        self.config.merge_from(layer);
        self
    }

    /// Load and merge a source, failing if it fails
    pub fn load_from<S: ConfigSource>(self, source: &S) -> Result<Self> {
        if !source.is_available() {
            return Ok(self);
        }
        debug!(source = source.name(), priority = source.priority(), "Loading configuration");
        Ok(self.merge(source.load()?))
    }

    /// Add an explicit config file; a missing file is an error
    pub fn add_config_file(self, path: &Path) -> Result<Self> {
        let source = FileConfig::with_path(path);
        if !source.is_available() {
            return Err(crate::error::RegifyError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        self.load_from(&source)
    }

    /// Add the first default config file found around `cwd`
    ///
    /// An absent file is fine; a present but broken one is an error.
    pub fn add_default_config_file(self, cwd: &Path) -> Result<Self> {
        match parser::find_default_config_in(cwd)? {
            Some(config) => {
                debug!(cwd = %cwd.display(), "Loaded default configuration file");
                Ok(self.merge(config))
            }
            None => Ok(self),
        }
    }

    /// Validate and return the merged configuration
    pub fn build(self) -> Result<RegifyConfig> {
        SettingsValidator::validate(&self.config)?;
        Ok(self.config)
    }
}

/// Load configuration for the process working directory and environment
pub fn load_config(cli_args: CliArgs) -> Result<RegifyConfig> {
    load_config_in(cli_args, &std::env::current_dir()?, &EnvConfig::new(ENV_PREFIX))
}

/// Load configuration with an explicit working directory and environment source
pub fn load_config_in(cli_args: CliArgs, cwd: &Path, env: &EnvConfig) -> Result<RegifyConfig> {
    let mut builder = ConfigBuilder::new();

    builder = match &cli_args.config {
        Some(path) => builder.add_config_file(&cwd.join(path))?,
        None => builder.add_default_config_file(cwd)?,
    };

    builder = builder.load_from(env)?;
    builder = builder.load_from(&CliConfig::new(cli_args))?;

    builder.build()
}
