//! Command-line argument configuration source

use std::path::{Path, PathBuf};

use crate::cli::args::{Args, Commands};
use crate::error::Result;
use crate::models::config::RegifyConfig;
use super::ConfigSource;

/// Command-line argument configuration source
#[derive(Debug)]
pub struct CliConfig {
    args: CliArgs,
    name: String,
    priority: u8,
}

/// The flags that feed configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub output: Option<PathBuf>,
    pub base_path: Option<String>,
    pub config: Option<PathBuf>,
}

impl CliConfig {
    /// Create a new CLI configuration source
    pub fn new(args: CliArgs) -> Self {
        Self {
            args,
            name: "command-line arguments".to_string(),
            priority: 30,
        }
    }

    /// Create a CLI configuration source from parsed arguments
    pub fn from_args(args: &Args) -> Self {
        let mut cli_args = CliArgs {
            config: args.config.clone(),
            ..Default::default()
        };

        if let Commands::Generate(generate) = &args.command {
            cli_args.output = generate.output.clone();
            cli_args.base_path = generate.base_path.clone();
        }

        Self::new(cli_args)
    }

    /// Explicit `--config` file, if one was passed
    pub fn config_path(&self) -> Option<&Path> {
        self.args.config.as_deref()
    }

    pub fn args(&self) -> &CliArgs {
        &self.args
    }
}

impl ConfigSource for CliConfig {
    fn load(&self) -> Result<RegifyConfig> {
        Ok(RegifyConfig {
            output_dir: self.args.output.clone(),
            base_path: self.args.base_path.clone(),
            ..Default::default()
        })
    }

    fn is_available(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }
}
