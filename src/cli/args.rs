//! Command-line argument parsing

use clap::{ArgAction, Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

/// Regify - turn components into shareable registry manifests
#[derive(Parser, Debug)]
#[command(name = "regify")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Generate shadcn-compatible registry manifests from your components")]
#[command(long_about = "Regify walks the static import graph of a component, inlines every local file \
it reaches, classifies each one, and records npm packages and remote registry components as \
dependencies. The result is a registry manifest the shadcn CLI can install.")]
#[command(after_help = "EXAMPLES:

Getting Started:
    # Create regify.json in the current directory
    regify init

Single Component:
    # Write registry/button.json next to the component
    regify generate --input src/components/button.tsx

    # Choose the manifest name and output directory
    regify generate --input src/components/button.tsx --name fancy-button --output public/r

    # Print the manifest instead of saving it
    regify generate --input src/components/button.tsx --rawjson

Whole Directory:
    # One manifest per .tsx/.jsx/.ts/.js file, in parallel
    regify generate --input src/components/ui

    # Limit the worker threads
    regify generate --input src/components/ui --jobs 2

Environment:
    REGIFY_OUTPUT_DIR    Default output directory (overrides regify.json)
    REGIFY_BASE_PATH     Prefix for file paths inside manifests
    RUST_LOG             Log filter, e.g. RUST_LOG=regify=debug")]
pub struct Args {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only print warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_colors: bool,

    /// Path to a regify.json to use instead of the discovered one
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Create a regify.json with default settings in the current directory
    Init,

    /// Generate registry manifests for a component file or directory
    Generate(GenerateArgs),
}

/// Arguments for `regify generate`
#[derive(ClapArgs, Debug, Clone, PartialEq, Eq)]
pub struct GenerateArgs {
    /// Component file (.jsx, .tsx, .ts, .js) or directory of components
    #[arg(short, long, value_name = "PATH")]
    pub input: PathBuf,

    /// Manifest file name for a single file input
    #[arg(short, long)]
    pub name: Option<String>,

    /// Output directory (overrides regify.json and REGIFY_OUTPUT_DIR)
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Print manifests as JSON instead of saving them
    #[arg(long)]
    pub rawjson: bool,

    /// Prefix for file paths recorded in manifests
    #[arg(long, value_name = "PREFIX")]
    pub base_path: Option<String>,

    /// Worker threads for directory inputs (defaults to the CPU count)
    #[arg(short, long, value_parser = clap::value_parser!(usize))]
    pub jobs: Option<usize>,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Whether console output should be coloured
    pub fn use_colors(&self) -> bool {
        !self.no_colors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_init() {
        let args = Args::try_parse_from(["regify", "init"]).unwrap();
        assert_eq!(args.command, Commands::Init);
        assert_eq!(args.verbose, 0);
        assert!(args.use_colors());
    }

    #[test]
    fn test_parse_generate_full() {
        let args = Args::try_parse_from([
            "regify",
            "-vv",
            "--no-colors",
            "generate",
            "-i",
            "src/button.tsx",
            "--name",
            "button",
            "-o",
            "out",
            "--rawjson",
            "--base-path",
            "components/ui",
            "--jobs",
            "4",
        ])
        .unwrap();

        assert_eq!(args.verbose, 2);
        assert!(!args.use_colors());
        match args.command {
            Commands::Generate(generate) => {
                assert_eq!(generate.input, PathBuf::from("src/button.tsx"));
                assert_eq!(generate.name.as_deref(), Some("button"));
                assert_eq!(generate.output, Some(PathBuf::from("out")));
                assert!(generate.rawjson);
                assert_eq!(generate.base_path.as_deref(), Some("components/ui"));
                assert_eq!(generate.jobs, Some(4));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args =
            Args::try_parse_from(["regify", "generate", "--input", "ui", "--quiet", "--config", "r.json"])
                .unwrap();
        assert!(args.quiet);
        assert_eq!(args.config, Some(PathBuf::from("r.json")));
    }

    #[test]
    fn test_generate_requires_input() {
        assert!(Args::try_parse_from(["regify", "generate"]).is_err());
        assert!(Args::try_parse_from(["regify"]).is_err());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Args::try_parse_from(["regify", "-q", "-v", "init"]).is_err());
    }
}
