//! Command definitions and execution logic

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use crate::cli::args::{Args, Commands, GenerateArgs};
use crate::config::{create_default_config, load_config_in, CliConfig, EnvConfig, ENV_PREFIX};
use crate::core::{GenerateOptions, Generator, InputKind};
use crate::error::{Result, ResultExt};
use crate::models::config::CONFIG_FILE_NAME;
use crate::output::{
    create_formatter, create_progress_callback, format_report_json, Formatter, OutputWriter,
    ProgressReporter, StdoutWriter,
};

/// Console settings shared by every command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleOptions {
    pub quiet: bool,
    pub verbose: u8,
    pub use_colors: bool,
}

/// Available commands
#[derive(Debug)]
pub enum Command {
    /// Write a default `regify.json`
    Init { console: ConsoleOptions },
    /// Generate manifests for a file or directory
    Generate {
        args: GenerateArgs,
        cli_config: CliConfig,
        console: ConsoleOptions,
    },
}

impl Command {
    /// Create a command from parsed arguments
    pub fn from_args(args: Args) -> Self {
        let console = ConsoleOptions {
            quiet: args.quiet,
            verbose: args.verbose,
            use_colors: args.use_colors(),
        };
        let cli_config = CliConfig::from_args(&args);

        match args.command {
            Commands::Init => Command::Init { console },
            Commands::Generate(generate) => Command::Generate {
                args: generate,
                cli_config,
                console,
            },
        }
    }

    /// Execute against the process working directory and environment
    pub fn execute(self) -> Result<()> {
        let cwd = std::env::current_dir()?;
        self.execute_in(&cwd, &EnvConfig::new(ENV_PREFIX))
    }

    /// Execute with an explicit working directory and environment source
    pub fn execute_in(self, cwd: &Path, env: &EnvConfig) -> Result<()> {
        match self {
            Command::Init { console } => init(cwd, console),
            Command::Generate {
                args,
                cli_config,
                console,
            } => generate(cwd, env, &args, &cli_config, console),
        }
    }
}

fn init(cwd: &Path, console: ConsoleOptions) -> Result<()> {
    let reporter = ProgressReporter::new(console.quiet, console.verbose > 0, console.use_colors);
    let path = cwd.join(CONFIG_FILE_NAME);

    if create_default_config(&path)? {
        info!(path = %path.display(), "Wrote default configuration");
        reporter.success(&format!("Created {}", CONFIG_FILE_NAME));
    } else {
        reporter.warn(&format!(
            "{} already exists at {}. Delete it first to recreate it.",
            CONFIG_FILE_NAME,
            path.display()
        ));
    }

    Ok(())
}

fn generate(
    cwd: &Path,
    env: &EnvConfig,
    args: &GenerateArgs,
    cli_config: &CliConfig,
    console: ConsoleOptions,
) -> Result<()> {
    let config = load_config_in(cli_config.args().clone(), cwd, env)
        .with_context(|| "Failed to load configuration")?;
    debug!(config = ?config, "Resolved configuration");

    let options = GenerateOptions {
        name: args.name.clone(),
        input: args.input.clone(),
        raw_json: args.rawjson,
        jobs: args.jobs,
    };

    // Keep stdout pure JSON under --rawjson
    let reporter = Arc::new(ProgressReporter::new(
        console.quiet || args.rawjson,
        console.verbose > 0,
        console.use_colors,
    ));
    reporter.start(&format!("Generating registry for {}", args.input.display()));

    let generator = Generator::with_cwd(&config, cwd);
    let report = match generator.run(&options, create_progress_callback(reporter.clone())) {
        Ok(report) => report,
        Err(e) => {
            reporter.finish_failure("Registry generation failed");
            return Err(e);
        }
    };

    if args.rawjson {
        StdoutWriter.write(&format_report_json(&report)?)?;
    } else {
        let summary = create_formatter(false, console.use_colors).format(&report)?;
        match (report.is_success(), report.input_kind) {
            (true, InputKind::File) => reporter.finish_success(summary.trim_end()),
            _ => {
                reporter.finish_success("Done");
                reporter.print(summary.trim_end());
            }
        }
    }

    info!(
        generated = report.generated.len(),
        failed = report.failures.len(),
        "Generation finished"
    );

    report.check()
}
