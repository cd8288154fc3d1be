use std::process;

use regify::{
    cli::{Args, Command},
    error::{ErrorSeverity, RegifyError},
};

fn main() {
    let args = Args::parse_args();

    setup_logging(args.verbose, args.quiet);

    let command = Command::from_args(args);
    let exit_code = run_command(command);

    process::exit(exit_code);
}

/// Install the stderr log subscriber; `RUST_LOG` overrides the flags
fn setup_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if quiet {
            EnvFilter::new("error")
        } else {
            match verbose {
                0 => EnvFilter::new("warn"),
                1 => EnvFilter::new("debug"),
                _ => EnvFilter::new("trace"),
            }
        }
    });

    let formatter = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .with_level(true);

    // A second init (e.g. from tests) is harmless
    let _ = tracing_subscriber::registry()
        .with(formatter)
        .with(filter)
        .try_init();
}

/// Run the command and map its outcome to an exit code
fn run_command(command: Command) -> i32 {
    match command.execute() {
        Ok(()) => 0,
        Err(err) => report_error(&err),
    }
}

fn report_error(err: &RegifyError) -> i32 {
    // Batch failures were already listed in the summary
    if !matches!(err, RegifyError::BatchFailed { .. }) {
        eprintln!("\nError: {}", err.user_message());
    }

    if let Some(suggestion) = suggestion(err.root_cause()) {
        eprintln!("Suggestion: {}", suggestion);
    }

    let exit_code = match err.severity() {
        ErrorSeverity::Warning => 0,
        ErrorSeverity::Error => 1,
        ErrorSeverity::Critical => 2,
    };

    if exit_code > 0 {
        eprintln!("\nExiting with code {} due to {}", exit_code, err.severity());
    }

    exit_code
}

fn suggestion(err: &RegifyError) -> Option<&'static str> {
    match err {
        RegifyError::UnresolvedImport { .. } => {
            Some("Check the import for typos, or add a matching \"paths\" entry to tsconfig.json")
        }
        RegifyError::CircularDependency { .. } => {
            Some("Break the cycle by moving shared code into a separate module")
        }
        RegifyError::ConfigNotFound { .. } => {
            Some("Run `regify init` or pass an existing file with --config")
        }
        RegifyError::PermissionDenied { .. } => Some("Check file permissions"),
        _ => None,
    }
}
