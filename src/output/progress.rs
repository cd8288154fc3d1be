//! Progress reporting functionality
//!
//! Console output for people: a spinner while registries are generated and
//! coloured `Success:`/`Info:`/`Warning:`/`Error:` lines. Nothing here goes
//! through `tracing`; logs and console messages are separate channels.

use crate::core::parallel::ProgressUpdate;
use ansi_term::Colour::{Blue, Green, Red, Yellow};
use ansi_term::Colour;
use indicatif::{ProgressBar, ProgressStyle};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

/// Progress reporter for `generate` and `init`
pub struct ProgressReporter {
    quiet: bool,
    verbose: bool,
    use_colors: bool,
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    /// Create a new progress reporter
    ///
    /// In quiet mode only warnings and errors are printed.
    pub fn new(quiet: bool, verbose: bool, use_colors: bool) -> Self {
        Self {
            quiet,
            verbose,
            use_colors,
            spinner: Mutex::new(None),
        }
    }

    /// Start the spinner with an initial message
    pub fn start(&self, message: &str) {
        if self.quiet {
            return;
        }

        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));

        *self.spinner.lock() = Some(spinner);
    }

    /// Report one finished component
    pub fn update_from(&self, progress: ProgressUpdate) {
        if progress.succeeded {
            self.success(&progress.message);
        } else {
            self.error(&progress.message);
        }

        if let Some(spinner) = self.spinner.lock().as_ref() {
            spinner.set_message(format!(
                "Processing [{}/{}] ({:.0}%)",
                progress.current,
                progress.total,
                progress.percentage()
            ));
        }

        if self.verbose && !self.quiet {
            self.print(&format!("[{}/{}] done", progress.current, progress.total));
        }
    }

    /// Stop the spinner, leaving a final success line
    pub fn finish_success(&self, message: &str) {
        if let Some(spinner) = self.spinner.lock().take() {
            spinner.finish_and_clear();
        }
        self.success(message);
    }

    /// Stop the spinner, leaving a final failure line
    pub fn finish_failure(&self, message: &str) {
        if let Some(spinner) = self.spinner.lock().take() {
            spinner.finish_and_clear();
        }
        self.error(message);
    }

    /// Print a plain line (respects quiet mode)
    pub fn print(&self, message: &str) {
        if !self.quiet {
            self.emit(message.to_string(), false);
        }
    }

    pub fn success(&self, message: &str) {
        if !self.quiet {
            self.emit(self.label(Green, "Success:", message), false);
        }
    }

    pub fn info(&self, message: &str) {
        if !self.quiet {
            self.emit(self.label(Blue, "Info:", message), false);
        }
    }

    /// Print a warning message (always printed, even in quiet mode)
    pub fn warn(&self, message: &str) {
        self.emit(self.label(Yellow, "Warning:", message), true);
    }

    /// Print an error message (always printed, even in quiet mode)
    pub fn error(&self, message: &str) {
        self.emit(self.label(Red, "Error:", message), true);
    }

    /// Check if quiet mode is enabled
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    fn label(&self, colour: Colour, label: &str, message: &str) -> String {
        if self.use_colors {
            format!("{} {}", colour.bold().paint(label), colour.paint(message))
        } else {
            format!("{} {}", label, message)
        }
    }

    /// Print above the spinner when one is running
    fn emit(&self, line: String, to_stderr: bool) {
        let spinner = self.spinner.lock();
        match spinner.as_ref() {
            Some(bar) => bar.suspend(|| print_line(&line, to_stderr)),
            None => print_line(&line, to_stderr),
        }
    }
}

fn print_line(line: &str, to_stderr: bool) {
    if to_stderr {
        eprintln!("{}", line);
    } else {
        println!("{}", line);
    }
}

/// Create a progress callback function that updates a ProgressReporter
pub fn create_progress_callback(
    reporter: Arc<ProgressReporter>,
) -> impl Fn(ProgressUpdate) + Send + Sync {
    move |progress: ProgressUpdate| {
        reporter.update_from(progress);
    }
}
