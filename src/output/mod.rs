//! Output formatting and writing functionality

mod formatters;
mod progress;
mod writers;

pub use self::formatters::{format_manifest_json, format_report_json, format_report_text};
pub use self::progress::{create_progress_callback, ProgressReporter};
pub use self::writers::{save_manifest, FileWriter, OutputWriter, StdoutWriter};

use crate::core::generator::GenerationReport;
use crate::error::Result;

/// Trait for different output formatters
pub trait Formatter {
    /// Format a generation report into a string
    fn format(&self, report: &GenerationReport) -> Result<String>;
}

/// Text formatter for the human-readable run summary
pub struct TextFormatter {
    pub use_colors: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, report: &GenerationReport) -> Result<String> {
        Ok(format_report_text(report, self.use_colors))
    }
}

/// JSON formatter for `--rawjson`
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format(&self, report: &GenerationReport) -> Result<String> {
        format_report_json(report)
    }
}

/// Create a formatter based on the output mode
pub fn create_formatter(raw_json: bool, use_colors: bool) -> Box<dyn Formatter> {
    if raw_json {
        Box::new(JsonFormatter)
    } else {
        Box::new(TextFormatter::new(use_colors))
    }
}
