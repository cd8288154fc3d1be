//! Output formatting functionality
//!
//! JSON output is the manifest wire format, pretty-printed with two-space
//! indentation. Text output is the human summary printed after a run.

use crate::core::generator::{GenerationReport, InputKind};
use crate::error::{RegifyError, Result};
use crate::models::Manifest;
use ansi_term::Colour::{Green, Red, Yellow};
use ansi_term::Style;
use serde::Serialize;

fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| RegifyError::JsonSerialize { source: e })
}

/// Format one manifest as pretty JSON
pub fn format_manifest_json(manifest: &Manifest) -> Result<String> {
    to_pretty_json(manifest)
}

/// Format a report's manifests: a single object for a file input, an array
/// for a directory input
pub fn format_report_json(report: &GenerationReport) -> Result<String> {
    match (report.input_kind, report.generated.as_slice()) {
        (InputKind::File, [single]) => format_manifest_json(&single.manifest),
        _ => to_pretty_json(&report.manifests().collect::<Vec<_>>()),
    }
}

/// Format the closing summary of a run
pub fn format_report_text(report: &GenerationReport, use_colors: bool) -> String {
    let mut output = String::new();

    let headline = match (report.input_kind, report.is_success()) {
        (InputKind::File, true) => "Registry generated successfully!".to_string(),
        (InputKind::Directory, true) if report.total() == 0 => {
            "No component files found.".to_string()
        }
        (InputKind::Directory, true) => {
            format!("All registries generated successfully! ({})", report.total())
        }
        (_, false) => format!(
            "Generated {} of {} registries ({} failed)",
            report.generated.len(),
            report.total(),
            report.failures.len()
        ),
    };

    if !use_colors {
        output.push_str(&headline);
    } else if report.is_success() && report.total() > 0 {
        output.push_str(&Green.bold().paint(headline).to_string());
    } else if report.is_success() {
        output.push_str(&Yellow.paint(headline).to_string());
    } else {
        output.push_str(&Red.bold().paint(headline).to_string());
    }
    output.push('\n');

    for failure in &report.failures {
        let file = failure.source.display().to_string();
        let message = failure.error.root_cause().to_string();
        if use_colors {
            output.push_str(&format!(
                "  {} {}: {}\n",
                Red.paint("x"),
                Style::new().bold().paint(file),
                Style::new().dimmed().paint(message)
            ));
        } else {
            output.push_str(&format!("  x {}: {}\n", file, message));
        }
    }

    output
}
