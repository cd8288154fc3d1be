//! Output writing functionality
//!
//! This module provides writers for different output destinations and the
//! manifest saving used by `generate`.

use crate::error::{RegifyError, Result};
use crate::models::Manifest;
use crate::output::formatters::format_manifest_json;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Trait for output writers
pub trait OutputWriter {
    /// Write content to the output destination
    fn write(&self, content: &str) -> Result<()>;
}

/// Writer for stdout output
#[derive(Debug)]
pub struct StdoutWriter;

impl OutputWriter for StdoutWriter {
    fn write(&self, content: &str) -> Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", content)
            .and_then(|_| stdout.flush())
            .map_err(|e| RegifyError::StdoutWrite { source: e })
    }
}

/// Writer for file output
///
/// Missing parent directories are created. The content is written as-is,
/// without a trailing newline.
#[derive(Debug)]
pub struct FileWriter {
    path: PathBuf,
}

impl FileWriter {
    /// Create a new file writer
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn output_error(&self, source: io::Error) -> RegifyError {
        RegifyError::OutputWrite {
            path: self.path.clone(),
            source,
        }
    }
}

impl OutputWriter for FileWriter {
    fn write(&self, content: &str) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.output_error(e))?;
        }

        let mut file = File::create(&self.path).map_err(|e| self.output_error(e))?;
        file.write_all(content.as_bytes())
            .map_err(|e| self.output_error(e))
    }
}

/// Write a manifest as pretty JSON to `<dir>/<file_name>`
///
/// Returns the full path written.
pub fn save_manifest(manifest: &Manifest, dir: &Path, file_name: &str) -> Result<PathBuf> {
    let json = format_manifest_json(manifest)?;
    let writer = FileWriter::new(dir.join(file_name));
    writer.write(&json)?;
    Ok(writer.path)
}
