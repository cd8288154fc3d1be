//! Generation driver for files and directories of components
//!
//! Validates `generate` options, runs one walk per component and saves or
//! returns the manifests. Directory inputs are processed in parallel; each
//! walk owns its state, and one file's failure does not stop its siblings.

use crate::core::parallel::{build_pool, parallel_process_with_progress, ProgressUpdate};
use crate::core::walker::generate_registry;
use crate::error::{RegifyError, Result};
use crate::models::{Manifest, RegifyConfig};
use crate::output::save_manifest;
use crate::utils::paths::{first_dot_segment, relative_path};
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Component file extensions `generate` accepts
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jsx", "tsx", "ts", "js"];

/// Directory created under a directory input when no output dir is configured
pub const DEFAULT_OUTPUT_SUBDIR: &str = "registry";

/// Options for one `generate` invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Output file name stem for a file input; ignored for directories
    pub name: Option<String>,
    pub input: PathBuf,
    /// Return manifests instead of saving them
    pub raw_json: bool,
    /// Worker threads for directory inputs
    pub jobs: Option<usize>,
}

impl GenerateOptions {
    /// Check the options before any walk starts
    pub fn validate(&self, cwd: &Path) -> Result<()> {
        if let Some(name) = &self.name {
            let trimmed = name.trim();
            if trimmed.is_empty() || trimmed.starts_with(|c: char| c.is_ascii_digit()) {
                return Err(RegifyError::invalid_option(
                    "Component name must not start with a number",
                ));
            }
        }

        let input = cwd.join(&self.input);
        if !input.exists() {
            return Err(RegifyError::invalid_option(format!(
                "Path must exist: {}",
                self.input.display()
            )));
        }

        if input.is_file() && !has_supported_extension(&input) {
            return Err(RegifyError::invalid_option(
                "Path must be a directory or a file with extension .jsx, .tsx, .ts, or .js",
            ));
        }

        Ok(())
    }
}

/// A manifest produced for one component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedManifest {
    /// Component file the walk started from
    pub source: PathBuf,
    pub manifest: Manifest,
    /// Saved location relative to the working directory, unless raw JSON
    pub saved_to: Option<PathBuf>,
}

/// A component whose generation failed
#[derive(Debug)]
pub struct FileFailure {
    pub source: PathBuf,
    pub error: RegifyError,
}

/// Whether the input was a single file or a directory of components
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    File,
    Directory,
}

/// Outcome of a `generate` run
#[derive(Debug)]
pub struct GenerationReport {
    pub input_kind: InputKind,
    /// Successful generations in input order
    pub generated: Vec<GeneratedManifest>,
    pub failures: Vec<FileFailure>,
}

impl GenerationReport {
    pub fn total(&self) -> usize {
        self.generated.len() + self.failures.len()
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn manifests(&self) -> impl Iterator<Item = &Manifest> {
        self.generated.iter().map(|g| &g.manifest)
    }

    /// `BatchFailed` if any component failed
    pub fn check(&self) -> Result<()> {
        if self.is_success() {
            Ok(())
        } else {
            Err(RegifyError::BatchFailed {
                failed: self.failures.len(),
                total: self.total(),
            })
        }
    }
}

/// Runs `generate` against a merged configuration
pub struct Generator<'c> {
    config: &'c RegifyConfig,
    cwd: PathBuf,
}

impl<'c> Generator<'c> {
    /// Generator rooted at the process working directory
    pub fn new(config: &'c RegifyConfig) -> Result<Self> {
        Ok(Self::with_cwd(config, env::current_dir()?))
    }

    /// Generator that resolves relative paths against `cwd`
    pub fn with_cwd(config: &'c RegifyConfig, cwd: impl Into<PathBuf>) -> Self {
        Self {
            config,
            cwd: cwd.into(),
        }
    }

    /// Validate options and generate manifests for a file or directory input
    ///
    /// A file input fails with the walk's error. A directory input always
    /// returns a report; check `GenerationReport::check` for failures.
    pub fn run<P>(&self, options: &GenerateOptions, on_progress: P) -> Result<GenerationReport>
    where
        P: Fn(ProgressUpdate) + Send + Sync,
    {
        options.validate(&self.cwd)?;

        let input = self.cwd.join(&options.input);
        if input.is_dir() {
            self.run_directory(&input, options, on_progress)
        } else {
            self.run_file(&input, options, on_progress)
        }
    }

    fn run_file<P>(&self, input: &Path, options: &GenerateOptions, on_progress: P) -> Result<GenerationReport>
    where
        P: Fn(ProgressUpdate),
    {
        info!(input = %input.display(), "Generating registry for file");

        let output_dir = self.output_dir_or(|| {
            input.parent().map(Path::to_path_buf).unwrap_or_else(|| self.cwd.clone())
        });

        let stem_source = match &options.name {
            Some(name) => name.clone(),
            None => file_name_of(input),
        };
        let file_name = format!("{}.json", first_dot_segment(&stem_source));

        let generated = self.generate_one(input, &output_dir, &file_name, options.raw_json)?;
        on_progress(ProgressUpdate::new(1, 1, describe_generated(&generated), true));

        Ok(GenerationReport {
            input_kind: InputKind::File,
            generated: vec![generated],
            failures: Vec::new(),
        })
    }

    fn run_directory<P>(&self, input: &Path, options: &GenerateOptions, on_progress: P) -> Result<GenerationReport>
    where
        P: Fn(ProgressUpdate) + Send + Sync,
    {
        if options.name.is_some() {
            debug!("--name is ignored for directory inputs");
        }

        let files = list_components(input)?;
        let output_dir = self.output_dir_or(|| input.join(DEFAULT_OUTPUT_SUBDIR));
        info!(
            input = %input.display(),
            count = files.len(),
            jobs = ?options.jobs,
            "Generating registries for directory"
        );

        let pool = build_pool(options.jobs)?;
        let results = parallel_process_with_progress(
            &pool,
            files.clone(),
            |file| {
                let file_name = format!("{}.json", first_dot_segment(&file_name_of(&file)));
                self.generate_one(&file, &output_dir, &file_name, options.raw_json)
            },
            describe,
            on_progress,
        );

        let mut report = GenerationReport {
            input_kind: InputKind::Directory,
            generated: Vec::new(),
            failures: Vec::new(),
        };

        for (file, result) in files.into_iter().zip(results) {
            match result {
                Ok(generated) => report.generated.push(generated),
                Err(error) => {
                    warn!(file = %file.display(), error = %error, "Registry generation failed");
                    report.failures.push(FileFailure { source: file, error });
                }
            }
        }

        Ok(report)
    }

    /// Walk one component and save it unless raw JSON was requested
    fn generate_one(
        &self,
        file: &Path,
        output_dir: &Path,
        file_name: &str,
        raw_json: bool,
    ) -> Result<GeneratedManifest> {
        let manifest = generate_registry(file, self.config)?;
        debug!(
            file = %file.display(),
            files = manifest.files.len(),
            dependencies = manifest.dependencies.len(),
            "Walk complete"
        );

        let saved_to = if raw_json {
            None
        } else {
            let saved = save_manifest(&manifest, output_dir, file_name)?;
            Some(relative_path(&saved, &self.cwd))
        };

        Ok(GeneratedManifest {
            source: file.to_path_buf(),
            manifest,
            saved_to,
        })
    }

    fn output_dir_or(&self, default: impl FnOnce() -> PathBuf) -> PathBuf {
        match &self.config.output_dir {
            Some(dir) => self.cwd.join(dir),
            None => default(),
        }
    }
}

/// Progress message for one finished component
fn describe(result: &Result<GeneratedManifest>) -> (String, bool) {
    match result {
        Ok(generated) => (describe_generated(generated), true),
        Err(error) => (error.to_string(), false),
    }
}

fn describe_generated(generated: &GeneratedManifest) -> String {
    match &generated.saved_to {
        Some(path) => format!("Saved to - {}", path.display()),
        None => format!("Generated - {}", generated.manifest.name),
    }
}

/// Supported component files directly inside `dir`, sorted by path
fn list_components(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            match e.into_io_error() {
                Some(source) => RegifyError::IoRead { path, source },
                None => RegifyError::PermissionDenied { path },
            }
        })?;
        if entry.file_type().is_file() && has_supported_extension(entry.path()) {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext))
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
