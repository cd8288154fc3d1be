//! Error types and definitions for regify
//!
//! Every failure the traversal can hit is a typed variant here. The core never
//! logs; it returns these and lets the CLI decide how to present them.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Error severity levels for different error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Warning level errors - operation can continue
    Warning,
    /// Error level - current operation fails but overall process can continue
    Error,
    /// Critical level - process should terminate
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "WARNING"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Main error type for regify operations
#[derive(Debug, Error)]
pub enum RegifyError {
    /// Entry file handed to the walker does not exist
    #[error("Entry file not found: {}", .path.display())]
    EntryNotFound { path: PathBuf },

    /// A file transitively imports itself
    #[error("Circular dependency detected: {chain}")]
    CircularDependency { chain: String },

    /// A relative or alias import that could not be resolved statically
    #[error("Could not resolve local import: \"{specifier}\" in {}. Ensure your tsconfig.json/jsconfig.json paths are correct.", .importer.display())]
    UnresolvedImport { specifier: String, importer: PathBuf },

    /// Internal failure while classifying a file
    #[error("Failed to detect registry type for {}: {message}", .path.display())]
    Classification { path: PathBuf, message: String },

    /// Reading a visited source file failed
    #[error("Error reading {}: {source}", .path.display())]
    IoRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The parser rejected a visited source file
    #[error("Failed to parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    /// Any failure inside one walk, tagged with the entry it started from
    #[error("Failed to generate registry for {}: {source}", .entry.display())]
    Generation {
        entry: PathBuf,
        #[source]
        source: Box<RegifyError>,
    },

    /// Standard IO errors
    #[error("IO error: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },

    /// Permission denied errors
    #[error("Permission denied accessing {}", .path.display())]
    PermissionDenied { path: PathBuf },

    /// JSON parsing errors with file context
    #[error("JSON parsing error in {}: {source}", .file.display())]
    JsonParse {
        file: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Invalid package.json structure
    #[error("Invalid package.json structure in {}: {message}", .path.display())]
    InvalidPackageJson { path: PathBuf, message: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Configuration file not found
    #[error("Configuration file not found at {}", .path.display())]
    ConfigNotFound { path: PathBuf },

    /// Configuration file read errors
    #[error("Error reading configuration file {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file parse errors
    #[error("Error parsing configuration file {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Rejected command options
    #[error("Invalid options provided: {message}")]
    InvalidOption { message: String },

    /// Output file write errors
    #[error("Error writing to output file {}: {source}", .path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stdout write errors
    #[error("Error writing to stdout: {source}")]
    StdoutWrite {
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error
    #[error("JSON serialization error: {source}")]
    JsonSerialize {
        #[source]
        source: serde_json::Error,
    },

    /// Parallel execution error
    #[error("Parallel execution error: {message}")]
    ParallelExecution { message: String },

    /// Some files of a directory batch failed
    #[error("{failed} of {total} registries failed to generate")]
    BatchFailed { failed: usize, total: usize },
}

impl RegifyError {
    /// Get the severity level of this error
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            RegifyError::PermissionDenied { .. } => ErrorSeverity::Warning,
            RegifyError::InvalidPackageJson { .. } => ErrorSeverity::Warning,

            RegifyError::Config { .. } => ErrorSeverity::Critical,
            RegifyError::ConfigNotFound { .. } => ErrorSeverity::Critical,
            RegifyError::ConfigRead { .. } => ErrorSeverity::Critical,
            RegifyError::ConfigParse { .. } => ErrorSeverity::Critical,
            RegifyError::StdoutWrite { .. } => ErrorSeverity::Critical,
            RegifyError::ParallelExecution { .. } => ErrorSeverity::Critical,

            RegifyError::Generation { source, .. } => match source.severity() {
                ErrorSeverity::Critical => ErrorSeverity::Critical,
                _ => ErrorSeverity::Error,
            },

            _ => ErrorSeverity::Error,
        }
    }

    /// Check if this is a critical error that should terminate the process
    pub fn is_critical(&self) -> bool {
        self.severity() == ErrorSeverity::Critical
    }

    /// Innermost error, looking through `Generation` wrappers
    pub fn root_cause(&self) -> &RegifyError {
        match self {
            RegifyError::Generation { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            RegifyError::PermissionDenied { path } => {
                format!("Cannot access '{}' due to permission denied. Check file permissions.", path.display())
            }
            RegifyError::JsonParse { file, source } => {
                format!("Invalid JSON in '{}': {}. Please check the file format.", file.display(), source)
            }
            RegifyError::Io { source } => {
                format!("File system error: {}. Check disk space and permissions.", source)
            }
            RegifyError::ConfigNotFound { path } => {
                format!("Configuration file not found at '{}'. Run `regify init` or pass --config.", path.display())
            }
            RegifyError::ConfigParse { path, source } => {
                format!("Invalid regify config '{}': {}", path.display(), source)
            }
            _ => self.to_string(),
        }
    }

    /// Wrap a traversal failure with the entry path it started from
    pub fn generation(entry: impl Into<PathBuf>, source: RegifyError) -> Self {
        RegifyError::Generation {
            entry: entry.into(),
            source: Box::new(source),
        }
    }

    /// Create an IO error with context
    pub fn io_error(source: std::io::Error) -> Self {
        RegifyError::Io { source }
    }

    /// Create a JSON parse error with file context
    pub fn json_parse_error(file: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        RegifyError::JsonParse {
            file: file.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        RegifyError::Config {
            message: message.into(),
        }
    }

    /// Create an invalid option error
    pub fn invalid_option(message: impl Into<String>) -> Self {
        RegifyError::InvalidOption {
            message: message.into(),
        }
    }

    /// Create a permission denied error
    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        RegifyError::PermissionDenied { path: path.into() }
    }
}

impl From<std::io::Error> for RegifyError {
    fn from(err: std::io::Error) -> Self {
        RegifyError::io_error(err)
    }
}

impl From<serde_json::Error> for RegifyError {
    fn from(err: serde_json::Error) -> Self {
        RegifyError::JsonSerialize { source: err }
    }
}

/// Result type alias for regify operations
pub type Result<T> = std::result::Result<T, RegifyError>;
