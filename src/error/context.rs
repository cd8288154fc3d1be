//! Error context utilities for regify
//!
//! This module provides utilities for adding context to errors and handling
//! errors in a consistent way throughout the application.

use crate::error::{RegifyError, Result};
use std::path::Path;

/// Extension trait for Result to add context to errors
pub trait ResultExt<T, E> {
    /// Add context to an error with a custom message
    fn with_context<C, F>(self, context: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display;

    /// Add file context to an error
    fn with_file_context<P: AsRef<Path>>(self, path: P) -> Result<T>;
}

impl<T> ResultExt<T, std::io::Error> for std::result::Result<T, std::io::Error> {
    fn with_context<C, F>(self, context: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display,
    {
        self.map_err(|err| RegifyError::config_error(format!("{}: {}", context(), err)))
    }

    fn with_file_context<P: AsRef<Path>>(self, path: P) -> Result<T> {
        self.map_err(|err| {
            if err.kind() == std::io::ErrorKind::PermissionDenied {
                return RegifyError::permission_denied(path.as_ref());
            }

            RegifyError::IoRead {
                path: path.as_ref().to_path_buf(),
                source: err,
            }
        })
    }
}

impl<T> ResultExt<T, RegifyError> for Result<T> {
    fn with_context<C, F>(self, context: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display,
    {
        self.map_err(|err| match err {
            // Keep critical errors intact so the exit code stays meaningful
            err if err.is_critical() => err,
            err => RegifyError::config_error(format!("{}: {}", context(), err)),
        })
    }

    fn with_file_context<P: AsRef<Path>>(self, path: P) -> Result<T> {
        self.map_err(|err| match err {
            RegifyError::Io { source } => RegifyError::IoRead {
                path: path.as_ref().to_path_buf(),
                source,
            },
            other => other,
        })
    }
}

/// Extension trait for Option to convert to Result with a custom error
pub trait OptionExt<T> {
    /// Convert Option to Result with a custom error message
    fn ok_or_error<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> RegifyError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_error<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> RegifyError,
    {
        self.ok_or_else(err_fn)
    }
}
