//! Error handling for regify
//!
//! This module provides the error taxonomy shared by the traversal core and the
//! CLI layer, including result aliases and error context utilities.

pub mod context;
pub mod types;

pub use context::{OptionExt, ResultExt};
pub use types::{ErrorSeverity, RegifyError, Result};
