//! Regify - turn components into shareable registry manifests
//!
//! Starting from a component file, regify follows its static imports, inlines
//! every reachable local file and records npm packages and remote registry
//! components as dependencies. The result is a manifest the shadcn CLI can
//! install.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod output;
pub mod parsers;
pub mod utils;

// Re-export commonly used types
pub use crate::core::{classify, generate_registry, GenerateOptions, GenerationReport, Generator};
pub use error::{ErrorSeverity, OptionExt, RegifyError, Result, ResultExt};
pub use models::{Manifest, RegifyConfig, RegistryFile, RegistryType};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
