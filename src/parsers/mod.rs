//! Parsing functionality for source and package files
//!
//! Source files go through OXC and come out as a `SourceSummary`; the rest of
//! the crate never touches the AST. `package.json` files are read with
//! serde_json.

pub mod import_collector;
pub mod package_json;
pub mod source;

pub use import_collector::{CollectedModule, ImportCollector};
pub use package_json::PackageJsonParser;
pub use source::{ImportKind, ImportedModule, SourceParser, SourceSummary};
