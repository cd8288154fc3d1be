//! Data models and structures for regify

pub mod config;
pub mod manifest;
pub mod package;
pub mod workspace;

pub use config::RegifyConfig;
pub use manifest::{Manifest, RegistryBuilder, RegistryFile, RegistryType, UniqueList};
pub use package::PackageManifest;
pub use workspace::WorkspaceInfo;
