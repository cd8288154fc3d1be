//! Configuration-related data structures

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Name of the persisted configuration file
pub const CONFIG_FILE_NAME: &str = "regify.json";

/// Contents of `regify.json`
///
/// Every field is optional; an absent file is the same as `{}`. The same type
/// doubles as the partial layer merged by the config builder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegifyConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Local module base name -> remote registry URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry_dependencies: Option<BTreeMap<String, String>>,

    /// Where generated manifests are written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,

    /// Prefix for file-record paths
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,
}

impl RegifyConfig {
    /// Configuration written by `regify init`
    pub fn scaffold() -> Self {
        Self {
            name: Some("regify".to_string()),
            version: Some(env!("CARGO_PKG_VERSION").to_string()),
            registry_dependencies: Some(BTreeMap::new()),
            output_dir: Some(PathBuf::from("./registry")),
            base_path: Some("src/components".to_string()),
        }
    }

    /// Overlay values from a higher-precedence layer
    ///
    /// Scalars are replaced; registry dependency maps are merged key by key.
    pub fn merge_from(&mut self, other: RegifyConfig) {
        if other.name.is_some() {
            self.name = other.name;
        }
        if other.version.is_some() {
            self.version = other.version;
        }
        if other.output_dir.is_some() {
            self.output_dir = other.output_dir;
        }
        if other.base_path.is_some() {
            self.base_path = other.base_path;
        }
        if let Some(deps) = other.registry_dependencies {
            self.registry_dependencies
                .get_or_insert_with(BTreeMap::new)
                .extend(deps);
        }
    }

    /// Look up the registry URL configured for a local module base name
    pub fn registry_url(&self, base_name: &str) -> Option<&str> {
        self.registry_dependencies
            .as_ref()
            .and_then(|deps| deps.get(base_name))
            .map(String::as_str)
    }

    /// Base path with an empty string treated as unset
    pub fn base_path(&self) -> Option<&str> {
        self.base_path.as_deref().filter(|p| !p.is_empty())
    }
}
