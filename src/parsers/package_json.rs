//! Package.json parsing functionality
//!
//! Only the fields that module resolution and workspace detection need are
//! extracted. Malformed optional fields are skipped rather than rejected.

use crate::error::{RegifyError, Result, ResultExt};
use crate::models::package::PackageManifest;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;

/// Parser for package.json files
pub struct PackageJsonParser;

impl PackageJsonParser {
    /// Parse package.json content into a PackageManifest
    pub fn parse(content: &str) -> Result<PackageManifest> {
        let json_value: Value = serde_json::from_str(content)
            .map_err(|e| RegifyError::json_parse_error("package.json", e))?;

        let obj = match json_value {
            Value::Object(obj) => obj,
            _ => {
                return Err(RegifyError::InvalidPackageJson {
                    path: "package.json".into(),
                    message: "Root value is not an object".into(),
                });
            }
        };

        Ok(PackageManifest {
            name: Self::extract_optional_string(&obj, "name"),
            version: Self::extract_optional_string(&obj, "version"),
            main: Self::extract_optional_string(&obj, "main"),
            module: Self::extract_optional_string(&obj, "module"),
            types: Self::extract_optional_string(&obj, "types"),
            typings: Self::extract_optional_string(&obj, "typings"),
            exports: obj.get("exports").cloned(),
            workspaces: obj.get("workspaces").cloned(),
            dependencies: Self::extract_dependencies(&obj, "dependencies"),
            dev_dependencies: Self::extract_dependencies(&obj, "devDependencies"),
            peer_dependencies: Self::extract_dependencies(&obj, "peerDependencies"),
        })
    }

    /// Parse package.json file from a path
    pub fn parse_file(path: &Path) -> Result<PackageManifest> {
        let content = std::fs::read_to_string(path).with_file_context(path)?;

        Self::parse(&content).map_err(|e| match e {
            RegifyError::JsonParse { source, .. } => RegifyError::JsonParse {
                file: path.to_path_buf(),
                source,
            },
            RegifyError::InvalidPackageJson { message, .. } => RegifyError::InvalidPackageJson {
                path: path.to_path_buf(),
                message,
            },
            _ => e,
        })
    }

    /// Extract a name -> version-spec map, ignoring non-string versions
    fn extract_dependencies(obj: &Map<String, Value>, field: &str) -> BTreeMap<String, String> {
        match obj.get(field) {
            Some(Value::Object(map)) => map
                .iter()
                .filter_map(|(name, version)| {
                    version.as_str().map(|v| (name.clone(), v.to_string()))
                })
                .collect(),
            _ => BTreeMap::new(),
        }
    }

    /// Extract an optional string field from a JSON object
    fn extract_optional_string(obj: &Map<String, Value>, field: &str) -> Option<String> {
        match obj.get(field) {
            Some(Value::String(s)) => Some(s.clone()),
            _ => None,
        }
    }
}
