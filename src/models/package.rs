//! Package-related data structures

use serde_json::Value;
use std::collections::BTreeMap;

/// The subset of a package.json that resolution and workspace detection read
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackageManifest {
    pub name: Option<String>,
    pub version: Option<String>,
    pub main: Option<String>,
    pub module: Option<String>,
    pub types: Option<String>,
    pub typings: Option<String>,
    pub exports: Option<Value>,
    pub workspaces: Option<Value>,
    pub dependencies: BTreeMap<String, String>,
    pub dev_dependencies: BTreeMap<String, String>,
    pub peer_dependencies: BTreeMap<String, String>,
}

impl PackageManifest {
    /// Glob patterns declared under `workspaces` (array or `{ packages }` form)
    pub fn workspace_patterns(&self) -> Vec<String> {
        let patterns = match &self.workspaces {
            Some(Value::Array(items)) => Some(items),
            Some(Value::Object(map)) => map.get("packages").and_then(Value::as_array),
            _ => None,
        };

        patterns
            .map(|items| {
                items
                    .iter()
                    .filter_map(|v| v.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Production dependencies linked through the `workspace:` protocol
    pub fn workspace_linked_dependencies(&self) -> impl Iterator<Item = &str> {
        self.dependencies
            .iter()
            .filter(|(_, spec)| spec.contains("workspace"))
            .map(|(name, _)| name.as_str())
    }

    /// Entry candidates in the order a TypeScript-aware resolver tries them
    pub fn entry_fields(&self) -> impl Iterator<Item = &str> {
        [&self.types, &self.typings, &self.module, &self.main]
            .into_iter()
            .filter_map(|field| field.as_deref())
    }
}
