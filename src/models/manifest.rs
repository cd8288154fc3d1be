//! Registry manifest structures
//!
//! `Manifest` is the wire format consumed by the shadcn component installer, so
//! field names and the `registry:*` tags are fixed.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Content-type tag attached to every file and to the manifest as a whole
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegistryType {
    #[serde(rename = "registry:ui")]
    Ui,
    #[serde(rename = "registry:hook")]
    Hook,
    #[serde(rename = "registry:lib")]
    Lib,
    #[serde(rename = "registry:style")]
    Style,
}

impl RegistryType {
    /// Wire name of the tag
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistryType::Ui => "registry:ui",
            RegistryType::Hook => "registry:hook",
            RegistryType::Lib => "registry:lib",
            RegistryType::Style => "registry:style",
        }
    }
}

impl fmt::Display for RegistryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file inlined into the manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryFile {
    pub path: String,
    pub content: String,
    #[serde(rename = "type")]
    pub file_type: RegistryType,
}

/// The generated registry artifact for one entry component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub name: String,
    #[serde(rename = "type")]
    pub registry_type: Option<RegistryType>,
    pub dependencies: Vec<String>,
    pub dev_dependencies: Vec<String>,
    pub registry_dependencies: Vec<String>,
    pub files: Vec<RegistryFile>,
}

/// Insertion-ordered collection without duplicates
#[derive(Debug, Clone, Default)]
pub struct UniqueList {
    items: Vec<String>,
    seen: HashSet<String>,
}

impl UniqueList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, returning false if it was already present
    pub fn insert(&mut self, value: impl Into<String>) -> bool {
        let value = value.into();
        if self.seen.contains(&value) {
            return false;
        }
        self.seen.insert(value.clone());
        self.items.push(value);
        true
    }

    pub fn contains(&self, value: &str) -> bool {
        self.seen.contains(value)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.items
    }
}

/// Mutable accumulator used while a walk is in progress
#[derive(Debug, Clone)]
pub struct RegistryBuilder {
    name: String,
    registry_type: Option<RegistryType>,
    dependencies: UniqueList,
    dev_dependencies: UniqueList,
    registry_dependencies: UniqueList,
    files: Vec<RegistryFile>,
}

impl RegistryBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            registry_type: None,
            dependencies: UniqueList::new(),
            dev_dependencies: UniqueList::new(),
            registry_dependencies: UniqueList::new(),
            files: Vec::new(),
        }
    }

    /// Set the manifest type unless it is already set
    pub fn set_type_once(&mut self, registry_type: RegistryType) {
        if self.registry_type.is_none() {
            self.registry_type = Some(registry_type);
        }
    }

    pub fn registry_type(&self) -> Option<RegistryType> {
        self.registry_type
    }

    pub fn add_file(&mut self, file: RegistryFile) {
        self.files.push(file);
    }

    pub fn add_dependency(&mut self, name: impl Into<String>) {
        self.dependencies.insert(name);
    }

    pub fn add_registry_dependency(&mut self, url: impl Into<String>) {
        self.registry_dependencies.insert(url);
    }

    pub fn build(self) -> Manifest {
        Manifest {
            name: self.name,
            registry_type: self.registry_type,
            dependencies: self.dependencies.into_vec(),
            dev_dependencies: self.dev_dependencies.into_vec(),
            registry_dependencies: self.registry_dependencies.into_vec(),
            files: self.files,
        }
    }
}
