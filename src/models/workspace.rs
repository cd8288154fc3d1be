//! Workspace metadata for the project being scanned

use std::collections::BTreeSet;

/// What the project root's package.json says about workspaces
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkspaceInfo {
    pub is_monorepo: bool,
    /// Raw `workspaces` glob patterns
    pub workspaces: Vec<String>,
    /// Declared dependency names, excluding workspace-linked ones
    pub dependencies: BTreeSet<String>,
    /// Names of packages that belong to the workspace itself
    pub workspace_packages: BTreeSet<String>,
}

impl WorkspaceInfo {
    /// Whether an import specifier targets one of the workspace's own packages
    ///
    /// Matches the package name itself or any subpath below it.
    pub fn is_workspace_package(&self, specifier: &str) -> bool {
        self.workspace_packages.iter().any(|name| {
            specifier == name
                || specifier
                    .strip_prefix(name.as_str())
                    .is_some_and(|rest| rest.starts_with('/'))
        })
    }
}
