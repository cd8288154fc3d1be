//! Project root discovery and workspace metadata

use crate::error::{Result, ResultExt};
use crate::models::WorkspaceInfo;
use crate::parsers::PackageJsonParser;
use crate::utils::paths::find_ancestor_with;
use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const PACKAGE_JSON: &str = "package.json";

/// Files whose presence at the root marks a monorepo on their own
const WORKSPACE_MARKERS: &[&str] = &["pnpm-workspace.yaml", "lerna.json"];

/// Nearest ancestor of `start_dir` holding a package.json, else the cwd
///
/// The result is canonical so that it can be compared against canonical
/// resolved import paths.
pub fn find_project_root(start_dir: &Path) -> Result<PathBuf> {
    let root = match find_ancestor_with(start_dir, PACKAGE_JSON) {
        Some(dir) => dir,
        None => env::current_dir()?,
    };
    fs::canonicalize(&root).with_file_context(&root)
}

/// Read workspace metadata from `<root>/package.json`
///
/// A missing or malformed package.json yields the default (non-monorepo)
/// metadata.
pub fn load_workspace_info(root: &Path) -> WorkspaceInfo {
    let manifest = match PackageJsonParser::parse_file(&root.join(PACKAGE_JSON)) {
        Ok(manifest) => manifest,
        Err(_) => return WorkspaceInfo::default(),
    };

    let linked: BTreeSet<String> = manifest
        .workspace_linked_dependencies()
        .map(String::from)
        .collect();
    let workspaces = manifest.workspace_patterns();

    let has_marker_file = WORKSPACE_MARKERS
        .iter()
        .any(|marker| root.join(marker).is_file());
    let is_monorepo = !linked.is_empty() || manifest.workspaces.is_some() || has_marker_file;

    let dependencies = manifest
        .dependencies
        .keys()
        .chain(manifest.dev_dependencies.keys())
        .chain(manifest.peer_dependencies.keys())
        .filter(|name| !linked.contains(*name))
        .cloned()
        .collect();

    let mut workspace_packages = linked;
    workspace_packages.extend(workspace_package_names(root, &workspaces));

    WorkspaceInfo {
        is_monorepo,
        workspaces,
        dependencies,
        workspace_packages,
    }
}

/// Names of the packages matched by the `workspaces` globs
fn workspace_package_names(root: &Path, patterns: &[String]) -> BTreeSet<String> {
    patterns
        .iter()
        .filter(|pattern| !pattern.starts_with('!'))
        .filter_map(|pattern| {
            let manifest_glob = root.join(pattern).join(PACKAGE_JSON);
            glob::glob(&manifest_glob.to_string_lossy()).ok()
        })
        .flat_map(|paths| paths.filter_map(|entry| entry.ok()))
        .filter_map(|path| PackageJsonParser::parse_file(&path).ok()?.name)
        .collect()
}
