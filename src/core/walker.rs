//! Dependency graph walking
//!
//! Turns one entry file into a registry manifest. The walk is a depth-first,
//! pre-order traversal of local imports. Every call to [`generate_registry`]
//! owns its own traversal state and resolver; nothing is shared between walks.

use crate::core::classifier::classify;
use crate::core::workspace::{find_project_root, load_workspace_info};
use crate::error::{RegifyError, Result, ResultExt};
use crate::models::{Manifest, RegifyConfig, RegistryBuilder, RegistryFile, WorkspaceInfo};
use crate::parsers::{ImportedModule, SourceParser, SourceSummary};
use crate::utils::path_resolver::PathResolver;
use crate::utils::paths::{
    first_dot_segment, is_in_node_modules, join_forward, relative_path, to_forward_slashes,
};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Generate the registry manifest for one entry file
///
/// Fails with `EntryNotFound` if the entry does not exist. Any failure during
/// the walk is wrapped in `Generation` with the entry path; no partial
/// manifest is ever returned.
pub fn generate_registry(path: &Path, config: &RegifyConfig) -> Result<Manifest> {
    if !path.exists() {
        return Err(RegifyError::EntryNotFound {
            path: path.to_path_buf(),
        });
    }

    GraphWalker::new(path, config)
        .and_then(GraphWalker::walk)
        .map_err(|e| RegifyError::generation(path, e))
}

/// Mutable state of one traversal
#[derive(Debug, Default)]
struct TraversalState {
    /// Files whose record has been emitted
    visited: HashSet<PathBuf>,
    /// Ancestors of the file currently being processed, outermost first
    active: Vec<PathBuf>,
    /// Files whose whole subtree has completed
    processed: HashSet<PathBuf>,
}

impl TraversalState {
    fn is_active(&self, path: &Path) -> bool {
        self.active.iter().any(|p| p == path)
    }
}

/// Where an import ends up in the manifest
#[derive(Debug, PartialEq, Eq)]
enum ImportOutcome {
    /// Inline the file and walk its imports
    Inline(PathBuf),
    /// Replace the file with a configured registry URL
    Registry(String),
    /// Declare the specifier as an npm dependency
    External,
    /// Workspace package code; neither inlined nor declared
    Workspace,
}

/// Depth-first walker over the local import graph of one entry file
pub struct GraphWalker<'c> {
    config: &'c RegifyConfig,
    entry: PathBuf,
    root: PathBuf,
    workspace: WorkspaceInfo,
    resolver: PathResolver,
    parser: SourceParser,
    state: TraversalState,
    builder: RegistryBuilder,
}

impl<'c> GraphWalker<'c> {
    /// Prepare a walk: locate the project root and build the resolver
    pub fn new(entry: &Path, config: &'c RegifyConfig) -> Result<Self> {
        let entry_abs = fs::canonicalize(entry).with_file_context(entry)?;
        let entry_dir = entry_abs.parent().unwrap_or(&entry_abs).to_path_buf();

        let root = find_project_root(&entry_dir)?;
        let workspace = load_workspace_info(&root);
        let resolver = PathResolver::new(&entry_dir);

        let name = entry
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            config,
            entry: entry_abs,
            root,
            workspace,
            resolver,
            parser: SourceParser::new(),
            state: TraversalState::default(),
            builder: RegistryBuilder::new(name),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn workspace(&self) -> &WorkspaceInfo {
        &self.workspace
    }

    /// Run the traversal from the entry file and produce the manifest
    pub fn walk(mut self) -> Result<Manifest> {
        let entry = self.entry.clone();
        self.process(&entry)?;
        Ok(self.builder.build())
    }

    fn process(&mut self, path: &Path) -> Result<()> {
        if self.state.processed.contains(path) {
            return Ok(());
        }

        if self.state.is_active(path) {
            return Err(RegifyError::CircularDependency {
                chain: self.cycle_chain(path),
            });
        }

        if self.state.visited.contains(path) {
            return Ok(());
        }

        self.state.visited.insert(path.to_path_buf());
        self.state.active.push(path.to_path_buf());

        let summary = self.parser.parse_file(path)?;
        let file_type = classify(path, &self.root, Some(&summary))?;
        self.builder.set_type_once(file_type);

        let imports: Vec<ImportedModule> = summary.import_statements().cloned().collect();
        let SourceSummary { text, .. } = summary;
        self.builder.add_file(RegistryFile {
            path: self.record_path(path),
            content: text,
            file_type,
        });

        for import in &imports {
            match self.resolve_import(&import.specifier, path)? {
                ImportOutcome::Inline(resolved) => self.process(&resolved)?,
                ImportOutcome::Registry(url) => self.builder.add_registry_dependency(url),
                ImportOutcome::External => self.builder.add_dependency(import.specifier.as_str()),
                ImportOutcome::Workspace => {}
            }
        }

        self.state.active.pop();
        self.state.processed.insert(path.to_path_buf());
        Ok(())
    }

    /// Decide what one import statement contributes to the manifest
    fn resolve_import(&self, specifier: &str, importer: &Path) -> Result<ImportOutcome> {
        let resolved = self.resolver.resolve(specifier, importer);

        let resolved = match resolved {
            Some(resolved) if !is_in_node_modules(&resolved) => resolved,
            Some(_) => return Ok(ImportOutcome::External),
            None if self.resolver.is_local_specifier(specifier) => {
                return Err(RegifyError::UnresolvedImport {
                    specifier: specifier.to_string(),
                    importer: relative_path(importer, &self.root),
                });
            }
            None => return Ok(ImportOutcome::External),
        };

        if resolved.starts_with(&self.root) {
            let file_name = resolved
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            return Ok(match self.config.registry_url(first_dot_segment(&file_name)) {
                Some(url) => ImportOutcome::Registry(url.to_string()),
                None => ImportOutcome::Inline(resolved),
            });
        }

        if self.workspace.is_monorepo && self.workspace.is_workspace_package(specifier) {
            return Ok(ImportOutcome::Workspace);
        }

        Ok(ImportOutcome::External)
    }

    /// Record path: `<basePath>/<file name>` or the root-relative path
    fn record_path(&self, path: &Path) -> String {
        match self.config.base_path() {
            Some(base_path) => {
                let file_name = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default();
                join_forward(base_path, &file_name)
            }
            None => to_forward_slashes(&relative_path(path, &self.root)),
        }
    }

    /// Render the active stack plus `path` relative to the root
    fn cycle_chain(&self, path: &Path) -> String {
        self.state
            .active
            .iter()
            .map(PathBuf::as_path)
            .chain(std::iter::once(path))
            .map(|p| to_forward_slashes(&relative_path(p, &self.root)))
            .collect::<Vec<_>>()
            .join(" -> ")
    }
}
