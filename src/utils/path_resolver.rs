//! Module path resolution utilities
//!
//! A `PathResolver` is built for one walk and dropped with it. Lookups are
//! cached for the lifetime of that walk only.

use crate::models::package::PackageManifest;
use crate::parsers::package_json::PackageJsonParser;
use crate::utils::paths::{find_upward, strip_jsonc};
use dashmap::DashMap;
use lru::LruCache;
use parking_lot::Mutex;
use serde_json::Value;
use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

/// Extensions appended to an extensionless specifier, in probe order
pub const RESOLVE_EXTENSIONS: &[&str] = &["ts", "tsx", "d.ts", "js", "jsx", "mjs", "cjs", "json"];

/// Conditions tried inside a package `exports` object
const EXPORT_CONDITIONS: &[&str] = &["types", "import", "default", "require", "node"];

/// Project config files that carry `compilerOptions`, nearest first
const TSCONFIG_FILES: &[&str] = &["tsconfig.json", "jsconfig.json"];

const MAX_EXTENDS_DEPTH: usize = 8;

const PACKAGE_CACHE_SIZE: usize = 128;

/// One `compilerOptions.paths` entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMapping {
    /// Literal text before the `*` (the whole key when there is no `*`)
    pub prefix: String,
    /// Literal text after the `*`; `None` for keys without a wildcard
    pub suffix: Option<String>,
    pub targets: Vec<String>,
    /// Directory the targets are joined onto
    pub base: PathBuf,
}

impl PathMapping {
    /// Return the text captured by `*` when the specifier matches this key
    fn capture<'s>(&self, specifier: &'s str) -> Option<&'s str> {
        match &self.suffix {
            None => (specifier == self.prefix).then_some(""),
            Some(suffix) => {
                let rest = specifier.strip_prefix(self.prefix.as_str())?;
                if rest.len() < suffix.len() {
                    return None;
                }
                rest.strip_suffix(suffix.as_str())
            }
        }
    }

    fn target_paths<'m>(&'m self, captured: &'m str) -> impl Iterator<Item = PathBuf> + 'm {
        self.targets
            .iter()
            .map(move |target| self.base.join(target.replacen('*', captured, 1)))
    }
}

/// TypeScript/JavaScript project configuration for path resolution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TsConfig {
    pub base_url: Option<PathBuf>,
    /// Sorted by prefix length, longest first
    pub paths: Vec<PathMapping>,
}

/// Options collected while following an `extends` chain
#[derive(Default)]
struct RawCompilerOptions {
    base_url: Option<PathBuf>,
    paths: Option<(serde_json::Map<String, Value>, PathBuf)>,
}

impl TsConfig {
    /// Find the nearest tsconfig.json or jsconfig.json at or above `start_dir`
    pub fn discover(start_dir: &Path) -> Option<Self> {
        let config_path = find_upward(start_dir, TSCONFIG_FILES)?;
        Self::load(&config_path)
    }

    /// Load a config file, following relative `extends`
    ///
    /// Unreadable or malformed configs yield `None`; resolution then falls
    /// back to relative and `node_modules` lookups only.
    pub fn load(config_path: &Path) -> Option<Self> {
        let raw = Self::load_raw(config_path, 0)?;

        let mut paths: Vec<PathMapping> = raw
            .paths
            .map(|(map, declaring_dir)| {
                let base = raw.base_url.clone().unwrap_or(declaring_dir);
                map.iter()
                    .filter_map(|(key, value)| {
                        let targets: Vec<String> = value
                            .as_array()?
                            .iter()
                            .filter_map(|v| v.as_str().map(String::from))
                            .collect();
                        let (prefix, suffix) = match key.split_once('*') {
                            Some((prefix, suffix)) => (prefix.to_string(), Some(suffix.to_string())),
                            None => (key.clone(), None),
                        };
                        Some(PathMapping {
                            prefix,
                            suffix,
                            targets,
                            base: base.clone(),
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();

        paths.sort_by(|a, b| b.prefix.len().cmp(&a.prefix.len()));

        Some(Self {
            base_url: raw.base_url,
            paths,
        })
    }

    fn load_raw(config_path: &Path, depth: usize) -> Option<RawCompilerOptions> {
        let content = fs::read_to_string(config_path).ok()?;
        let json: Value = serde_json::from_str(&strip_jsonc(&content)).ok()?;
        let config_dir = config_path.parent()?.to_path_buf();

        let mut options = match json.get("extends").and_then(Value::as_str) {
            Some(parent) if parent.starts_with('.') && depth < MAX_EXTENDS_DEPTH => {
                let mut parent_path = config_dir.join(parent);
                if !parent_path.is_file() {
                    let mut with_json = parent_path.into_os_string();
                    with_json.push(".json");
                    parent_path = PathBuf::from(with_json);
                }
                Self::load_raw(&parent_path, depth + 1).unwrap_or_default()
            }
            _ => RawCompilerOptions::default(),
        };

        if let Some(compiler_options) = json.get("compilerOptions") {
            if let Some(base_url) = compiler_options.get("baseUrl").and_then(Value::as_str) {
                options.base_url = Some(config_dir.join(base_url));
            }
            if let Some(paths) = compiler_options.get("paths").and_then(Value::as_object) {
                options.paths = Some((paths.clone(), config_dir.clone()));
            }
        }

        Some(options)
    }
}

/// Static module resolver with per-walk caching and TypeScript support
pub struct PathResolver {
    tsconfig: Option<TsConfig>,
    file_exists_cache: DashMap<PathBuf, bool>,
    package_json_cache: Mutex<LruCache<PathBuf, Option<PackageManifest>>>,
}

impl PathResolver {
    /// Create a resolver using the tsconfig/jsconfig nearest to `start_dir`
    pub fn new(start_dir: &Path) -> Self {
        Self::with_tsconfig(TsConfig::discover(start_dir))
    }

    pub fn with_tsconfig(tsconfig: Option<TsConfig>) -> Self {
        let capacity = NonZeroUsize::new(PACKAGE_CACHE_SIZE).unwrap_or(NonZeroUsize::MIN);
        Self {
            tsconfig,
            file_exists_cache: DashMap::new(),
            package_json_cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn tsconfig(&self) -> Option<&TsConfig> {
        self.tsconfig.as_ref()
    }

    /// Whether the specifier uses a project alias (`@/...` or a `paths` key)
    pub fn is_alias_specifier(&self, specifier: &str) -> bool {
        if specifier.starts_with("@/") {
            return true;
        }
        self.tsconfig.as_ref().is_some_and(|tsconfig| {
            tsconfig.paths.iter().any(|mapping| match &mapping.suffix {
                Some(_) => !mapping.prefix.is_empty() && specifier.starts_with(&mapping.prefix),
                None => specifier == mapping.prefix,
            })
        })
    }

    /// Whether an unresolved specifier points at project code rather than a package
    pub fn is_local_specifier(&self, specifier: &str) -> bool {
        specifier.starts_with('.') || self.is_alias_specifier(specifier)
    }

    /// Resolve a module specifier imported by `importer` to a canonical path
    pub fn resolve(&self, specifier: &str, importer: &Path) -> Option<PathBuf> {
        let from_dir = importer.parent().unwrap_or(importer);

        let resolved = self
            .resolve_typescript_paths(specifier)
            .or_else(|| {
                if specifier.starts_with('.') || Path::new(specifier).is_absolute() {
                    self.probe(&from_dir.join(specifier))
                } else {
                    self.resolve_package(specifier, from_dir)
                        .or_else(|| self.resolve_base_url(specifier))
                }
            })?;

        Some(fs::canonicalize(&resolved).unwrap_or(resolved))
    }

    /// Resolve through `compilerOptions.paths`, longest prefix first
    fn resolve_typescript_paths(&self, specifier: &str) -> Option<PathBuf> {
        let tsconfig = self.tsconfig.as_ref()?;
        tsconfig.paths.iter().find_map(|mapping| {
            let captured = mapping.capture(specifier)?;
            mapping
                .target_paths(captured)
                .find_map(|candidate| self.probe(&candidate))
        })
    }

    fn resolve_base_url(&self, specifier: &str) -> Option<PathBuf> {
        let base_url = self.tsconfig.as_ref()?.base_url.as_ref()?;
        self.probe(&base_url.join(specifier))
    }

    /// Resolve a bare specifier by searching `node_modules` upward
    fn resolve_package(&self, specifier: &str, from_dir: &Path) -> Option<PathBuf> {
        let (package_name, subpath) = split_package_specifier(specifier);

        let package_dir = from_dir
            .ancestors()
            .map(|dir| dir.join("node_modules").join(&package_name))
            .find(|candidate| candidate.is_dir())?;

        self.resolve_package_subpath(&package_dir, subpath.as_deref())
    }

    fn resolve_package_subpath(&self, package_dir: &Path, subpath: Option<&str>) -> Option<PathBuf> {
        let details = self.load_package_json(&package_dir.join("package.json"));

        if let Some(exports) = details.as_ref().and_then(|d| d.exports.as_ref()) {
            if let Some(resolved) = self.resolve_exports_field(exports, subpath, package_dir) {
                return Some(resolved);
            }
        }

        if let Some(subpath) = subpath {
            return self.probe(&package_dir.join(subpath));
        }

        details
            .as_ref()
            .and_then(|details| {
                details
                    .entry_fields()
                    .find_map(|field| self.probe(&package_dir.join(field)))
            })
            .or_else(|| self.probe(&package_dir.join("index")))
    }

    fn load_package_json(&self, path: &Path) -> Option<PackageManifest> {
        let mut cache = self.package_json_cache.lock();
        if let Some(cached) = cache.get(path) {
            return cached.clone();
        }

        let details = if self.check_file_exists(path) {
            PackageJsonParser::parse_file(path).ok()
        } else {
            None
        };
        cache.put(path.to_path_buf(), details.clone());
        details
    }

    /// Resolve the `exports` field for `.` or `./<subpath>`
    fn resolve_exports_field(
        &self,
        exports: &Value,
        subpath: Option<&str>,
        package_dir: &Path,
    ) -> Option<PathBuf> {
        match exports {
            Value::String(_) | Value::Array(_) if subpath.is_none() => {
                self.resolve_export_target(exports, package_dir, "")
            }
            Value::Object(map) => {
                let is_subpath_map = map.keys().any(|key| key.starts_with('.'));
                if !is_subpath_map {
                    // Conditions object for the main entry
                    return match subpath {
                        None => self.resolve_export_target(exports, package_dir, ""),
                        Some(_) => None,
                    };
                }

                let export_key = subpath
                    .map(|s| format!("./{}", s))
                    .unwrap_or_else(|| ".".to_string());

                if let Some(value) = map.get(&export_key) {
                    return self.resolve_export_target(value, package_dir, "");
                }

                map.iter().find_map(|(key, value)| {
                    let (prefix, suffix) = key.split_once('*')?;
                    let captured = export_key.strip_prefix(prefix)?.strip_suffix(suffix)?;
                    self.resolve_export_target(value, package_dir, captured)
                })
            }
            _ => None,
        }
    }

    fn resolve_export_target(&self, value: &Value, package_dir: &Path, captured: &str) -> Option<PathBuf> {
        match value {
            Value::String(target) => {
                let candidate = package_dir.join(target.replacen('*', captured, 1));
                self.check_file_exists(&candidate).then_some(candidate)
            }
            Value::Object(conditions) => EXPORT_CONDITIONS.iter().find_map(|condition| {
                conditions
                    .get(*condition)
                    .and_then(|nested| self.resolve_export_target(nested, package_dir, captured))
            }),
            Value::Array(alternatives) => alternatives
                .iter()
                .find_map(|alternative| self.resolve_export_target(alternative, package_dir, captured)),
            _ => None,
        }
    }

    /// Probe a candidate path the way a TypeScript-aware bundler does
    ///
    /// Exact file, then appended extensions, then `.js` -> `.ts` swap, then a
    /// directory index.
    fn probe(&self, candidate: &Path) -> Option<PathBuf> {
        if self.check_file_exists(candidate) {
            return Some(candidate.to_path_buf());
        }

        let candidate_str = candidate.to_string_lossy();
        for ext in RESOLVE_EXTENSIONS {
            let with_ext = PathBuf::from(format!("{}.{}", candidate_str, ext));
            if self.check_file_exists(&with_ext) {
                return Some(with_ext);
            }
        }

        let swapped: &[&str] = match candidate.extension().and_then(|e| e.to_str()) {
            Some("js") => &["ts", "tsx"],
            Some("jsx") => &["tsx"],
            Some("mjs") => &["mts"],
            Some("cjs") => &["cts"],
            _ => &[],
        };
        for ext in swapped {
            let with_ext = candidate.with_extension(ext);
            if self.check_file_exists(&with_ext) {
                return Some(with_ext);
            }
        }

        if candidate.is_dir() {
            for ext in RESOLVE_EXTENSIONS {
                let index_path = candidate.join(format!("index.{}", ext));
                if self.check_file_exists(&index_path) {
                    return Some(index_path);
                }
            }
        }

        None
    }

    /// Check if a regular file exists, with caching
    fn check_file_exists(&self, path: &Path) -> bool {
        if let Some(cached) = self.file_exists_cache.get(path) {
            return *cached;
        }

        let exists = path.is_file();
        self.file_exists_cache.insert(path.to_path_buf(), exists);
        exists
    }
}

/// Split a bare specifier into package name and subpath
fn split_package_specifier(specifier: &str) -> (String, Option<String>) {
    let segments = if specifier.starts_with('@') { 2 } else { 1 };
    let mut parts = specifier.splitn(segments + 1, '/');

    let name: Vec<&str> = parts.by_ref().take(segments).collect();
    let subpath = parts.next().filter(|s| !s.is_empty()).map(String::from);
    (name.join("/"), subpath)
}
