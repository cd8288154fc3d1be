//! Content-type classification for registry files
//!
//! Checks run in a fixed order and the first hit wins:
//!
//! 1. stylesheet extension
//! 2. `use*` file name on a code file
//! 3. directory segment of the root-relative path
//! 4. parsed content (exported `use*` function, then JSX heuristic)
//! 5. fallback to `registry:lib`

use crate::error::{OptionExt, RegifyError, Result};
use crate::models::RegistryType;
use crate::parsers::SourceSummary;
use crate::utils::paths::relative_path;
use regex::Regex;
use std::path::{Component, Path};
use std::sync::LazyLock;

pub const STYLE_EXTENSIONS: &[&str] = &["css", "scss", "sass", "less"];
pub const CODE_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx"];

const HOOK_PREFIX: &str = "use";

/// Directory names that decide the type, in priority order
const PATH_PATTERNS: &[(RegistryType, &[&str])] = &[
    (RegistryType::Ui, &["ui"]),
    (RegistryType::Hook, &["hooks"]),
    (RegistryType::Lib, &["lib", "utils"]),
    (RegistryType::Style, &["styles", "css"]),
];

/// Something that looks like an opening JSX tag
static JSX_ELEMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[A-Z]|<[a-z]+\s").expect("Invalid regex pattern"));

/// Classify one file
///
/// `summary` is `None` when the file has not been loaded; content checks are
/// then skipped. Only a file name that cannot be read as text is an error.
pub fn classify(path: &Path, root: &Path, summary: Option<&SourceSummary>) -> Result<RegistryType> {
    let file_name = path
        .file_name()
        .ok_or_error(|| classification_error(path, "path has no file name"))?
        .to_str()
        .ok_or_error(|| classification_error(path, "file name is not valid UTF-8"))?;

    let extension = path
        .extension()
        .map(|ext| {
            ext.to_str()
                .ok_or_error(|| classification_error(path, "extension is not valid UTF-8"))
        })
        .transpose()?
        .unwrap_or("");

    if STYLE_EXTENSIONS.contains(&extension) {
        return Ok(RegistryType::Style);
    }

    let is_code = CODE_EXTENSIONS.contains(&extension);

    if is_code && file_name.starts_with(HOOK_PREFIX) {
        return Ok(RegistryType::Hook);
    }

    if let Some(by_path) = classify_by_path(&relative_path(path, root)) {
        return Ok(by_path);
    }

    if let Some(summary) = summary.filter(|s| is_code && s.parsed) {
        if is_hook_by_content(summary) {
            return Ok(RegistryType::Hook);
        }
        if is_ui_component(summary, extension) {
            return Ok(RegistryType::Ui);
        }
    }

    Ok(RegistryType::Lib)
}

/// Match the directory part of a root-relative path against the known folders
fn classify_by_path(relative: &Path) -> Option<RegistryType> {
    let dirs: Vec<&str> = relative
        .parent()
        .map(|parent| {
            parent
                .components()
                .filter_map(|component| match component {
                    Component::Normal(part) => part.to_str(),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default();

    PATH_PATTERNS
        .iter()
        .find(|(_, names)| dirs.iter().any(|dir| names.contains(dir)))
        .map(|(registry_type, _)| *registry_type)
}

fn is_hook_by_content(summary: &SourceSummary) -> bool {
    summary
        .exported_functions
        .iter()
        .any(|name| name.starts_with(HOOK_PREFIX))
}

fn is_ui_component(summary: &SourceSummary, extension: &str) -> bool {
    if !matches!(extension, "tsx" | "jsx") {
        return false;
    }

    let text = &summary.text;
    let has_jsx_return = text.contains("return (") || text.contains("return<");
    let has_jsx_element = JSX_ELEMENT.is_match(text);

    has_jsx_return && has_jsx_element
}

fn classification_error(path: &Path, message: &str) -> RegifyError {
    RegifyError::Classification {
        path: path.to_path_buf(),
        message: message.to_string(),
    }
}
