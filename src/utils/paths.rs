//! Path and text helpers shared by the resolver, the walker and the generator

use std::path::{Component, Path, PathBuf};

/// Name of the directory package managers install dependencies into
pub const NODE_MODULES: &str = "node_modules";

/// Search `start` and its ancestors for a directory containing `file_name`
///
/// Returns the directory, not the file.
pub fn find_ancestor_with(start: &Path, file_name: &str) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(file_name).is_file())
        .map(Path::to_path_buf)
}

/// Search `start` and its ancestors for the first of `file_names` that exists
///
/// Within one directory, names are tried in order.
pub fn find_upward(start: &Path, file_names: &[&str]) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        file_names
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
    })
}

/// Express `path` relative to `base`, walking up with `..` where needed
///
/// Both paths are expected to be absolute. If they share no prefix (different
/// drive on Windows) the path is returned unchanged.
pub fn relative_path(path: &Path, base: &Path) -> PathBuf {
    if let Ok(stripped) = path.strip_prefix(base) {
        return stripped.to_path_buf();
    }

    let path_components: Vec<Component> = path.components().collect();
    let base_components: Vec<Component> = base.components().collect();

    let common = path_components
        .iter()
        .zip(base_components.iter())
        .take_while(|(a, b)| a == b)
        .count();

    if common == 0 {
        return path.to_path_buf();
    }

    let mut relative = PathBuf::new();
    for _ in common..base_components.len() {
        relative.push("..");
    }
    for component in &path_components[common..] {
        relative.push(component.as_os_str());
    }
    relative
}

/// Render a path with `/` separators regardless of platform
pub fn to_forward_slashes(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            Component::CurDir => None,
            Component::RootDir | Component::Prefix(_) => Some(String::new()),
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Join a configured prefix and a file name with exactly one `/` between them
pub fn join_forward(prefix: &str, file_name: &str) -> String {
    let prefix = prefix.replace('\\', "/");
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        file_name.to_string()
    } else {
        format!("{}/{}", prefix, file_name)
    }
}

/// Whether any component of the path is `node_modules`
pub fn is_in_node_modules(path: &Path) -> bool {
    path.components()
        .any(|component| component.as_os_str() == NODE_MODULES)
}

/// File name up to its first dot: `button.stories.tsx` -> `button`
pub fn first_dot_segment(file_name: &str) -> &str {
    file_name.split('.').next().unwrap_or(file_name)
}

/// Strip `//` and `/* */` comments plus trailing commas from JSON-with-comments
///
/// String literals are left untouched, including any comment markers inside
/// them.
pub fn strip_jsonc(text: &str) -> String {
    let without_comments = strip_comments(text);
    strip_trailing_commas(&without_comments)
}

fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        let next = chars.peek().copied();
        match (c, next) {
            ('"', _) => {
                in_string = true;
                out.push(c);
            }
            ('/', Some('/')) => {
                for next in chars.by_ref() {
                    if next == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                for next in chars.by_ref() {
                    if prev == '*' && next == '/' {
                        break;
                    }
                    prev = next;
                }
            }
            _ => out.push(c),
        }
    }

    out
}

fn strip_trailing_commas(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if in_string {
            out.push(c);
            if c == '\\' {
                if let Some(&escaped) = chars.get(i + 1) {
                    out.push(escaped);
                    i += 1;
                }
            } else if c == '"' {
                in_string = false;
            }
        } else if c == '"' {
            in_string = true;
            out.push(c);
        } else if c == ',' {
            let next = chars[i + 1..].iter().find(|ch| !ch.is_whitespace());
            if !matches!(next, Some('}') | Some(']')) {
                out.push(c);
            }
        } else {
            out.push(c);
        }
        i += 1;
    }

    out
}
