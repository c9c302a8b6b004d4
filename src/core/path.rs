//! Path helpers shared by the matcher and the tree
//!
//! Every path crossing into rule evaluation is turned into a forward-slash
//! string relative to some directory. These helpers do that conversion.

use std::path::{Component, Path, PathBuf};

/// Replace the platform separator with `/`
pub fn normalize_separators(path: &str) -> String {
    if std::path::MAIN_SEPARATOR == '/' {
        path.to_string()
    } else {
        path.replace(std::path::MAIN_SEPARATOR, "/")
    }
}

/// Lexically normalise a path, folding `.` and `..` components. The current
/// directory comes back empty so it prefixes every relative path.
pub fn clean(path: &Path) -> PathBuf {
    let cleaned = path_clean::clean(path);
    if cleaned.as_os_str() == "." {
        PathBuf::new()
    } else {
        cleaned
    }
}

/// Join the components of a relative path with `/`
pub fn to_slash(path: &Path) -> String {
    let parts: Vec<_> = path
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            Component::ParentDir => Some("..".into()),
            _ => None,
        })
        .collect();
    parts.join("/")
}

/// Where `path` lives on disk when evaluated against `root`.
///
/// Relative inputs that do not start with `root` are taken to be relative to
/// it already and are joined onto it.
pub fn resolve_under(root: &Path, path: &Path) -> PathBuf {
    let root = clean(root);
    let path = clean(path);
    if path.is_relative() && !path.starts_with(&root) {
        clean(&root.join(path))
    } else {
        path
    }
}

/// Express `path` relative to `root` in slash form.
///
/// Returns `None` for anything outside `root`, including `..` escapes and
/// absolute paths elsewhere when `root` itself is relative. The root maps to
/// the empty string.
pub fn relative_slash_path(root: &Path, path: &Path) -> Option<String> {
    let mut root = clean(root);
    let path = resolve_under(&root, path);

    if root.is_relative() && path.is_absolute() {
        root = clean(&std::env::current_dir().ok()?.join(&root));
    }

    let rel = path.strip_prefix(&root).ok()?;
    if rel.components().any(|c| matches!(c, Component::ParentDir)) {
        return None;
    }
    Some(to_slash(rel))
}

/// True when `prefix` names `path` itself or one of its ancestor directories,
/// compared segment by segment on slash paths
pub fn has_dir_prefix(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}
