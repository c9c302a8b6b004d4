//! CLI command implementations

pub mod check;
pub mod completion;
pub mod config;
pub mod ls;
pub mod rules;

use std::path::Path;

/// Display `path` relative to `root` when it lives below it
pub fn display_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}
