//! File traversal with ignore-aware subtree pruning

use crate::core::error::{IgnoreError, Result};
use crate::ignore::checker::{IgnoreTree, TreeOptions};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use walkdir::WalkDir;

/// Lazy walk over the non-ignored, non-directory entries of an [`IgnoreTree`].
///
/// Ignored directories are pruned before they are read. Walk errors are
/// yielded as `Err` items and the walk carries on with the next entry;
/// dropping the iterator stops it.
pub struct RegularFiles<'a> {
    tree: &'a IgnoreTree,
    walker: walkdir::IntoIter,
}

impl<'a> RegularFiles<'a> {
    pub(crate) fn new(tree: &'a IgnoreTree, max_depth: Option<usize>) -> Self {
        let mut walker = WalkDir::new(tree.root())
            .follow_links(tree.follow_links())
            .sort_by_file_name();

        if let Some(depth) = max_depth {
            walker = walker.max_depth(depth);
        }

        Self {
            tree,
            walker: walker.into_iter(),
        }
    }
}

impl Iterator for RegularFiles<'_> {
    type Item = Result<PathBuf>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.walker.next()? {
                Ok(entry) => entry,
                Err(err) => return Some(Err(IgnoreError::Walk(err))),
            };

            if entry.depth() == 0 {
                continue;
            }

            let is_dir = entry.file_type().is_dir();
            if self.tree.ignore_entry(entry.path(), is_dir) {
                if is_dir {
                    tracing::trace!(dir = %entry.path().display(), "pruning ignored directory");
                    self.walker.skip_current_dir();
                }
                continue;
            }

            if !is_dir {
                return Some(Ok(entry.into_path()));
            }
        }
    }
}

/// Statistics from scanning operation
#[derive(Debug, Clone)]
pub struct ScanStats {
    /// Files that passed filtering
    pub total_files: usize,
    /// Walk errors encountered
    pub total_errors: usize,
    /// Rule files loaded before scanning
    pub rule_files: usize,
    /// Patterns compiled from those rule files
    pub patterns: usize,
    /// Files per second
    pub rate: f64,
}

/// Result of a full scan
#[derive(Debug)]
pub struct ScanResult {
    pub files: Vec<PathBuf>,
    pub errors: Vec<IgnoreError>,
    pub total_time: Duration,
    pub stats: ScanStats,
}

/// Builds an [`IgnoreTree`] once and collects everything it lets through
pub struct FilteredFileScanner {
    tree: IgnoreTree,
    max_depth: Option<usize>,
}

impl FilteredFileScanner {
    /// Create a scanner for `root` with default tree options
    pub fn new(root: &Path) -> Result<Self> {
        Self::with_options(root, &TreeOptions::default())
    }

    pub fn with_options(root: &Path, options: &TreeOptions) -> Result<Self> {
        Ok(Self {
            tree: IgnoreTree::build_with(root, options)?,
            max_depth: None,
        })
    }

    /// Set maximum depth for directory traversal
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    pub fn tree(&self) -> &IgnoreTree {
        &self.tree
    }

    /// Walk lazily with this scanner's depth limit
    pub fn files(&self) -> RegularFiles<'_> {
        RegularFiles::new(&self.tree, self.max_depth)
    }

    /// Walk the whole tree and collect files and errors
    pub fn scan(&self) -> ScanResult {
        let start_time = Instant::now();
        let mut files = Vec::new();
        let mut errors = Vec::new();

        for item in self.files() {
            match item {
                Ok(path) => files.push(path),
                Err(err) => {
                    tracing::warn!(%err, "error while scanning");
                    errors.push(err);
                },
            }
        }

        let total_time = start_time.elapsed();
        let (rule_files, patterns) = self.tree.stats();
        let stats = ScanStats {
            total_files: files.len(),
            total_errors: errors.len(),
            rule_files,
            patterns,
            rate: if total_time.as_secs_f64() > 0.0 {
                files.len() as f64 / total_time.as_secs_f64()
            } else {
                0.0
            },
        };

        ScanResult {
            files,
            errors,
            total_time,
            stats,
        }
    }
}
