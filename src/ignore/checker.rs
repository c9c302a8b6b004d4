//! Repository-wide ignore checking with hierarchical rule files
//!
//! Each directory holding a rule file gets its own [`RuleSet`]. A path is
//! checked against every rule set whose directory contains it, each one seeing
//! the path relative to its own directory, and is ignored as soon as any of
//! them matches. A deeper `!` rule therefore cannot bring back something a
//! shallower rule file excluded.

use crate::core::error::{IgnoreError, Result};
use crate::core::path::{has_dir_prefix, normalize_separators, relative_slash_path};
use crate::ignore::parser::IgnorePattern;
use crate::ignore::rule_set::RuleSet;
use crate::ignore::scanner::RegularFiles;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Rule file name looked up in every directory
pub const DEFAULT_RULE_FILE: &str = ".gitignore";

/// Version-control metadata directory, always ignored at the root
pub const DEFAULT_METADATA_DIR: &str = ".git";

/// Key of the root directory's rule set
pub const ROOT_KEY: &str = ".";

/// Options for building an [`IgnoreTree`]
#[derive(Debug, Clone)]
pub struct TreeOptions {
    pub rule_file: String,
    pub metadata_dir: String,
    /// Rules appended after the root rule file
    pub extra_root_rules: Vec<String>,
    pub follow_links: bool,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            rule_file: DEFAULT_RULE_FILE.to_string(),
            metadata_dir: DEFAULT_METADATA_DIR.to_string(),
            extra_root_rules: Vec::new(),
            follow_links: false,
        }
    }
}

/// Why a path was ignored
#[derive(Debug, Clone, Copy)]
pub enum IgnoreMatch<'a> {
    /// The path lives under the metadata directory
    MetadataDir,
    /// A rule from the rule file in `dir` matched
    Rule {
        dir: &'a str,
        pattern: &'a IgnorePattern,
    },
}

/// Rule sets of a directory tree, keyed by directory relative to the root
#[derive(Debug, Clone)]
pub struct IgnoreTree {
    root: PathBuf,
    root_rules: Option<RuleSet>,
    nested: BTreeMap<String, RuleSet>,
    rule_file: String,
    metadata_dir: String,
    follow_links: bool,
}

impl IgnoreTree {
    /// Scan `root` for `.gitignore` files and compile them
    pub fn build(root: &Path) -> Result<Self> {
        Self::build_with(root, &TreeOptions::default())
    }

    /// Scan `root` for rule files named by `options` and compile them.
    ///
    /// Any unreadable rule file or walk error aborts construction.
    pub fn build_with(root: &Path, options: &TreeOptions) -> Result<Self> {
        if !root.is_dir() {
            return Err(IgnoreError::invalid_root(root));
        }

        let mut tree = Self::empty(root, options);
        let metadata_dir = options.metadata_dir.as_str();

        let walker = WalkDir::new(root)
            .follow_links(options.follow_links)
            .into_iter()
            .filter_entry(|e| !(e.depth() == 1 && e.file_name() == metadata_dir));

        for entry in walker {
            let entry = entry?;
            if entry.file_type().is_dir() || entry.file_name() != options.rule_file.as_str() {
                continue;
            }

            let dir = entry.path().parent().unwrap_or(root);
            let key = match relative_slash_path(root, dir) {
                Some(rel) if !rel.is_empty() => rel,
                _ => ROOT_KEY.to_string(),
            };

            tracing::debug!(rule_file = %entry.path().display(), dir = %key, "loading ignore rules");

            if key == ROOT_KEY {
                tree.root_rules = Some(RuleSet::compile_file_and_lines(
                    entry.path(),
                    &options.extra_root_rules,
                )?);
            } else {
                tree.nested
                    .insert(key, RuleSet::compile_file(entry.path())?);
            }
        }

        if tree.root_rules.is_none() && !options.extra_root_rules.is_empty() {
            tree.root_rules = Some(RuleSet::compile_lines(&options.extra_root_rules));
        }

        Ok(tree)
    }

    /// Assemble a tree from rule sets that do not come from disk.
    ///
    /// Keys are directories relative to `root`; `"."` or `""` is the root.
    pub fn from_rule_sets<I>(root: &Path, sets: I) -> Self
    where
        I: IntoIterator<Item = (String, RuleSet)>,
    {
        let mut tree = Self::empty(root, &TreeOptions::default());
        for (key, rules) in sets {
            let key = normalize_separators(&key);
            let key = key.trim_start_matches("./").trim_matches('/');
            if key.is_empty() || key == ROOT_KEY {
                tree.root_rules = Some(rules);
            } else {
                tree.nested.insert(key.to_string(), rules);
            }
        }
        tree
    }

    fn empty(root: &Path, options: &TreeOptions) -> Self {
        Self {
            root: root.to_path_buf(),
            root_rules: None,
            nested: BTreeMap::new(),
            rule_file: options.rule_file.clone(),
            metadata_dir: options.metadata_dir.clone(),
            follow_links: options.follow_links,
        }
    }

    /// Whether `path` is ignored, judged on its path string alone
    pub fn ignore(&self, path: impl AsRef<Path>) -> bool {
        self.explain(path.as_ref(), false).is_some()
    }

    /// Whether an entry is ignored. Directories are tested as `dir/` so that
    /// directory-only rules match the directory itself.
    pub fn ignore_entry(&self, path: impl AsRef<Path>, is_dir: bool) -> bool {
        self.explain(path.as_ref(), is_dir).is_some()
    }

    /// Report what ignores `path`, if anything
    pub fn explain(&self, path: &Path, is_dir: bool) -> Option<IgnoreMatch<'_>> {
        let rel = relative_slash_path(&self.root, path)?;
        if rel.is_empty() {
            return None;
        }

        if rel.split('/').next() == Some(self.metadata_dir.as_str()) {
            return Some(IgnoreMatch::MetadataDir);
        }

        let candidate = if is_dir { format!("{}/", rel) } else { rel.clone() };

        if let Some(rules) = &self.root_rules {
            if let Some(pattern) = rules.matches_path_how(&candidate).pattern {
                return Some(IgnoreMatch::Rule {
                    dir: ROOT_KEY,
                    pattern,
                });
            }
        }

        for (dir, rules) in &self.nested {
            if !has_dir_prefix(&rel, dir) {
                continue;
            }
            let local = candidate[dir.len()..].trim_start_matches('/');
            if local.is_empty() {
                continue;
            }
            if let Some(pattern) = rules.matches_path_how(local).pattern {
                return Some(IgnoreMatch::Rule {
                    dir: dir.as_str(),
                    pattern,
                });
            }
        }

        None
    }

    /// Lazily walk the tree, yielding non-ignored files
    pub fn regular_files(&self) -> RegularFiles<'_> {
        RegularFiles::new(self, None)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn rule_file(&self) -> &str {
        &self.rule_file
    }

    pub fn follow_links(&self) -> bool {
        self.follow_links
    }

    /// Rule directory keys, root first
    pub fn rule_dirs(&self) -> Vec<&str> {
        self.root_rules
            .iter()
            .map(|_| ROOT_KEY)
            .chain(self.nested.keys().map(String::as_str))
            .collect()
    }

    /// Rule set of one directory key
    pub fn rules_for(&self, dir: &str) -> Option<&RuleSet> {
        if dir == ROOT_KEY {
            self.root_rules.as_ref()
        } else {
            self.nested.get(dir)
        }
    }

    /// Location of the rule file behind a directory key
    pub fn rule_file_path(&self, dir: &str) -> PathBuf {
        if dir == ROOT_KEY {
            self.root.join(&self.rule_file)
        } else {
            self.root.join(dir).join(&self.rule_file)
        }
    }

    /// Number of rule files and total compiled patterns
    pub fn stats(&self) -> (usize, usize) {
        let sets = self.root_rules.iter().chain(self.nested.values());
        sets.fold((0, 0), |(files, patterns), rules| (files + 1, patterns + rules.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn layered_tree() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        write(root, ".gitignore", "*.txt\n!important.txt\n/root_ignored_dir/\n");
        write(root, "level1/.gitignore", "ignored_in_level1.go\n*.log\nlevel1_ignored_dir/\n");
        write(
            root,
            "level1/level2/level3/.gitignore",
            "*.binary\n**/*.generated.js\n",
        );
        write(root, "root_ignored_dir/.gitignore", "!file_in_ignored_dir.go\n");

        temp_dir
    }

    #[test]
    fn test_build_discovers_rule_files() -> Result<()> {
        let temp_dir = layered_tree();
        let tree = IgnoreTree::build(temp_dir.path())?;

        assert_eq!(
            tree.rule_dirs(),
            vec![".", "level1", "level1/level2/level3", "root_ignored_dir"]
        );
        assert_eq!(tree.stats(), (4, 9));
        Ok(())
    }

    #[test]
    fn test_hierarchical_ignore() -> Result<()> {
        let temp_dir = layered_tree();
        let root = temp_dir.path();
        let tree = IgnoreTree::build(root)?;

        assert!(tree.ignore(root.join("ignored.txt")));
        assert!(!tree.ignore(root.join("important.txt")));
        assert!(tree.ignore(root.join("level1/log_file.log")));
        assert!(tree.ignore(root.join("level1/level1_ignored_dir/file_inside.go")));
        assert!(tree.ignore(root.join("level1/level2/level3/file.binary")));
        assert!(tree.ignore(root.join("level1/level2/level3/deep/x.generated.js")));
        assert!(!tree.ignore(root.join("level1/normal_file.go")));

        // level1 rules do not reach the root
        assert!(!tree.ignore(root.join("app.log")));
        Ok(())
    }

    #[test]
    fn test_deeper_negation_cannot_reinclude() -> Result<()> {
        let temp_dir = layered_tree();
        let root = temp_dir.path();
        let tree = IgnoreTree::build(root)?;

        assert!(tree.ignore(root.join("root_ignored_dir/file_in_ignored_dir.go")));
        assert!(tree.ignore_entry(root.join("root_ignored_dir"), true));
        Ok(())
    }

    #[test]
    fn test_metadata_dir_always_ignored() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path();
        write(root, ".gitignore", "!.git/\n!config\n");
        let tree = IgnoreTree::build(root)?;

        assert!(tree.ignore(root.join(".git")));
        assert!(tree.ignore(root.join(".git/config")));
        assert!(!tree.ignore(root.join(".github/workflows/ci.yml")));
        assert!(matches!(
            tree.explain(&root.join(".git/HEAD"), false),
            Some(IgnoreMatch::MetadataDir)
        ));
        Ok(())
    }

    #[test]
    fn test_paths_outside_relative_root_are_not_ignored() {
        let tree = IgnoreTree::from_rule_sets(
            Path::new("."),
            vec![(".".to_string(), RuleSet::compile_lines(["*.txt"]))],
        );

        assert!(tree.ignore("notes.txt"));
        assert!(tree.ignore("./docs/notes.txt"));
        assert!(!tree.ignore("../outside.txt"));
        assert!(!tree.ignore("docs/../../outside.txt"));
        assert!(!tree.ignore("/etc/elsewhere.txt"));
    }

    #[test]
    fn test_dir_prefix_is_component_wise() {
        let tree = IgnoreTree::from_rule_sets(
            Path::new("/repo"),
            vec![("level1".to_string(), RuleSet::compile_lines(["*.go"]))],
        );

        assert!(tree.ignore("/repo/level1/a.go"));
        assert!(!tree.ignore("/repo/level10/a.go"));
        assert!(!tree.ignore("/repo/a.go"));
    }

    #[test]
    fn test_rule_set_sees_paths_relative_to_its_dir() {
        let tree = IgnoreTree::from_rule_sets(
            Path::new("/repo"),
            vec![("sub".to_string(), RuleSet::compile_lines(["/only_here.go"]))],
        );

        assert!(tree.ignore("/repo/sub/only_here.go"));
        assert!(!tree.ignore("/repo/sub/deeper/only_here.go"));
    }

    #[test]
    fn test_paths_outside_root_are_not_ignored() {
        let tree = IgnoreTree::from_rule_sets(
            Path::new("/repo"),
            vec![(".".to_string(), RuleSet::compile_lines(["*"]))],
        );

        assert!(tree.ignore("/repo/anything"));
        assert!(!tree.ignore("/elsewhere/anything"));
        assert!(!tree.ignore("/repo"));
    }

    #[test]
    fn test_explain_names_rule_dir_and_line() -> Result<()> {
        let temp_dir = layered_tree();
        let root = temp_dir.path();
        let tree = IgnoreTree::build(root)?;

        match tree.explain(&root.join("level1/debug.log"), false) {
            Some(IgnoreMatch::Rule { dir, pattern }) => {
                assert_eq!(dir, "level1");
                assert_eq!(pattern.line_no, 2);
                assert_eq!(pattern.line, "*.log");
            },
            other => panic!("unexpected match: {:?}", other),
        }
        assert_eq!(
            tree.rule_file_path("level1"),
            root.join("level1").join(".gitignore")
        );
        Ok(())
    }

    #[test]
    fn test_custom_rule_file_and_extra_rules() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path();
        write(root, ".digignore", "*.tmp\n");
        write(root, ".gitignore", "*.md\n");

        let options = TreeOptions {
            rule_file: ".digignore".to_string(),
            extra_root_rules: vec!["*.bak".to_string()],
            ..TreeOptions::default()
        };
        let tree = IgnoreTree::build_with(root, &options)?;

        assert!(tree.ignore(root.join("a.tmp")));
        assert!(tree.ignore(root.join("a.bak")));
        assert!(!tree.ignore(root.join("readme.md")));
        Ok(())
    }

    #[test]
    fn test_extra_rules_without_root_file() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let options = TreeOptions {
            extra_root_rules: vec!["target/".to_string()],
            ..TreeOptions::default()
        };
        let tree = IgnoreTree::build_with(temp_dir.path(), &options)?;

        assert_eq!(tree.rule_dirs(), vec!["."]);
        assert!(tree.ignore(temp_dir.path().join("target/debug/app")));
        Ok(())
    }

    #[test]
    fn test_invalid_root() {
        let temp_dir = TempDir::new().unwrap();
        let err = IgnoreTree::build(&temp_dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, IgnoreError::InvalidRoot { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_rule_file_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir(root.join("broken")).unwrap();
        std::os::unix::fs::symlink(root.join("nowhere"), root.join("broken/.gitignore")).unwrap();

        let err = IgnoreTree::build(root).unwrap_err();
        assert!(matches!(err, IgnoreError::RuleFileUnreadable { .. }));
    }
}
