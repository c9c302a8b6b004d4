//! digignore - hierarchical .gitignore evaluation
//!
//! digignore decides whether a path is excluded by the rule files found while
//! walking a directory tree, using the same matching rules as Git.
//!
//! # Core Features
//!
//! - **Exact glob semantics**: wildcards, anchoring, directory-only rules,
//!   `**` segments, negation and escaping
//! - **Hierarchical rule files**: every directory's rule file applies to the
//!   paths below it, relative to that directory
//! - **Pruning traversal**: ignored directories are skipped without being read
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use digignore::IgnoreTree;
//! use std::path::Path;
//!
//! let tree = IgnoreTree::build(Path::new("./my-project"))?;
//! assert!(!tree.ignore("./my-project/src/main.rs"));
//!
//! for file in tree.regular_files() {
//!     println!("{}", file?.display());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod ignore;

// Re-export commonly used types
pub use core::error::{IgnoreError, PatternError, Result};

pub use ignore::{
    checker::{IgnoreMatch, IgnoreTree, TreeOptions},
    parser::IgnorePattern,
    rule_set::{Decision, RuleSet},
    scanner::{FilteredFileScanner, RegularFiles},
};

/// Current version of digignore
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
