//! Hierarchical ignore rules with exact .gitignore semantics
//!
//! This module compiles rule lines into matchers ([`parser`]), groups them per
//! rule file ([`rule_set`]), combines the rule files of a directory tree
//! ([`checker`]) and walks the tree while pruning ignored directories
//! ([`scanner`]).

pub mod checker;
pub mod parser;
pub mod rule_set;
pub mod scanner;

// Re-export commonly used items
pub use checker::{IgnoreMatch, IgnoreTree, TreeOptions, DEFAULT_METADATA_DIR, DEFAULT_RULE_FILE};
pub use parser::{compile_line, IgnorePattern};
pub use rule_set::{Decision, RejectedLine, RuleSet};
pub use scanner::{FilteredFileScanner, RegularFiles, ScanResult, ScanStats};
