//! Error types for digignore
//!
//! Two channels are kept apart on purpose: [`IgnoreError`] means the ignore
//! setup as a whole cannot be trusted, [`PatternError`] means one rule line
//! was dropped while the rest of its file still applies.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors raised while building an ignore tree or walking it
#[derive(Error, Debug)]
pub enum IgnoreError {
    /// A discovered rule file could not be read
    #[error("Rule file unreadable: {path}: {source}")]
    RuleFileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The directory walker failed on an entry
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// The tree root does not exist or is not a directory
    #[error("Invalid root directory: {path}")]
    InvalidRoot { path: PathBuf },

    /// Configuration errors
    #[error("Configuration error: {reason}")]
    ConfigurationError { reason: String },

    #[error("Home directory not found")]
    HomeDirectoryNotFound,

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IgnoreError {
    /// Create a new rule file unreadable error
    pub fn rule_file_unreadable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::RuleFileUnreadable {
            path: path.into(),
            source,
        }
    }

    /// Create a new invalid root error
    pub fn invalid_root(path: impl Into<PathBuf>) -> Self {
        Self::InvalidRoot { path: path.into() }
    }

    /// Create a new configuration error
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::ConfigurationError {
            reason: reason.into(),
        }
    }
}

/// A single rule line that could not be turned into a matcher
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PatternError {
    #[error("unterminated character class starting at column {column}")]
    UnterminatedClass { column: usize },

    #[error("trailing backslash escapes nothing")]
    DanglingEscape,

    #[error("regex compilation failed: {reason}")]
    Regex { reason: String },
}

impl From<regex::Error> for PatternError {
    fn from(err: regex::Error) -> Self {
        Self::Regex {
            reason: err.to_string(),
        }
    }
}

/// Result type alias for digignore operations
pub type Result<T> = std::result::Result<T, IgnoreError>;
