//! Core types and utilities for digignore
//!
//! Error channels and the path normalization shared by every layer.

pub mod error;
pub mod path;

// Re-export commonly used items
pub use error::{IgnoreError, PatternError, Result};
