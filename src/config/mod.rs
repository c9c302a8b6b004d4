//! Global configuration management for digignore
//!
//! User defaults for rule file name, metadata directory and traversal are
//! stored in ~/.dig/ignore.toml

pub mod global_config;

// Re-export commonly used items
pub use global_config::{ConfigKey, ConfigValue, GlobalConfig};
