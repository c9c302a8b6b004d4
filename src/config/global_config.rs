//! Global configuration management
//!
//! Provides user-level defaults stored in ~/.dig/ignore.toml

use crate::core::error::{IgnoreError, Result};
use crate::ignore::checker::{TreeOptions, DEFAULT_METADATA_DIR, DEFAULT_RULE_FILE};
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Global configuration for digignore
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    /// Rule file configuration
    pub core: CoreConfig,
    /// Traversal configuration
    pub walk: WalkConfig,
}

/// Which files hold rules and what is always excluded
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Rule file name (default: .gitignore)
    pub rule_file: Option<String>,
    /// Metadata directory ignored at the root (default: .git)
    pub metadata_dir: Option<String>,
    /// Extra rules applied after the root rule file
    pub exclude: Vec<String>,
}

/// Traversal settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkConfig {
    pub follow_links: Option<bool>,
    pub max_depth: Option<usize>,
}

/// Configuration value types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    String(String),
    Number(i64),
    Boolean(bool),
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::String(s) => write!(f, "{}", s),
            ConfigValue::Number(n) => write!(f, "{}", n),
            ConfigValue::Boolean(b) => write!(f, "{}", b),
        }
    }
}

/// Configuration key for reading values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigKey {
    CoreRuleFile,
    CoreMetadataDir,
    WalkFollowLinks,
    WalkMaxDepth,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 4] = [
        ConfigKey::CoreRuleFile,
        ConfigKey::CoreMetadataDir,
        ConfigKey::WalkFollowLinks,
        ConfigKey::WalkMaxDepth,
    ];

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(key: &str) -> Option<Self> {
        match key {
            "core.rule_file" => Some(ConfigKey::CoreRuleFile),
            "core.metadata_dir" => Some(ConfigKey::CoreMetadataDir),
            "walk.follow_links" => Some(ConfigKey::WalkFollowLinks),
            "walk.max_depth" => Some(ConfigKey::WalkMaxDepth),
            _ => None,
        }
    }

    pub fn to_str(&self) -> &str {
        match self {
            ConfigKey::CoreRuleFile => "core.rule_file",
            ConfigKey::CoreMetadataDir => "core.metadata_dir",
            ConfigKey::WalkFollowLinks => "walk.follow_links",
            ConfigKey::WalkMaxDepth => "walk.max_depth",
        }
    }
}

impl GlobalConfig {
    /// Load global configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    /// Load configuration from `config_path`, falling back to defaults when
    /// the file does not exist
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(config_path)?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| IgnoreError::configuration(format!("Failed to parse config: {}", e)))
    }

    /// Render the configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| IgnoreError::configuration(format!("Failed to serialize config: {}", e)))
    }

    /// Get the path to the global configuration file
    pub fn get_config_path() -> Result<PathBuf> {
        let user_dirs = UserDirs::new().ok_or(IgnoreError::HomeDirectoryNotFound)?;
        Ok(user_dirs.home_dir().join(".dig").join("ignore.toml"))
    }

    /// Get a configuration value
    pub fn get(&self, key: ConfigKey) -> Option<ConfigValue> {
        match key {
            ConfigKey::CoreRuleFile => self.core.rule_file.clone().map(ConfigValue::String),
            ConfigKey::CoreMetadataDir => {
                self.core.metadata_dir.clone().map(ConfigValue::String)
            },
            ConfigKey::WalkFollowLinks => self.walk.follow_links.map(ConfigValue::Boolean),
            ConfigKey::WalkMaxDepth => self.walk.max_depth.map(|d| ConfigValue::Number(d as i64)),
        }
    }

    /// List all configured values
    pub fn list(&self) -> Vec<(String, String)> {
        ConfigKey::ALL
            .iter()
            .filter_map(|key| self.get(*key).map(|v| (key.to_str().to_string(), v.to_string())))
            .collect()
    }

    /// Tree options with defaults filled in
    pub fn tree_options(&self) -> TreeOptions {
        TreeOptions {
            rule_file: self
                .core
                .rule_file
                .clone()
                .unwrap_or_else(|| DEFAULT_RULE_FILE.to_string()),
            metadata_dir: self
                .core
                .metadata_dir
                .clone()
                .unwrap_or_else(|| DEFAULT_METADATA_DIR.to_string()),
            extra_root_rules: self.core.exclude.clone(),
            follow_links: self.walk.follow_links.unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config = GlobalConfig::load_from(&temp_dir.path().join("ignore.toml"))?;
        assert_eq!(config, GlobalConfig::default());

        let options = config.tree_options();
        assert_eq!(options.rule_file, ".gitignore");
        assert_eq!(options.metadata_dir, ".git");
        assert!(!options.follow_links);
        Ok(())
    }

    #[test]
    fn test_parse_partial_config() -> Result<()> {
        let config = GlobalConfig::parse(
            r#"
[core]
rule_file = ".digignore"
exclude = ["*.bak"]

[walk]
max_depth = 3
"#,
        )?;

        assert_eq!(config.core.rule_file.as_deref(), Some(".digignore"));
        assert_eq!(config.walk.max_depth, Some(3));
        assert_eq!(config.tree_options().extra_root_rules, vec!["*.bak".to_string()]);
        assert_eq!(
            config.list(),
            vec![
                ("core.rule_file".to_string(), ".digignore".to_string()),
                ("walk.max_depth".to_string(), "3".to_string()),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_parse_error_is_configuration_error() {
        let err = GlobalConfig::parse("[core\nrule_file = 1").unwrap_err();
        assert!(matches!(err, IgnoreError::ConfigurationError { .. }));
    }

    #[test]
    fn test_round_trip_through_toml() -> Result<()> {
        let mut config = GlobalConfig::default();
        config.walk.follow_links = Some(true);
        let parsed = GlobalConfig::parse(&config.to_toml()?)?;
        assert_eq!(parsed, config);
        Ok(())
    }

    #[test]
    fn test_config_keys() {
        for key in ConfigKey::ALL {
            assert_eq!(ConfigKey::from_str(key.to_str()), Some(key));
        }
        assert_eq!(ConfigKey::from_str("user.name"), None);
    }
}
