//! CLI context for storing global options during command execution

use crate::config::GlobalConfig;
use crate::ignore::checker::TreeOptions;
use std::cell::RefCell;
use std::path::PathBuf;

thread_local! {
    static CLI_CONTEXT: RefCell<Option<CliContext>> = const { RefCell::new(None) };
}

/// Context containing global CLI options
#[derive(Debug, Clone, Default)]
pub struct CliContext {
    pub verbose: bool,
    pub quiet: bool,
    pub config_path: Option<PathBuf>,
    pub rule_file: Option<String>,
    pub exclude: Vec<String>,
    pub follow_links: bool,
}

impl CliContext {
    /// Set the global CLI context for the current thread
    pub fn set(context: CliContext) {
        CLI_CONTEXT.with(|c| {
            *c.borrow_mut() = Some(context);
        });
    }

    /// Get the current CLI context
    pub fn get() -> Option<CliContext> {
        CLI_CONTEXT.with(|c| c.borrow().clone())
    }

    /// Check if verbose mode is enabled
    pub fn is_verbose() -> bool {
        Self::get().map(|ctx| ctx.verbose).unwrap_or(false)
    }

    /// Check if quiet mode is enabled
    pub fn is_quiet() -> bool {
        Self::get().map(|ctx| ctx.quiet).unwrap_or(false)
    }

    /// Load the configuration file named on the command line, or the default one
    pub fn load_config() -> crate::Result<GlobalConfig> {
        match Self::get().and_then(|ctx| ctx.config_path) {
            Some(path) => GlobalConfig::load_from(&path),
            None => GlobalConfig::load(),
        }
    }

    /// Configuration merged with command-line overrides
    pub fn effective_config() -> crate::Result<GlobalConfig> {
        let mut config = Self::load_config()?;
        if let Some(ctx) = Self::get() {
            if let Some(rule_file) = ctx.rule_file {
                config.core.rule_file = Some(rule_file);
            }
            config.core.exclude.extend(ctx.exclude);
            if ctx.follow_links {
                config.walk.follow_links = Some(true);
            }
        }
        Ok(config)
    }

    /// Tree options from configuration and command-line overrides
    pub fn tree_options() -> crate::Result<TreeOptions> {
        Ok(Self::effective_config()?.tree_options())
    }
}
