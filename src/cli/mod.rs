//! Command-line interface for digignore

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

pub mod commands;
pub mod context;

/// digignore - hierarchical .gitignore evaluation
#[derive(Parser)]
#[command(
    name = "digignore",
    version,
    about = "Check paths against hierarchical .gitignore rules",
    long_about = "digignore discovers every rule file below a root directory, evaluates paths with Git's ignore semantics and lists the files that survive, pruning ignored directories without reading them."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output: auto, always, never
    #[arg(long, default_value = "auto", global = true)]
    pub color: String,

    /// Path to the configuration file
    #[arg(long, env = "DIGIGNORE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Rule file name to look for in every directory
    #[arg(long, global = true)]
    pub rule_file: Option<String>,

    /// Extra rule applied after the root rule file (repeatable)
    #[arg(short = 'x', long = "exclude", global = true)]
    pub exclude: Vec<String>,

    /// Follow symbolic links while walking
    #[arg(long, global = true)]
    pub follow_links: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Report which of the given paths are ignored
    Check {
        /// Paths to check
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Root directory holding the rule files
        #[arg(short, long, default_value = ".")]
        root: PathBuf,

        /// Show the rule file, line and pattern responsible
        #[arg(short, long)]
        explain: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List files that are not ignored
    Ls {
        /// Root directory to walk
        #[arg(default_value = ".")]
        root: PathBuf,

        /// Maximum depth to descend
        #[arg(long)]
        max_depth: Option<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the rule files found below a root
    Rules {
        /// Root directory to scan
        #[arg(default_value = ".")]
        root: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completion for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// List the values that are set, one `key = value` per line
    List,
    /// Print the configuration file location
    Path,
    /// Print one configuration value
    Get {
        /// Configuration key, e.g. core.rule_file
        key: String,
    },
}
