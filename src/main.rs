//! digignore CLI
//!
//! Command-line interface for hierarchical .gitignore evaluation.

use anyhow::Result;
use clap::Parser;
use digignore::cli::context::CliContext;
use digignore::cli::{commands, Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.color.as_str() {
        "always" => colored::control::set_override(true),
        "never" => colored::control::set_override(false),
        _ => {},
    }

    CliContext::set(CliContext {
        verbose: cli.verbose,
        quiet: cli.quiet,
        config_path: cli.config,
        rule_file: cli.rule_file,
        exclude: cli.exclude,
        follow_links: cli.follow_links,
    });

    match cli.command {
        Commands::Check {
            paths,
            root,
            explain,
            json,
        } => {
            let any_ignored = commands::check::execute(paths, root, explain, json)?;
            if !any_ignored {
                std::process::exit(1);
            }
            Ok(())
        },
        Commands::Ls {
            root,
            max_depth,
            json,
        } => commands::ls::execute(root, max_depth, json),
        Commands::Rules { root, json } => commands::rules::execute(root, json),
        Commands::Config { action } => commands::config::execute(action),
        Commands::Completion { shell } => commands::completion::execute(shell),
    }
}
