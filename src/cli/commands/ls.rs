//! Ls command implementation

use crate::cli::commands::display_path;
use crate::cli::context::CliContext;
use crate::ignore::scanner::FilteredFileScanner;
use anyhow::{Context, Result};
use colored::Colorize;
use serde_json::json;
use std::path::PathBuf;

/// Execute the ls command
pub fn execute(root: PathBuf, max_depth: Option<usize>, json: bool) -> Result<()> {
    let config = CliContext::effective_config()?;
    let options = config.tree_options();

    let mut scanner = FilteredFileScanner::with_options(&root, &options)
        .with_context(|| format!("Failed to load ignore rules under {}", root.display()))?;
    if let Some(depth) = max_depth.or(config.walk.max_depth) {
        scanner = scanner.max_depth(depth);
    }

    if json {
        let result = scanner.scan();
        let files: Vec<String> = result
            .files
            .iter()
            .map(|p| display_path(&root, p))
            .collect();
        let errors: Vec<String> = result.errors.iter().map(|e| e.to_string()).collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "root": root.display().to_string(),
                "files": files,
                "errors": errors,
                "stats": {
                    "files": result.stats.total_files,
                    "errors": result.stats.total_errors,
                    "rule_files": result.stats.rule_files,
                    "patterns": result.stats.patterns,
                    "elapsed_ms": result.total_time.as_millis() as u64,
                },
            }))?
        );
        return Ok(());
    }

    let mut listed = 0usize;
    let mut failed = 0usize;
    for item in scanner.files() {
        match item {
            Ok(path) => {
                listed += 1;
                println!("{}", display_path(&root, &path));
            },
            Err(err) => {
                failed += 1;
                eprintln!("{} {}", "error:".red(), err);
            },
        }
    }

    if CliContext::is_verbose() && !CliContext::is_quiet() {
        let (rule_files, patterns) = scanner.tree().stats();
        eprintln!(
            "{} {} files, {} errors, {} rule files, {} patterns",
            "•".cyan(),
            listed,
            failed,
            rule_files,
            patterns
        );
    }

    Ok(())
}
