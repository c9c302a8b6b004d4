//! Rules command implementation

use crate::cli::commands::display_path;
use crate::cli::context::CliContext;
use crate::ignore::checker::IgnoreTree;
use anyhow::{Context, Result};
use colored::Colorize;
use serde_json::json;
use std::path::PathBuf;
use tabled::{Table, Tabled};

/// Rule file information for display
#[derive(Tabled, serde::Serialize)]
struct RuleFileInfo {
    #[tabled(rename = "Directory")]
    directory: String,
    #[tabled(rename = "Rule File")]
    rule_file: String,
    #[tabled(rename = "Patterns")]
    patterns: usize,
    #[tabled(rename = "Rejected")]
    rejected: usize,
}

/// Execute the rules command
pub fn execute(root: PathBuf, json: bool) -> Result<()> {
    let options = CliContext::tree_options()?;
    let tree = IgnoreTree::build_with(&root, &options)
        .with_context(|| format!("Failed to load ignore rules under {}", root.display()))?;

    let mut rows = Vec::new();
    let mut rejected = Vec::new();
    for dir in tree.rule_dirs() {
        let Some(rules) = tree.rules_for(dir) else {
            continue;
        };
        let rule_file = display_path(&root, &tree.rule_file_path(dir));
        for line in rules.rejected() {
            rejected.push(json!({
                "rule_file": rule_file,
                "line_no": line.line_no,
                "line": line.line,
                "error": line.error.to_string(),
            }));
        }
        rows.push(RuleFileInfo {
            directory: dir.to_string(),
            rule_file,
            patterns: rules.len(),
            rejected: rules.rejected().len(),
        });
    }

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "root": root.display().to_string(),
                "rule_files": rows,
                "rejected": rejected,
            }))?
        );
        return Ok(());
    }

    if rows.is_empty() {
        println!("{}", format!("No {} files found", tree.rule_file()).yellow());
        return Ok(());
    }

    println!("{}", Table::new(rows));

    if !rejected.is_empty() {
        println!();
        println!("{}", "Rejected lines:".yellow().bold());
        for entry in &rejected {
            println!(
                "  {}:{}: {} ({})",
                entry["rule_file"].as_str().unwrap_or_default(),
                entry["line_no"],
                entry["line"].as_str().unwrap_or_default(),
                entry["error"].as_str().unwrap_or_default().dimmed()
            );
        }
    }

    Ok(())
}
