//! Check command implementation

use crate::cli::context::CliContext;
use crate::core::path::resolve_under;
use crate::ignore::checker::{IgnoreMatch, IgnoreTree};
use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Verdict for one checked path
#[derive(Debug, Serialize)]
struct CheckReport {
    path: String,
    ignored: bool,
    /// Rule file responsible, absent for metadata-dir exclusions
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    line_no: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pattern: Option<String>,
}

/// Execute the check command. Returns whether any path was ignored.
pub fn execute(paths: Vec<PathBuf>, root: PathBuf, explain: bool, json: bool) -> Result<bool> {
    let options = CliContext::tree_options()?;
    let tree = IgnoreTree::build_with(&root, &options)
        .with_context(|| format!("Failed to load ignore rules under {}", root.display()))?;

    let reports: Vec<CheckReport> = paths.iter().map(|path| check_path(&tree, path)).collect();
    let any_ignored = reports.iter().any(|r| r.ignored);

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(any_ignored);
    }

    for report in reports.iter().filter(|r| r.ignored) {
        if explain {
            let source = report.source.as_deref().unwrap_or("");
            let line_no = report.line_no.map(|n| n.to_string()).unwrap_or_default();
            let pattern = report.pattern.as_deref().unwrap_or("");
            println!(
                "{}:{}:{}\t{}",
                source.cyan(),
                line_no,
                pattern.yellow(),
                report.path
            );
        } else {
            println!("{}", report.path);
        }
    }

    if !any_ignored && !CliContext::is_quiet() {
        eprintln!("{}", "No paths are ignored".dimmed());
    }

    Ok(any_ignored)
}

fn check_path(tree: &IgnoreTree, path: &Path) -> CheckReport {
    let is_dir = resolve_under(tree.root(), path).is_dir();
    let mut report = CheckReport {
        path: path.display().to_string(),
        ignored: false,
        source: None,
        line_no: None,
        pattern: None,
    };

    match tree.explain(path, is_dir) {
        Some(IgnoreMatch::MetadataDir) => {
            report.ignored = true;
        },
        Some(IgnoreMatch::Rule { dir, pattern }) => {
            report.ignored = true;
            report.source = Some(tree.rule_file_path(dir).display().to_string());
            report.line_no = Some(pattern.line_no);
            report.pattern = Some(pattern.line.clone());
        },
        None => {},
    }

    report
}
