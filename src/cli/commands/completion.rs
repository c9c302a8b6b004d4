use crate::cli::Cli;
use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{generate, Shell};
use colored::Colorize;
use std::io;

/// Generate shell completion scripts.
///
/// The script goes to stdout; installation hints go to stderr so the output
/// can be redirected straight into a completion file.
pub fn execute(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    let bin_name = "digignore";

    generate(shell, &mut cmd, bin_name, &mut io::stdout());

    eprintln!("\n{}", "Installation Instructions:".bold());

    match shell {
        Shell::Bash => {
            eprintln!("  Add the following to your ~/.bashrc or ~/.bash_profile:");
            eprintln!("  {}", "eval \"$(digignore completion bash)\"".cyan());
        },
        Shell::Zsh => {
            eprintln!("  Save the script to a file in your fpath:");
            eprintln!(
                "  {}",
                "digignore completion zsh > ~/.local/share/zsh/site-functions/_digignore".cyan()
            );
        },
        Shell::Fish => {
            eprintln!("  Save the completion script:");
            eprintln!(
                "  {}",
                "digignore completion fish > ~/.config/fish/completions/digignore.fish".cyan()
            );
        },
        Shell::PowerShell => {
            eprintln!("  Add the following to your PowerShell profile:");
            eprintln!(
                "  {}",
                "Invoke-Expression (& digignore completion powershell)".cyan()
            );
        },
        _ => {
            eprintln!("  Save the script where your shell loads completions from.");
        },
    }

    Ok(())
}
