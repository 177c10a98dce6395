//! kubemerge CLI entry point
//!
//! Reads a kubeconfig from standard input, renames its current context, and
//! merges it into `~/.kube/config`. Exits with status 1 on any failure,
//! including a missing context name.

use clap::Parser;
use clap::error::ErrorKind;
use kubemerge_cli::cli;
use kubemerge_cli::core::user_friendly_error;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Usage errors exit with 1 rather than clap's default of 2
    let cli = match cli::Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    };

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    if let Err(e) = cli.execute().await {
        // Convert to user-friendly error with context and suggestions
        let error_ctx = user_friendly_error(e);
        error_ctx.display();
        std::process::exit(1);
    }
}
