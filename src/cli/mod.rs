//! Command-line interface for kubemerge.
//!
//! kubemerge takes a kubeconfig (pasted on standard input or read with
//! `--input`), renames its active context, and merges it into the local
//! kubeconfig store.
//!
//! # Usage
//!
//! ```bash
//! # Paste a kubeconfig and import it as context "staging"
//! kubemerge staging
//!
//! # Import from a file and point existing clusters at a new API server
//! kubemerge prod https://10.0.0.5:6443 --input ./prod.yaml
//!
//! # Preview the merged kubeconfig without writing it
//! kubemerge --dry-run dev < dev.yaml
//! ```
//!
//! # Global Options
//!
//! - `--verbose` - Enable debug logging on stderr
//! - `--quiet` - Suppress logging, the paste prompt and the success message
//! - `--kubeconfig` - Store to merge into (default `~/.kube/config`)

mod merge;


pub use merge::{MergeCommand, MergeOutcome, prepare_incoming};

use crate::constants::KUBECONFIG_PATH_ENV;
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Runtime configuration for CLI execution.
///
/// Built once from the parsed arguments and passed down to the pipeline, so
/// tests can drive the pipeline without parsing a command line.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log level for the tracing subscriber; `None` disables logging.
    ///
    /// `RUST_LOG` takes precedence when it is set.
    pub log_level: Option<String>,

    /// Store to merge into. `None` means `~/.kube/config`.
    pub kubeconfig_path: Option<PathBuf>,

    /// Print the merged kubeconfig instead of writing the store.
    pub dry_run: bool,

    /// Copy the store to `<store>.bak` before overwriting it.
    pub backup: bool,

    /// Suppress the paste prompt and the success message.
    pub quiet: bool,
}

impl CliConfig {
    /// Create a new CLI configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the store path, falling back to `~/.kube/config`.
    ///
    /// # Errors
    ///
    /// Fails if no path was given and the home directory is unknown.
    pub fn resolve_kubeconfig_path(&self) -> Result<PathBuf> {
        match &self.kubeconfig_path {
            Some(path) => Ok(path.clone()),
            None => Ok(crate::utils::platform::default_kubeconfig_path()?),
        }
    }

    /// Install the global tracing subscriber according to `log_level`.
    ///
    /// Logs go to stderr so they never mix with `--dry-run` output. Calling
    /// this more than once is harmless.
    pub fn init_logging(&self) {
        let Some(level) = &self.log_level else {
            return;
        };

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("kubemerge_cli={level}")));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Merge a kubeconfig into your local kubeconfig under a new context name.
#[derive(Parser, Debug)]
#[command(
    name = "kubemerge",
    about = "Merge a kubeconfig into ~/.kube/config under a new context name",
    version,
    long_about = "Reads a kubeconfig from standard input, renames its current context to \
                  NEW_CONTEXT_NAME and merges its clusters, users and contexts into your local \
                  kubeconfig. Clusters that already exist are kept; pass NEW_SERVER to point \
                  them at a different API server."
)]
pub struct Cli {
    #[command(flatten)]
    merge: MergeCommand,

    /// Kubeconfig store to merge into [default: ~/.kube/config]
    #[arg(long, env = KUBECONFIG_PATH_ENV, value_name = "PATH")]
    kubeconfig: Option<PathBuf>,

    /// Print the merged kubeconfig to stdout instead of writing it
    #[arg(long)]
    dry_run: bool,

    /// Copy the existing store to <store>.bak before overwriting it
    #[arg(long)]
    backup: bool,

    /// Enable debug logging on stderr
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only print errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    /// Execute the CLI with configuration built from the parsed arguments.
    ///
    /// # Errors
    ///
    /// Returns the first pipeline failure; nothing is written in that case.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        config.init_logging();
        self.merge.execute(&config).await
    }

    /// Build a [`CliConfig`] from the parsed CLI arguments.
    ///
    /// - `--verbose` maps to `debug`
    /// - `--quiet` disables logging
    /// - otherwise only warnings are shown
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            None
        } else {
            Some("warn".to_string())
        };

        CliConfig {
            log_level,
            kubeconfig_path: self.kubeconfig.clone(),
            dry_run: self.dry_run,
            backup: self.backup,
            quiet: self.quiet,
        }
    }
}
