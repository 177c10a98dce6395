//! The merge pipeline behind the `kubemerge` command.
//!
//! Steps, each depending on the previous one:
//! 1. Read the incoming kubeconfig (stdin or `--input`)
//! 2. Parse it and rename its current context to the requested name
//! 3. Load the destination store
//! 4. Merge, applying the optional server override
//! 5. Write the store back (or print it with `--dry-run`)
//!
//! Any failure aborts the run before step 5, so the store is either fully
//! updated or untouched.

use crate::core::KubeMergeError;
use crate::kubeconfig::store::backup_store;
use crate::kubeconfig::{KubeConfig, MergeResult, merge_kubeconfigs};
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{debug, info, warn};

/// Positional arguments and input selection for a merge run.
#[derive(Args, Debug, Clone)]
pub struct MergeCommand {
    /// Name the imported context gets in your kubeconfig
    #[arg(value_name = "NEW_CONTEXT_NAME")]
    pub new_context_name: String,

    /// API server to set on clusters that already exist in your kubeconfig
    #[arg(value_name = "NEW_SERVER")]
    pub new_server: Option<String>,

    /// Read the incoming kubeconfig from a file instead of stdin
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,
}

/// What a successful run did.
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    /// Store that was merged into
    pub store_path: PathBuf,
    /// Merge statistics
    pub result: MergeResult,
    /// Serialized merged document when running with `--dry-run`
    pub preview: Option<String>,
    /// Backup written before the store was replaced
    pub backup_path: Option<PathBuf>,
}

impl MergeCommand {
    /// Run the pipeline reading the incoming kubeconfig from stdin (or
    /// `--input`) and report the outcome.
    ///
    /// # Errors
    ///
    /// Returns the first failing step's error.
    pub async fn execute(self, config: &super::CliConfig) -> Result<()> {
        if self.input.is_none() && !config.quiet && std::io::stdin().is_terminal() {
            println!("Paste your kubeconfig file content below (Ctrl+D to end):");
        }

        let outcome = self.run(config, tokio::io::stdin()).await?;

        if let Some(preview) = &outcome.preview {
            print!("{preview}");
            return Ok(());
        }

        if !config.quiet {
            println!(
                "{} Context '{}' added successfully to {}",
                "✓".green(),
                self.new_context_name,
                outcome.store_path.display()
            );
            if let Some(backup) = &outcome.backup_path {
                println!("  Previous kubeconfig saved to {}", backup.display());
            }
        }
        info!("{}", outcome.result.summary());

        Ok(())
    }

    /// Run the pipeline with `stdin` as the fallback input source.
    ///
    /// # Errors
    ///
    /// Returns the first failing step's error; the store is not written.
    pub async fn run<R>(&self, config: &super::CliConfig, stdin: R) -> Result<MergeOutcome>
    where
        R: AsyncRead + Unpin,
    {
        let (input, source_name) = match &self.input {
            Some(path) => (read_input_file(path).await?, path.display().to_string()),
            None => (read_all(stdin).await?, "stdin".to_string()),
        };

        let incoming = prepare_incoming(&input, &source_name, &self.new_context_name)?;

        let store_path = config.resolve_kubeconfig_path()?;
        let mut dest = KubeConfig::load_from(&store_path).await?;

        let result = merge_kubeconfigs(&mut dest, incoming, self.new_server.as_deref())
            .with_context(|| format!("Failed to merge into {}", store_path.display()))?;
        debug!("{}", result.summary());

        if !dest.has_valid_selection() {
            warn!(
                "current-context '{}' does not match any context in {}",
                dest.current_context,
                store_path.display()
            );
        }

        if config.dry_run {
            let preview = dest.to_yaml()?;
            return Ok(MergeOutcome {
                store_path,
                result,
                preview: Some(preview),
                backup_path: None,
            });
        }

        let backup_path = if config.backup {
            Some(backup_store(&store_path).await?)
        } else {
            None
        };

        dest.save_to(&store_path).await?;

        Ok(MergeOutcome {
            store_path,
            result,
            preview: None,
            backup_path,
        })
    }
}

/// Parse the incoming document and rename its active context.
///
/// # Errors
///
/// - [`KubeMergeError::ParseError`] if the document does not parse
/// - [`KubeMergeError::MissingSelection`] if it has no `current-context`
/// - [`KubeMergeError::RenameFailure`] if the active context is not listed
pub fn prepare_incoming(
    input: &[u8],
    source_name: &str,
    new_context_name: &str,
) -> Result<KubeConfig, KubeMergeError> {
    let mut incoming = KubeConfig::parse_from(input, source_name)?;

    let old_context_name = incoming.current_context.clone();
    if old_context_name.is_empty() {
        return Err(KubeMergeError::MissingSelection);
    }

    if !incoming.rename_context(&old_context_name, new_context_name) {
        return Err(KubeMergeError::RenameFailure {
            old: old_context_name,
            new: new_context_name.to_string(),
        });
    }
    debug!("Renamed context '{}' to '{}'", old_context_name, new_context_name);

    Ok(incoming)
}

async fn read_all<R>(mut reader: R) -> Result<Vec<u8>, KubeMergeError>
where
    R: AsyncRead + Unpin,
{
    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer).await.map_err(|e| KubeMergeError::InputReadError {
        reason: e.to_string(),
    })?;
    debug!("Read {} bytes of kubeconfig input", buffer.len());
    Ok(buffer)
}

async fn read_input_file(path: &Path) -> Result<Vec<u8>, KubeMergeError> {
    tokio::fs::read(path).await.map_err(|e| KubeMergeError::InputReadError {
        reason: format!("{}: {e}", path.display()),
    })
}
