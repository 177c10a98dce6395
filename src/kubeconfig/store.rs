//! Loading and saving the kubeconfig store on disk.
//!
//! The store is read in full, changed in memory and replaced in one atomic
//! write. There is no locking: two concurrent runs against the same store
//! resolve as last-writer-wins.

use super::KubeConfig;
use crate::constants::BACKUP_EXTENSION;
use crate::core::KubeMergeError;
use crate::utils::fs::atomic_write_private;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

impl KubeConfig {
    /// Load and parse the kubeconfig store at `path`.
    ///
    /// A missing store is an error; it is never created from scratch.
    ///
    /// # Errors
    ///
    /// Returns [`KubeMergeError::StoreLoadError`] if the file cannot be read or
    /// does not parse.
    pub async fn load_from(path: &Path) -> Result<Self, KubeMergeError> {
        debug!("Loading kubeconfig store from {}", path.display());

        let content = fs::read(path).await.map_err(|e| KubeMergeError::StoreLoadError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        Self::parse_from(&content, &path.display().to_string()).map_err(|e| {
            KubeMergeError::StoreLoadError {
                path: path.display().to_string(),
                reason: match e {
                    KubeMergeError::ParseError { reason, .. } => reason,
                    other => other.to_string(),
                },
            }
        })
    }

    /// Serialize and atomically write the kubeconfig to `path`.
    ///
    /// The file is replaced via a temporary file and restricted to the
    /// owning user (mode `0600` on Unix).
    ///
    /// # Errors
    ///
    /// Returns [`KubeMergeError::StoreSaveError`] if serialization or any
    /// write step fails. The previous store content is left intact.
    pub async fn save_to(&self, path: &Path) -> Result<(), KubeMergeError> {
        let save_error = |reason: String| KubeMergeError::StoreSaveError {
            path: path.display().to_string(),
            reason,
        };

        let content = self.to_yaml().map_err(|e| save_error(format!("{e:#}")))?;

        let target = path.to_path_buf();
        tokio::task::spawn_blocking(move || atomic_write_private(&target, content.as_bytes()))
            .await
            .map_err(|e| save_error(e.to_string()))?
            .map_err(|e| save_error(format!("{e:#}")))?;

        debug!("Saved kubeconfig store to {}", path.display());
        Ok(())
    }
}

/// Path of the backup written next to `path` (`config` -> `config.bak`).
#[must_use]
pub fn backup_path(path: &Path) -> PathBuf {
    let mut file_name = path.file_name().map(|name| name.to_os_string()).unwrap_or_default();
    file_name.push(".");
    file_name.push(BACKUP_EXTENSION);
    path.with_file_name(file_name)
}

/// Copy the current store to its backup path before it is overwritten.
///
/// # Errors
///
/// Returns [`KubeMergeError::StoreSaveError`] if the copy fails.
pub async fn backup_store(path: &Path) -> Result<PathBuf, KubeMergeError> {
    let backup = backup_path(path);
    fs::copy(path, &backup).await.map_err(|e| KubeMergeError::StoreSaveError {
        path: backup.display().to_string(),
        reason: format!("Failed to create backup: {e}"),
    })?;
    crate::utils::fs::set_owner_only_permissions(&backup).map_err(|e| {
        KubeMergeError::StoreSaveError {
            path: backup.display().to_string(),
            reason: format!("{e:#}"),
        }
    })?;

    debug!("Backed up {} to {}", path.display(), backup.display());
    Ok(backup)
}
