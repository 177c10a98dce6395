//! File system helpers for atomically replacing the store.
//!
//! The kubeconfig store holds credentials, so every write goes through
//! [`atomic_write_private`]: the content lands in a temporary file next to the
//! target, is synced, restricted to the owning user, and renamed over the
//! target. Readers never observe a partially written store.
//!
//! # Examples
//!
//! ```rust,no_run
//! use kubemerge_cli::utils::fs::atomic_write_private;
//! use std::path::{Path, PathBuf};
//!
//! # fn example() -> anyhow::Result<()> {
//! atomic_write_private(Path::new("/tmp/kube/config"), b"apiVersion: v1\n")?;
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Creates a directory and all of its parents if they do not exist.
///
/// # Errors
///
/// Fails if the path exists but is not a directory, or if creation fails.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Ok(());
    }
    if path.exists() {
        if !path.is_dir() {
            anyhow::bail!("Path exists but is not a directory: {}", path.display());
        }
        return Ok(());
    }
    fs::create_dir_all(path)
        .with_context(|| format!("Failed to create directory: {}", path.display()))
}

/// Atomically replaces `path` with `content`, readable only by the owner.
///
/// Steps:
/// 1. Write to a temporary file in the target's directory
/// 2. Sync it to disk
/// 3. Restrict permissions to `0600` (Unix)
/// 4. Rename it over the target
///
/// If `path` is a symlink the write goes to the file it points to and the
/// link itself is kept. The temporary file lives in the same directory as
/// that file so the rename never crosses a file system boundary. If any step
/// fails the temporary file is removed and the target is left untouched.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or any write step
/// fails.
pub fn atomic_write_private(path: &Path, content: &[u8]) -> Result<()> {
    let target = resolve_symlink(path)?;
    let path = target.as_path();
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    ensure_dir(parent)?;

    let mut temp = tempfile::Builder::new()
        .prefix(".kubemerge-")
        .suffix(".tmp")
        .tempfile_in(parent)
        .with_context(|| {
            let platform_help = if crate::utils::platform::is_windows() {
                "On Windows: Check file permissions, path length, and that directory exists"
            } else {
                "Check file permissions and that directory exists"
            };
            format!("Failed to create temp file in: {}\n\n{}", parent.display(), platform_help)
        })?;

    temp.write_all(content)
        .with_context(|| format!("Failed to write to temp file: {}", temp.path().display()))?;
    temp.as_file().sync_all().context("Failed to sync file to disk")?;

    set_owner_only_permissions(temp.path())?;

    temp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to rename temp file to: {}", path.display()))?;

    Ok(())
}

/// Follows `path` to its final target when it is a symlink.
///
/// Non-links and paths that do not exist yet are returned unchanged.
///
/// # Errors
///
/// Returns an error if the link cannot be resolved, e.g. it is dangling.
pub fn resolve_symlink(path: &Path) -> Result<PathBuf> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => fs::canonicalize(path)
            .with_context(|| format!("Failed to resolve symlink: {}", path.display())),
        _ => Ok(path.to_path_buf()),
    }
}

/// Restricts a file to owner read/write. No-op on non-Unix platforms.
///
/// # Errors
///
/// Returns an error if the permissions cannot be read or changed.
pub fn set_owner_only_permissions(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        let mut perms = fs::metadata(path)
            .with_context(|| format!("Failed to read permissions for {}", path.display()))?
            .permissions();
        perms.set_mode(crate::constants::STORE_FILE_MODE);
        fs::set_permissions(path, perms)
            .with_context(|| format!("Failed to set secure permissions on {}", path.display()))?;
    }
    #[cfg(not(unix))]
    let _ = path;

    Ok(())
}
