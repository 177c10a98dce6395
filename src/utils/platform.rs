//! Platform-specific helpers.
//!
//! Home directory resolution is the only platform difference the merge
//! pipeline cares about; kubectl keeps its store under the home directory on
//! every platform.

use crate::constants::{KUBE_DIR, KUBECONFIG_FILE};
use crate::core::KubeMergeError;
use std::path::PathBuf;

/// Returns `true` when running on Windows.
#[must_use]
pub const fn is_windows() -> bool {
    cfg!(windows)
}

/// Gets the home directory path for the current user.
///
/// # Errors
///
/// Returns [`KubeMergeError::HomeDirNotFound`] if neither `HOME` (Unix) nor
/// `USERPROFILE` (Windows) can be resolved.
pub fn get_home_dir() -> Result<PathBuf, KubeMergeError> {
    dirs::home_dir().ok_or(KubeMergeError::HomeDirNotFound)
}

/// Default location of the kubeconfig store: `~/.kube/config`.
///
/// # Errors
///
/// Fails when the home directory cannot be determined.
pub fn default_kubeconfig_path() -> Result<PathBuf, KubeMergeError> {
    Ok(get_home_dir()?.join(KUBE_DIR).join(KUBECONFIG_FILE))
}
