//! Global constants used throughout the kubemerge codebase.
//!
//! Store locations and environment variable names live here so the CLI,
//! the store loader, and the tests agree on them.

/// Directory under the user's home that holds the kubeconfig store.
pub const KUBE_DIR: &str = ".kube";

/// File name of the kubeconfig store inside [`KUBE_DIR`].
pub const KUBECONFIG_FILE: &str = "config";

/// Environment variable that overrides the store path.
///
/// Deliberately not `KUBECONFIG`, which kubectl treats as a path list.
pub const KUBECONFIG_PATH_ENV: &str = "KUBEMERGE_KUBECONFIG";

/// Extension appended to the store path when `--backup` is requested.
pub const BACKUP_EXTENSION: &str = "bak";

/// Unix permission bits for the written store (owner read/write only).
pub const STORE_FILE_MODE: u32 = 0o600;

/// Nested section of a cluster entry holding its connection details.
pub const CLUSTER_SECTION: &str = "cluster";

/// Key of the API server endpoint inside [`CLUSTER_SECTION`].
pub const SERVER_KEY: &str = "server";
