//! kubemerge - merge a kubeconfig into your local kubeconfig store
//!
//! kubemerge takes a kubeconfig handed to you by a cluster installer or a
//! colleague, gives its active context a name of your choosing, and merges it
//! into `~/.kube/config`.
//!
//! # Merge Rules
//!
//! - **Clusters** are upserted by name. An existing cluster wins, but its
//!   server can be replaced with an override. New clusters are appended.
//! - **Users** and **contexts** are appended as they are, without
//!   deduplication.
//! - **current-context** switches to the renamed incoming context.
//!
//! Every field the tool does not interpret, at the top level or inside an
//! entry, is written back unchanged.
//!
//! # Modules
//!
//! - [`kubeconfig`] - Document model, rename, merge engine and store I/O
//! - [`cli`] - Command-line parsing and the merge pipeline
//! - [`core`] - Error types and user-facing error reporting
//! - [`utils`] - Atomic file writes and platform paths
//! - [`constants`] - Store locations and well-known keys
//!
//! # Example
//!
//! ```rust,no_run
//! use kubemerge_cli::kubeconfig::{KubeConfig, merge_kubeconfigs};
//!
//! # async fn example(pasted: &[u8]) -> anyhow::Result<()> {
//! let mut incoming = KubeConfig::parse(pasted)?;
//! let active = incoming.current_context.clone();
//! incoming.rename_context(&active, "staging");
//!
//! let path = kubemerge_cli::utils::default_kubeconfig_path()?;
//! let mut store = KubeConfig::load_from(&path).await?;
//! let result = merge_kubeconfigs(&mut store, incoming, None)?;
//! store.save_to(&path).await?;
//! println!("{}", result.summary());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod constants;
pub mod core;
pub mod kubeconfig;
pub mod utils;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
