//! Merging an incoming kubeconfig into an existing one.
//!
//! The merge policy is deliberately shallow:
//! - Clusters are upserted by name. An existing cluster wins; its server is
//!   replaced only when a server override is given. Unknown clusters are
//!   appended unchanged.
//! - Users and contexts are appended without deduplication.
//! - A non-empty incoming `current-context` replaces the destination's.
//!
//! Duplicate user or context names produced by the append are logged as
//! warnings and left in place; kubectl resolves them by position.

use super::{KubeConfig, NamedEntry, duplicate_names};
use crate::constants::{CLUSTER_SECTION, SERVER_KEY};
use crate::core::KubeMergeError;
use tracing::{debug, warn};

/// Result of a merge operation for reporting and debugging
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeResult {
    /// Incoming clusters appended to the destination
    pub clusters_added: usize,
    /// Existing clusters whose server was replaced by the override
    pub clusters_overridden: usize,
    /// Incoming clusters dropped because the destination already had one
    pub clusters_kept: usize,
    /// Users appended to the destination
    pub users_appended: usize,
    /// Contexts appended to the destination
    pub contexts_appended: usize,
    /// Whether the destination's `current-context` changed
    pub selection_changed: bool,
    /// User names the merge made ambiguous
    pub duplicate_users: Vec<String>,
    /// Context names the merge made ambiguous
    pub duplicate_contexts: Vec<String>,
}

impl MergeResult {
    /// One-line summary for CLI output.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} cluster(s) added, {} server(s) updated, {} cluster(s) kept, {} user(s) and {} context(s) added",
            self.clusters_added,
            self.clusters_overridden,
            self.clusters_kept,
            self.users_appended,
            self.contexts_appended
        )
    }
}

/// Merge `incoming` into `dest` in place.
///
/// `server_override` replaces the `cluster.server` field of every destination
/// cluster that shares a name with an incoming cluster. An empty string is
/// treated the same as `None`. Incoming top-level extension keys,
/// `apiVersion` and `kind` are ignored; the destination keeps its own.
///
/// # Errors
///
/// Returns [`KubeMergeError::TypeMismatch`] if an override is requested for a
/// destination cluster whose `cluster` field is missing or not a mapping.
/// `dest` may already be partially updated at that point and should be
/// discarded.
pub fn merge_kubeconfigs(
    dest: &mut KubeConfig,
    incoming: KubeConfig,
    server_override: Option<&str>,
) -> Result<MergeResult, KubeMergeError> {
    let server_override = server_override.filter(|server| !server.is_empty());
    let mut result = MergeResult::default();

    let KubeConfig {
        clusters,
        users,
        contexts,
        current_context,
        ..
    } = incoming;

    let users_before = duplicate_names(&dest.users);
    let contexts_before = duplicate_names(&dest.contexts);

    for cluster in clusters {
        match dest.clusters.iter_mut().find(|existing| existing.name == cluster.name) {
            Some(existing) => match server_override {
                Some(server) => {
                    debug!("Overriding server of cluster '{}' with {}", existing.name, server);
                    existing.set_nested_str(CLUSTER_SECTION, SERVER_KEY, server)?;
                    result.clusters_overridden += 1;
                }
                None => {
                    debug!("Cluster '{}' already present, keeping existing entry", existing.name);
                    result.clusters_kept += 1;
                }
            },
            None => {
                debug!("Adding cluster '{}'", cluster.name);
                dest.clusters.push(cluster);
                result.clusters_added += 1;
            }
        }
    }

    result.users_appended = users.len();
    dest.users.extend(users);

    result.contexts_appended = contexts.len();
    dest.contexts.extend(contexts);

    if !current_context.is_empty() {
        result.selection_changed = dest.current_context != current_context;
        dest.current_context = current_context;
    }

    result.duplicate_users = new_duplicates(&dest.users, &users_before);
    result.duplicate_contexts = new_duplicates(&dest.contexts, &contexts_before);
    for name in &result.duplicate_users {
        warn!("User '{}' now appears more than once in the kubeconfig", name);
    }
    for name in &result.duplicate_contexts {
        warn!("Context '{}' now appears more than once in the kubeconfig", name);
    }

    debug!("Merge finished: {:?}", result);
    Ok(result)
}

/// Duplicate names in `entries` that were not already duplicated before.
fn new_duplicates(entries: &[NamedEntry], before: &[String]) -> Vec<String> {
    duplicate_names(entries).into_iter().filter(|name| !before.contains(name)).collect()
}
