//! Kubeconfig fixtures for tests.
//!
//! ```rust,no_run
//! use kubemerge_cli::test_utils::KubeConfigBuilder;
//!
//! let config = KubeConfigBuilder::new()
//!     .cluster("c1", "https://old")
//!     .user("u1", "token")
//!     .context("ctx1", "c1", "u1")
//!     .current_context("ctx1")
//!     .build();
//! let yaml = KubeConfigBuilder::new().cluster("c1", "https://old").to_yaml();
//! ```

use crate::kubeconfig::{KubeConfig, NamedEntry};
use serde_yaml::{Mapping, Value};

/// Cluster entry with a `cluster.server` field.
#[must_use]
pub fn cluster(name: &str, server: &str) -> NamedEntry {
    let mut details = Mapping::new();
    details.insert("server".into(), server.into());
    NamedEntry::new(name).with_field("cluster", details)
}

/// Context entry referencing a cluster and a user.
#[must_use]
pub fn context(name: &str, cluster: &str, user: &str) -> NamedEntry {
    let mut details = Mapping::new();
    details.insert("cluster".into(), cluster.into());
    details.insert("user".into(), user.into());
    NamedEntry::new(name).with_field("context", details)
}

/// User entry authenticating with a bearer token.
#[must_use]
pub fn user(name: &str, token: &str) -> NamedEntry {
    let mut details = Mapping::new();
    details.insert("token".into(), token.into());
    NamedEntry::new(name).with_field("user", details)
}

/// Builder for [`KubeConfig`] documents with `apiVersion: v1` / `kind: Config`.
#[derive(Debug, Clone)]
pub struct KubeConfigBuilder {
    config: KubeConfig,
}

impl Default for KubeConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl KubeConfigBuilder {
    /// Start an empty `v1` / `Config` document.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: KubeConfig {
                api_version: "v1".to_string(),
                kind: "Config".to_string(),
                ..KubeConfig::default()
            },
        }
    }

    /// Append a cluster.
    #[must_use]
    pub fn cluster(mut self, name: &str, server: &str) -> Self {
        self.config.clusters.push(cluster(name, server));
        self
    }

    /// Append a context.
    #[must_use]
    pub fn context(mut self, name: &str, cluster_name: &str, user_name: &str) -> Self {
        self.config.contexts.push(context(name, cluster_name, user_name));
        self
    }

    /// Append a user.
    #[must_use]
    pub fn user(mut self, name: &str, token: &str) -> Self {
        self.config.users.push(user(name, token));
        self
    }

    /// Set `current-context`.
    #[must_use]
    pub fn current_context(mut self, name: &str) -> Self {
        self.config.current_context = name.to_string();
        self
    }

    /// Add an unrecognized top-level key.
    #[must_use]
    pub fn extension(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.config.extensions.insert(Value::String(key.to_string()), value.into());
        self
    }

    /// Finish the document.
    #[must_use]
    pub fn build(self) -> KubeConfig {
        self.config
    }

    /// Finish the document as YAML text.
    ///
    /// # Panics
    ///
    /// Panics if serialization fails, which fixtures never trigger.
    #[must_use]
    pub fn to_yaml(self) -> String {
        self.config.to_yaml().expect("fixture kubeconfig should serialize")
    }
}
