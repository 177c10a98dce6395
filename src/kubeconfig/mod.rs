//! Kubeconfig document model.
//!
//! A kubeconfig is three name-keyed lists (clusters, users, contexts), the
//! name of the active context, and whatever else kubectl or other tools put at
//! the top level. This module keeps the parts the merge needs typed and
//! carries everything else through untouched:
//!
//! - [`KubeConfig`] types the top-level keys and collects unknown keys in
//!   [`KubeConfig::extensions`]
//! - [`NamedEntry`] types only `name`; every other key of a cluster, user or
//!   context stays in an ordered, opaque [`Mapping`]
//!
//! Parsing then serializing a document keeps every recognized and unknown
//! field, so writing the store back does not drop settings the tool never
//! looked at.
//!
//! # Examples
//!
//! ```rust,no_run
//! use kubemerge_cli::kubeconfig::KubeConfig;
//!
//! # fn example() -> anyhow::Result<()> {
//! let mut config = KubeConfig::parse(b"current-context: kind-kind\ncontexts:\n- name: kind-kind\n")?;
//! assert!(config.rename_context("kind-kind", "dev"));
//! assert_eq!(config.current_context, "dev");
//! let yaml = config.to_yaml()?;
//! # Ok(())
//! # }
//! ```

pub mod merge;
pub mod store;

pub use merge::{MergeResult, merge_kubeconfigs};

use crate::core::KubeMergeError;
use anyhow::{Context, Result};
use serde::de::{self, DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::{Mapping, Value};
use std::collections::HashSet;

/// A parsed kubeconfig document.
///
/// Field order matches the order kubectl writes, and serialization follows
/// it. Collections missing from the input (or written as `null`) come back as
/// empty lists; they are always written back out.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KubeConfig {
    /// Schema version, normally `v1`
    #[serde(rename = "apiVersion")]
    pub api_version: String,

    /// Document kind, normally `Config`
    pub kind: String,

    /// Cluster entries (`name` plus a `cluster` section with `server`)
    pub clusters: Vec<NamedEntry>,

    /// Context entries pairing a cluster with a user
    pub contexts: Vec<NamedEntry>,

    /// Name of the active context; empty when unset
    #[serde(rename = "current-context")]
    pub current_context: String,

    /// Credential entries
    pub users: Vec<NamedEntry>,

    /// Unrecognized top-level keys (`preferences`, `extensions`, ...)
    #[serde(flatten)]
    pub extensions: Mapping,
}

/// One cluster, user or context entry.
///
/// Only `name` is interpreted. The remaining keys keep their original order
/// in `fields` and are written back exactly as read.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedEntry {
    /// Identity of the entry within its collection
    pub name: String,

    /// Every other key of the entry
    #[serde(flatten)]
    pub fields: Mapping,
}

// Deserialized by hand from a whole `Mapping`: serde's flatten buffer rejects
// values carrying a custom `!tag`. Known keys are shift-removed so the
// remaining keys keep their document order.

impl<'de> Deserialize<'de> for KubeConfig {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut map = Mapping::deserialize(deserializer)?;
        Ok(Self {
            api_version: take_field(&mut map, "apiVersion")?,
            kind: take_field(&mut map, "kind")?,
            clusters: take_field(&mut map, "clusters")?,
            contexts: take_field(&mut map, "contexts")?,
            current_context: take_field(&mut map, "current-context")?,
            users: take_field(&mut map, "users")?,
            extensions: map,
        })
    }
}

impl<'de> Deserialize<'de> for NamedEntry {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut fields = Mapping::deserialize(deserializer)?;
        match fields.shift_remove("name") {
            Some(Value::String(name)) => Ok(Self { name, fields }),
            Some(_) => Err(D::Error::custom("entry field 'name' must be a string")),
            None => Err(D::Error::missing_field("name")),
        }
    }
}

/// Remove `key` from `map` and decode it; missing and `null` give the default.
fn take_field<T, E>(map: &mut Mapping, key: &str) -> std::result::Result<T, E>
where
    T: Default + DeserializeOwned,
    E: de::Error,
{
    match map.shift_remove(key) {
        None | Some(Value::Null) => Ok(T::default()),
        Some(value) => serde_yaml::from_value(value).map_err(|e| E::custom(format!("{key}: {e}"))),
    }
}

impl NamedEntry {
    /// Create an entry with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Mapping::new(),
        }
    }

    /// Builder-style setter for an arbitrary field.
    #[must_use]
    pub fn with_field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(Value::String(key.to_string()), value.into());
        self
    }

    /// Read a string nested one level down, e.g. `cluster.server`.
    ///
    /// Returns `None` when the section or key is missing or not of the
    /// expected type.
    #[must_use]
    pub fn nested_str(&self, section: &str, key: &str) -> Option<&str> {
        self.fields.get(section)?.as_mapping()?.get(key)?.as_str()
    }

    /// Write a string nested one level down, e.g. `cluster.server`.
    ///
    /// The key is inserted if the section lacks it.
    ///
    /// # Errors
    ///
    /// Returns [`KubeMergeError::TypeMismatch`] if the section is missing or
    /// is not a mapping.
    pub fn set_nested_str(
        &mut self,
        section: &str,
        key: &str,
        value: &str,
    ) -> Result<(), KubeMergeError> {
        match self.fields.get_mut(section) {
            Some(Value::Mapping(map)) => {
                map.insert(Value::String(key.to_string()), Value::String(value.to_string()));
                Ok(())
            }
            _ => Err(KubeMergeError::TypeMismatch {
                entity: self.name.clone(),
                field: section.to_string(),
                expected: format!("a mapping containing '{key}'"),
            }),
        }
    }
}

impl KubeConfig {
    /// Parse a kubeconfig read from standard input.
    ///
    /// # Errors
    ///
    /// Returns [`KubeMergeError::ParseError`] for malformed YAML or a document
    /// whose shape does not match a kubeconfig.
    pub fn parse(bytes: &[u8]) -> Result<Self, KubeMergeError> {
        Self::parse_from(bytes, "stdin")
    }

    /// Parse a kubeconfig, naming its origin in any error.
    ///
    /// # Errors
    ///
    /// Returns [`KubeMergeError::ParseError`] on malformed input.
    pub fn parse_from(bytes: &[u8], source_name: &str) -> Result<Self, KubeMergeError> {
        serde_yaml::from_slice(bytes).map_err(|e| KubeMergeError::ParseError {
            source_name: source_name.to_string(),
            reason: e.to_string(),
        })
    }

    /// Serialize the document to YAML.
    ///
    /// # Errors
    ///
    /// Only fails if an extension value cannot be represented in YAML, which
    /// cannot happen for documents produced by [`KubeConfig::parse`].
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize kubeconfig to YAML")
    }

    /// Rename a context and make it the current one.
    ///
    /// Only the first context named `old_name` is renamed. Returns `false`
    /// and leaves the document untouched if there is no such context.
    pub fn rename_context(&mut self, old_name: &str, new_name: &str) -> bool {
        match self.contexts.iter_mut().find(|context| context.name == old_name) {
            Some(context) => {
                context.name = new_name.to_string();
                self.current_context = new_name.to_string();
                true
            }
            None => false,
        }
    }

    /// First cluster with the given name.
    #[must_use]
    pub fn find_cluster(&self, name: &str) -> Option<&NamedEntry> {
        self.clusters.iter().find(|cluster| cluster.name == name)
    }

    /// First context with the given name.
    #[must_use]
    pub fn find_context(&self, name: &str) -> Option<&NamedEntry> {
        self.contexts.iter().find(|context| context.name == name)
    }

    /// First user with the given name.
    #[must_use]
    pub fn find_user(&self, name: &str) -> Option<&NamedEntry> {
        self.users.iter().find(|user| user.name == name)
    }

    /// Context names in document order.
    #[must_use]
    pub fn context_names(&self) -> Vec<&str> {
        self.contexts.iter().map(|context| context.name.as_str()).collect()
    }

    /// Whether `current_context` names an existing context (or is unset).
    #[must_use]
    pub fn has_valid_selection(&self) -> bool {
        self.current_context.is_empty() || self.find_context(&self.current_context).is_some()
    }
}

/// Names that occur more than once in `entries`, in first-duplicate order.
#[must_use]
pub fn duplicate_names(entries: &[NamedEntry]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    for entry in entries {
        if !seen.insert(entry.name.as_str()) && !duplicates.contains(&entry.name) {
            duplicates.push(entry.name.clone());
        }
    }
    duplicates
}
