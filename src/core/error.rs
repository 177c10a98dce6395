//! Error handling for kubemerge
//!
//! Two types make up the error system:
//! - [`KubeMergeError`] - one variant per failure mode of the merge pipeline
//! - [`ErrorContext`] - wraps an error with a user-facing suggestion and details
//!
//! Every error is terminal: the CLI reports it and exits non-zero without
//! touching the store. Use [`user_friendly_error`] to turn any `anyhow::Error`
//! coming out of the pipeline into an [`ErrorContext`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use kubemerge_cli::core::{KubeMergeError, ErrorContext, user_friendly_error};
//!
//! let error = KubeMergeError::MissingSelection;
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // Prints colored error with suggestions
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for kubemerge operations
///
/// ## Input
/// - [`ParseError`] - A document is not valid kubeconfig YAML
/// - [`InputReadError`] - The incoming document could not be read
/// - [`MissingSelection`] - The incoming document has no `current-context`
/// - [`RenameFailure`] - The active context is missing from the context list
///
/// ## Merge
/// - [`TypeMismatch`] - A nested field did not have the expected shape
///
/// ## Store
/// - [`StoreLoadError`] - The destination store is unreadable or malformed
/// - [`StoreSaveError`] - The destination store could not be written
/// - [`HomeDirNotFound`] - The default store location cannot be resolved
///
/// [`ParseError`]: KubeMergeError::ParseError
/// [`InputReadError`]: KubeMergeError::InputReadError
/// [`MissingSelection`]: KubeMergeError::MissingSelection
/// [`RenameFailure`]: KubeMergeError::RenameFailure
/// [`TypeMismatch`]: KubeMergeError::TypeMismatch
/// [`StoreLoadError`]: KubeMergeError::StoreLoadError
/// [`StoreSaveError`]: KubeMergeError::StoreSaveError
/// [`HomeDirNotFound`]: KubeMergeError::HomeDirNotFound
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KubeMergeError {
    /// Document parsing error
    #[error("Error parsing kubeconfig from {source_name}: {reason}")]
    ParseError {
        /// Where the document came from (`stdin`, a file path, ...)
        source_name: String,
        /// Parser message
        reason: String,
    },

    /// Reading the incoming document failed before parsing
    #[error("Error reading kubeconfig input: {reason}")]
    InputReadError {
        /// Underlying I/O message
        reason: String,
    },

    /// Incoming document lacks an active context pointer
    #[error("The provided kubeconfig does not have a 'current-context'")]
    MissingSelection,

    /// The named context is not in the incoming context list
    #[error("Failed to rename context '{old}' to '{new}'")]
    RenameFailure {
        /// Context name that was looked up
        old: String,
        /// Name it should have been renamed to
        new: String,
    },

    /// A nested field exists but has the wrong shape
    #[error("Entry '{entity}' has an invalid '{field}' field: expected {expected}")]
    TypeMismatch {
        /// Name of the entry being modified
        entity: String,
        /// Field that failed the shape check
        field: String,
        /// Human-readable expected shape
        expected: String,
    },

    /// Destination store unreadable or malformed
    #[error("Error loading default kubeconfig {path}: {reason}")]
    StoreLoadError {
        /// Store path
        path: String,
        /// Underlying read or parse message
        reason: String,
    },

    /// Destination store unwritable
    #[error("Error saving kubeconfig {path}: {reason}")]
    StoreSaveError {
        /// Store path
        path: String,
        /// Underlying write message
        reason: String,
    },

    /// Home directory cannot be determined
    #[error("Could not determine home directory")]
    HomeDirNotFound,
}

/// Error wrapper with a suggestion and details for CLI output
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: KubeMergeError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: KubeMergeError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error (shown in green).
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add details explaining the error (shown in yellow).
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error context to stdout with terminal colors.
    ///
    /// Diagnostics go to stdout so they interleave with the paste prompt and
    /// the success message the tool also prints there.
    pub fn display(&self) {
        println!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            println!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            println!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into an [`ErrorContext`] with suggestions.
///
/// Walks the `anyhow` chain looking for a [`KubeMergeError`] first, then
/// falls back to YAML errors. Anything else is reported as a generic
/// parse failure carrying the full chain as its reason.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(kube_error) = error.chain().find_map(|e| e.downcast_ref::<KubeMergeError>()) {
        return create_error_context(kube_error.clone());
    }

    if let Some(yaml_error) = error.chain().find_map(|e| e.downcast_ref::<serde_yaml::Error>()) {
        return ErrorContext::new(KubeMergeError::ParseError {
            source_name: "input".to_string(),
            reason: yaml_error.to_string(),
        })
        .with_suggestion("Check the YAML syntax: indentation, list dashes and quoting");
    }

    ErrorContext::new(KubeMergeError::ParseError {
        source_name: "input".to_string(),
        reason: format!("{error:#}"),
    })
}

fn create_error_context(error: KubeMergeError) -> ErrorContext {
    match &error {
        KubeMergeError::ParseError { .. } => ErrorContext::new(error)
            .with_suggestion("Paste the complete kubeconfig, including apiVersion, clusters, contexts and users")
            .with_details("The document must be a YAML mapping and every cluster, user and context needs a string 'name'"),
        KubeMergeError::InputReadError { .. } => ErrorContext::new(error)
            .with_suggestion("Pipe the kubeconfig into the command or pass it with --input <FILE>"),
        KubeMergeError::MissingSelection => ErrorContext::new(error)
            .with_suggestion("Set 'current-context' in the pasted kubeconfig to the context you want to import")
            .with_details("The active context is the one that gets renamed and selected after the merge"),
        KubeMergeError::RenameFailure { old, .. } => {
            let suggestion = format!("Add a context named '{old}' to the pasted kubeconfig or fix 'current-context'");
            ErrorContext::new(error).with_suggestion(suggestion)
        }
        KubeMergeError::TypeMismatch { .. } => ErrorContext::new(error)
            .with_suggestion("Fix the cluster entry in your kubeconfig so 'cluster' is a mapping with a 'server' field"),
        KubeMergeError::StoreLoadError { .. } => ErrorContext::new(error)
            .with_suggestion("Make sure the kubeconfig exists and is valid YAML, or point --kubeconfig at another file")
            .with_details("The store is never created from scratch; it must already exist"),
        KubeMergeError::StoreSaveError { .. } => ErrorContext::new(error)
            .with_suggestion("Check that the directory is writable and the disk is not full")
            .with_details("The existing kubeconfig was left untouched"),
        KubeMergeError::HomeDirNotFound => {
            let platform_help = if crate::utils::platform::is_windows() {
                "Check that the USERPROFILE environment variable is set"
            } else {
                "Check that the HOME environment variable is set"
            };
            ErrorContext::new(error)
                .with_suggestion(format!("{platform_help}, or pass --kubeconfig <PATH>"))
        }
    }
}
