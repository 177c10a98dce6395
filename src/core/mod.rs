//! Core types shared by every kubemerge module.
//!
//! Currently this is the error system: [`KubeMergeError`] for typed failures
//! and [`ErrorContext`] / [`user_friendly_error`] for CLI reporting.

pub mod error;

pub use error::{ErrorContext, KubeMergeError, user_friendly_error};
