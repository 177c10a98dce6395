//! Unit test suite for kubemerge
//!
//! Behavioural properties of rename, merge and serialization, checked over a
//! set of representative kubeconfig documents.
//!
//! ```bash
//! cargo test --test unit
//! ```

mod merge_properties;
mod rename_properties;
mod serialization;
