//! Utility modules for file system access and platform differences.
//!
//! - [`fs`] - Atomic, owner-only writes for the store
//! - [`platform`] - Home directory and default store resolution

pub mod fs;
pub mod platform;

pub use fs::{atomic_write_private, ensure_dir};
pub use platform::{default_kubeconfig_path, get_home_dir};
