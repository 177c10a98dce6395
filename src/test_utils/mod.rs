//! Test utilities for kubemerge
//!
//! Shared helpers for unit and integration tests:
//! - [`init_test_logging`] - one-time tracing setup for tests
//! - [`fixtures`] - builders for kubeconfig documents and entries

pub mod fixtures;

pub use fixtures::{KubeConfigBuilder, cluster, context, user};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Uses the given level if provided, otherwise `RUST_LOG`. With neither set,
/// tests run without a subscriber.
///
/// ```bash
/// RUST_LOG=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}
