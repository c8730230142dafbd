//! Logging utilities
//!
//! Thin wrapper over `tracing-subscriber` so embedders and tests initialize
//! logging the same way.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// Honors `RUST_LOG` when set, otherwise falls back to `default_directive`
/// (for example `"placement_portal=info"`). Safe to call more than once;
/// subsequent calls are no-ops.
pub fn init_logging(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
