//! Tracing subscriber setup for binaries and demos built on the client.

use std::sync::Once;
use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVE: &str = "info";

static INSTALL: Once = Once::new();

/// Installs a fmt subscriber filtered by `RUST_LOG`, or `info` when unset.
/// Later calls, and calls after another subscriber was installed, do nothing.
pub fn init_tracing() {
    init_tracing_with(DEFAULT_DIRECTIVE);
}

/// Same as [`init_tracing`] with `directive` as the fallback filter, e.g.
/// `"warn"` or `"evmrpc=debug"`.
pub fn init_tracing_with(directive: &str) {
    INSTALL.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .try_init();
    });
}
