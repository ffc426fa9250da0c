//! Tracing and logging setup shared by the binary and tests.

/// Initialize process-wide logging.
///
/// `verbose` lowers the default level from `warn` to `debug`; `RUST_LOG`
/// still wins when set. Safe to call multiple times (subsequent calls are
/// no-ops).
pub fn init(verbose: bool) {
    tracing::init(verbose);
}

/// Tracing configuration (filters, layers).
pub mod tracing;

pub use tracing::LogFormat;
