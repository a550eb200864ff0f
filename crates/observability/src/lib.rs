//! Logging setup shared by every binary.

/// Initialize process-wide logging at `info`, human-readable.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init_with("info", false);
}

/// Tracing configuration (filters, formatting).
pub mod tracing;

pub use tracing::init_with;
