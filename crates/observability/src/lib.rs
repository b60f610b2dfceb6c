//! Tracing/logging setup shared by the binaries.
//!
//! Standard output carries the inventory document, so every diagnostic is
//! written to standard error.

/// Initialize process-wide tracing.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Tracing configuration (filters, layers).
pub mod tracing;
