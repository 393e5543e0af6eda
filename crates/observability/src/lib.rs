//! Process-wide logging setup shared by the dashboard binaries and tests.

/// Initialize structured logging for the process.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init() {
    tracing::init();
}

/// Subscriber construction (filters, formatters).
pub mod tracing;
