//! Tracing/logging setup shared by whatever shell hosts the catalog.

/// Initialize process-wide logging with the format named by
/// `STOCK_CONTROL_LOG_FORMAT` (JSON when unset or unrecognized).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init_with(tracing::LogFormat::from_env());
}

/// Tracing configuration (filters, output format).
pub mod tracing;

pub use self::tracing::{LogFormat, init_with};
