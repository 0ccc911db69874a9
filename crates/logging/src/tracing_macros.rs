//! crates/logging/src/tracing_macros.rs
//! Convenience macros for generator tracing targets.
//!
//! These wrap the standard tracing macros with a fixed `dlog::*` target per
//! generator stage, so `DLOG_LOG=dlog::resolve=debug` isolates one stage.

/// Emit a configuration-loading event.
///
/// # Example
/// ```ignore
/// trace_config!("loaded {}", path.display());
/// ```
#[macro_export]
macro_rules! trace_config {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "dlog::config", $($arg)*);
    };
}

/// Emit a threshold resolution event.
///
/// # Example
/// ```ignore
/// trace_resolve!(topic = "lock", threshold = 2, "resolved");
/// ```
#[macro_export]
macro_rules! trace_resolve {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "dlog::resolve", $($arg)*);
    };
}

/// Emit a per-level macro emission event.
///
/// # Example
/// ```ignore
/// trace_emit!("emitting {}", name);
/// ```
#[macro_export]
macro_rules! trace_emit {
    ($($arg:tt)*) => {
        ::tracing::trace!(target: "dlog::emit", $($arg)*);
    };
}

/// Emit a document assembly event.
///
/// # Example
/// ```ignore
/// trace_assemble!(section = "index", "assembled section");
/// ```
#[macro_export]
macro_rules! trace_assemble {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "dlog::assemble", $($arg)*);
    };
}

/// Emit an output write event.
///
/// # Example
/// ```ignore
/// trace_write!("wrote {} bytes", len);
/// ```
#[macro_export]
macro_rules! trace_write {
    ($($arg:tt)*) => {
        ::tracing::info!(target: "dlog::write", $($arg)*);
    };
}
