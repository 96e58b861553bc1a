//! Logging hooks.
//!
//! With the `tracing` feature enabled these macros forward to the `tracing` crate. Without it
//! they expand to nothing.
//!
//! ```bash
//! cargo test --features tracing
//! ```

#![allow(unused_macros)]

/// Trace-level event, emitted for every link and unlink.
#[cfg(feature = "tracing")]
macro_rules! trace_log {
    ($($arg:tt)*) => { ::tracing::trace!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

/// Debug-level event, emitted for map-level decisions such as rejected inserts.
#[cfg(feature = "tracing")]
macro_rules! debug_log {
    ($($arg:tt)*) => { ::tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}
