//! Errors reported by map lookups.

use thiserror::Error;

/// The error type for fallible map lookups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// No pair holds the requested key on the given side.
    #[error("key not found on the {side} side")]
    KeyNotFound {
        /// The side that was searched, `"left"` or `"right"`.
        side: &'static str,
    },
}
