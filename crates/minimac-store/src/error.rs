//! Error types for the store module.

use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Access outside the persistent medium's address range.
    #[error("access of {len} bytes at address {addr} exceeds capacity {capacity}")]
    OutOfBounds {
        addr: usize,
        len: usize,
        capacity: usize,
    },

    /// A snapshot carried the expected signature but its fields are
    /// structurally impossible. The engine recovers by reinitializing.
    #[error("corrupt snapshot: {0}")]
    Corrupt(String),

    /// I/O error from a file-backed medium.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
