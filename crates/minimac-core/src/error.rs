//! Error types for Mini-MAC core primitives.

use thiserror::Error;

/// Core errors for payload and tag handling.
///
/// Capacity violations are rejected preconditions: the operation aborts
/// before any buffer write or state mutation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("payload of {len} bytes exceeds maximum of {max}")]
    PayloadTooLarge { len: usize, max: usize },

    #[error("tag slice of {len} bytes is not a 4-byte tag")]
    InvalidTagLength { len: usize },

    #[error("frame of {len} bytes is too short to carry a tag")]
    TruncatedFrame { len: usize },
}
