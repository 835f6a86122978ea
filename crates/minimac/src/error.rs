//! Error types for the authentication engine.

use minimac_core::CoreError;
use minimac_store::StoreError;
use thiserror::Error;

/// Errors that can occur during engine operations.
///
/// A tag mismatch is not an error: verification outcomes are reported
/// through [`Verdict`](crate::Verdict). Errors are reserved for rejected
/// preconditions and medium failures.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Payload or frame violates a length bound.
    #[error("payload error: {0}")]
    Payload(#[from] CoreError),

    /// The persistent medium failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
