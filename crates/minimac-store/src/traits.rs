//! Nvram trait: the abstract interface to the persistent byte medium.
//!
//! This trait allows the snapshot store to be medium-agnostic.
//! Implementations include an in-memory array (for tests and simulation)
//! and a fixed-size file (for host-side deployments).

use crate::error::Result;

/// An addressable persistent byte array with get/put semantics.
///
/// This is the contract an EEPROM, flash page, or battery-backed RAM
/// region presents to the engine. The medium is single-writer: one engine
/// instance owns its region, and concurrent external writers are out of
/// scope.
///
/// # Design Notes
///
/// - **Blocking, bounded latency**: `read` and `write` complete before
///   returning; there is no cooperative suspension.
/// - **Bounds checked**: any access past `capacity` fails with
///   [`OutOfBounds`](crate::StoreError::OutOfBounds) and leaves the
///   medium untouched.
pub trait Nvram {
    /// Read `buf.len()` bytes starting at `addr`.
    fn read(&self, addr: usize, buf: &mut [u8]) -> Result<()>;

    /// Write `bytes` starting at `addr`, durably.
    ///
    /// When `write` returns, the bytes must survive power loss as far as
    /// the medium is able to guarantee.
    fn write(&mut self, addr: usize, bytes: &[u8]) -> Result<()>;

    /// Total addressable size in bytes.
    fn capacity(&self) -> usize;
}
