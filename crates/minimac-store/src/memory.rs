//! In-memory implementation of the Nvram trait.
//!
//! This is primarily for testing and bus simulation. It has the same
//! semantics as a real EEPROM region but keeps the bytes in a heap
//! buffer, so "power loss" is modeled by dropping the engine while the
//! medium lives on.

use crate::error::{Result, StoreError};
use crate::traits::Nvram;

/// Default capacity, matching a small EEPROM part.
pub const DEFAULT_CAPACITY: usize = 1024;

/// In-memory persistent medium.
#[derive(Debug, Clone)]
pub struct MemoryNvram {
    bytes: Vec<u8>,
}

impl MemoryNvram {
    /// Create a zero-filled medium with [`DEFAULT_CAPACITY`] bytes.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a zero-filled medium of the given size.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: vec![0u8; capacity],
        }
    }

    /// Raw view of the stored bytes, for tests that inspect or corrupt
    /// the persisted image.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Flip a single byte, modeling bit-rot or a torn write.
    pub fn corrupt_byte(&mut self, addr: usize) {
        if let Some(b) = self.bytes.get_mut(addr) {
            *b ^= 0xff;
        }
    }
}

impl Default for MemoryNvram {
    fn default() -> Self {
        Self::new()
    }
}

impl Nvram for MemoryNvram {
    fn read(&self, addr: usize, buf: &mut [u8]) -> Result<()> {
        let end = addr.checked_add(buf.len()).filter(|&e| e <= self.bytes.len());
        match end {
            Some(end) => {
                buf.copy_from_slice(&self.bytes[addr..end]);
                Ok(())
            }
            None => Err(StoreError::OutOfBounds {
                addr,
                len: buf.len(),
                capacity: self.bytes.len(),
            }),
        }
    }

    fn write(&mut self, addr: usize, bytes: &[u8]) -> Result<()> {
        let end = addr.checked_add(bytes.len()).filter(|&e| e <= self.bytes.len());
        match end {
            Some(end) => {
                self.bytes[addr..end].copy_from_slice(bytes);
                Ok(())
            }
            None => Err(StoreError::OutOfBounds {
                addr,
                len: bytes.len(),
                capacity: self.bytes.len(),
            }),
        }
    }

    fn capacity(&self) -> usize {
        self.bytes.len()
    }
}
