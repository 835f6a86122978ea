//! File-backed implementation of the Nvram trait.
//!
//! A fixed-size file standing in for a hardware medium on hosts that do
//! have a filesystem (gateways, test rigs). Writes are flushed to stable
//! storage before returning, so a completed `save` survives power loss.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use crate::error::{Result, StoreError};
use crate::traits::Nvram;

/// Persistent medium backed by a fixed-size file.
#[derive(Debug)]
pub struct FileNvram {
    file: File,
    capacity: usize,
}

impl FileNvram {
    /// Open (or create) a medium at `path` with the given capacity.
    ///
    /// A newly created file is zero-filled to `capacity`, matching an
    /// erased EEPROM. An existing file keeps its contents; it is extended
    /// with zeros if shorter than `capacity`.
    pub fn open(path: impl AsRef<Path>, capacity: usize) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(path)?;
        if file.metadata()?.len() < capacity as u64 {
            file.set_len(capacity as u64)?;
        }
        Ok(Self { file, capacity })
    }

    fn check_bounds(&self, addr: usize, len: usize) -> Result<()> {
        match addr.checked_add(len) {
            Some(end) if end <= self.capacity => Ok(()),
            _ => Err(StoreError::OutOfBounds {
                addr,
                len,
                capacity: self.capacity,
            }),
        }
    }
}

impl Nvram for FileNvram {
    fn read(&self, addr: usize, buf: &mut [u8]) -> Result<()> {
        self.check_bounds(addr, buf.len())?;
        let mut file = &self.file;
        file.seek(SeekFrom::Start(addr as u64))?;
        file.read_exact(buf)?;
        Ok(())
    }

    fn write(&mut self, addr: usize, bytes: &[u8]) -> Result<()> {
        self.check_bounds(addr, bytes.len())?;
        self.file.seek(SeekFrom::Start(addr as u64))?;
        self.file.write_all(bytes)?;
        self.file.sync_data()?;
        Ok(())
    }

    fn capacity(&self) -> usize {
        self.capacity
    }
}
