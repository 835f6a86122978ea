//! # Mini-MAC Store
//!
//! Persistent-state management for the Mini-MAC engine: the abstract
//! byte-addressable medium, concrete backends, and the byte-exact
//! snapshot codec.
//!
//! The engine's replay protection only works if {counter, ledger}
//! survive power loss, so every state-changing operation writes the full
//! snapshot image synchronously. This crate owns that image's layout;
//! see [`snapshot`] for the exact bytes.

pub mod error;
pub mod file;
pub mod memory;
pub mod snapshot;
pub mod traits;

pub use error::{Result, StoreError};
pub use file::FileNvram;
pub use memory::MemoryNvram;
pub use snapshot::{Snapshot, SnapshotStore, MAGIC, SNAPSHOT_LEN};
pub use traits::Nvram;
