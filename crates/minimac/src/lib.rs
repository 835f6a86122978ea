//! # Mini-MAC
//!
//! A lightweight message-authentication engine for resource-constrained
//! bus nodes (CAN controllers and the like) that must authenticate
//! short, fixed-size messages and resist replay without a full MAC
//! protocol stack.
//!
//! ## How It Works
//!
//! Every tag is a truncated keyed digest over the channel's accumulated
//! state: a monotonic counter, the channel identifier, a bounded FIFO of
//! recently authenticated payloads, and the current payload. Neither the
//! counter nor the history is transmitted; sender and receiver stay in
//! lock-step by advancing identically on every successful sign or
//! verify. A replayed frame mismatches as soon as either side has moved
//! past the point of capture.
//!
//! State survives power loss: every state-changing operation writes a
//! byte-exact snapshot to the persistent medium before returning.
//!
//! ## Usage
//!
//! ```rust
//! use minimac::store::MemoryNvram;
//! use minimac::{ChannelId, ChannelKey, MiniMac, SignedFrame};
//!
//! fn main() -> minimac::Result<()> {
//!     let key = ChannelKey::from_bytes([0x2b; 16]);
//!     let channel = ChannelId::new(0x123);
//!
//!     let mut sender = MiniMac::init(channel, key, MemoryNvram::new())?;
//!     let mut receiver = MiniMac::init(channel, key, MemoryNvram::new())?;
//!
//!     let frame = sender.sign(&[0x01, 0x02])?;
//!
//!     // ...frame.as_bytes() crosses the bus...
//!     let (payload, tag) = SignedFrame::split(frame.as_bytes())?;
//!     assert!(receiver.verify(payload, tag)?.is_accepted());
//!
//!     // Replaying the same frame now fails: the receiver has moved on.
//!     assert!(receiver.verify(payload, tag)?.is_rejected());
//!     Ok(())
//! }
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `minimac::core` - Core primitives (ledger, digest input, key types)
//! - `minimac::store` - Persistent medium abstraction and snapshot codec

pub mod engine;
pub mod error;
pub mod frame;

// Re-export component crates
pub use minimac_core as core;
pub use minimac_store as store;

// Re-export main types for convenience
pub use engine::{EngineConfig, MiniMac, Verdict};
pub use error::{EngineError, Result};
pub use frame::{SignedFrame, FRAME_MAX};

// Re-export commonly used core types
pub use minimac_core::{
    ChannelId, ChannelKey, HistoryLedger, HmacMd5, KeyedHash, Tag, HISTORY_CAPACITY, KEY_LEN,
    MAX_PAYLOAD, TAG_LEN,
};
