//! # Mini-MAC Core
//!
//! Pure primitives for the Mini-MAC authentication scheme: channel
//! identity, the bounded history ledger, and digest-input assembly.
//!
//! This crate contains no I/O and no persistence. It is pure computation
//! over fixed-size protocol data.
//!
//! ## Key Types
//!
//! - [`ChannelId`] / [`ChannelKey`] - The protected channel's identity
//! - [`Tag`] - Truncated keyed digest appended to each payload
//! - [`HistoryLedger`] - Bounded FIFO of recently authenticated payloads
//! - [`KeyedHash`] - The opaque keyed-PRF seam ([`HmacMd5`] by default)
//!
//! ## Digest Input
//!
//! Every tag authenticates the channel's accumulated state, not just the
//! payload. See [`digest`] for the exact input layout.

pub mod crypto;
pub mod digest;
pub mod error;
pub mod history;
pub mod types;

pub use crypto::{HmacMd5, KeyedHash};
pub use digest::{assemble_auth_input, compute_tag, scratch_buffer};
pub use error::CoreError;
pub use history::{HistoryEntry, HistoryLedger};
pub use types::{
    ChannelId, ChannelKey, Tag, AUTH_INPUT_MAX, DIGEST_LEN, HISTORY_CAPACITY, KEY_LEN,
    MAX_PAYLOAD, TAG_LEN,
};
