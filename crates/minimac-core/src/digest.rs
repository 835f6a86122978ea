//! Authentication-input assembly.
//!
//! The digest input binds every tag to the channel's entire accumulated
//! state: the monotonic counter, the channel identifier, every retained
//! history entry, and the current payload. Sender and receiver assemble
//! the identical input from their own state; nothing but payload and tag
//! crosses the wire.

use crate::crypto::KeyedHash;
use crate::history::HistoryLedger;
use crate::types::{ChannelId, ChannelKey, Tag, AUTH_INPUT_MAX};

/// Allocate a scratch buffer sized for the worst-case input.
///
/// One buffer is reused across every digest computation; assembly never
/// allocates once the engine is constructed.
pub fn scratch_buffer() -> Vec<u8> {
    Vec::with_capacity(AUTH_INPUT_MAX)
}

/// Fill `scratch` with the authentication input.
///
/// Layout: 8-byte big-endian counter, 2-byte big-endian channel id, each
/// history entry's stored bytes in ledger order, then the payload.
pub fn assemble_auth_input(
    scratch: &mut Vec<u8>,
    counter: u64,
    channel: ChannelId,
    history: &HistoryLedger,
    payload: &[u8],
) {
    scratch.clear();
    scratch.extend_from_slice(&counter.to_be_bytes());
    scratch.extend_from_slice(&channel.to_be_bytes());
    for entry in history.iter() {
        scratch.extend_from_slice(entry.as_bytes());
    }
    scratch.extend_from_slice(payload);
    debug_assert_eq!(scratch.len(), 8 + 2 + history.byte_len() + payload.len());
}

/// Digest the assembled input and truncate to the transmitted tag.
pub fn compute_tag<H: KeyedHash>(prf: &H, key: &ChannelKey, input: &[u8]) -> Tag {
    let digest = prf.digest(key, input);
    Tag::from_digest(&digest)
}
