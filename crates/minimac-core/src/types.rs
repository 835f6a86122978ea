//! Strong type definitions for Mini-MAC.
//!
//! All protocol quantities are newtypes to prevent misuse at compile time.

use std::fmt;

use subtle::ConstantTimeEq;

use crate::error::CoreError;

/// Length of a channel key in bytes (128-bit group key).
pub const KEY_LEN: usize = 16;

/// Length of a transmitted authentication tag in bytes.
pub const TAG_LEN: usize = 4;

/// Length of the keyed digest the tag is truncated from.
pub const DIGEST_LEN: usize = 16;

/// Maximum number of payloads retained in the history ledger (L).
pub const HISTORY_CAPACITY: usize = 5;

/// Maximum payload length in bytes (M, the CAN data field).
pub const MAX_PAYLOAD: usize = 8;

/// Worst-case authentication input size: counter, channel id, a full
/// ledger of maximum-length entries, and the current payload.
pub const AUTH_INPUT_MAX: usize = 8 + 2 + HISTORY_CAPACITY * MAX_PAYLOAD + MAX_PAYLOAD;

/// The identifier of a protected message channel (e.g. a CAN message ID).
///
/// Set once at engine initialization and immutable thereafter.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelId(pub u16);

impl ChannelId {
    /// Create a channel identifier.
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw identifier.
    pub const fn as_u16(&self) -> u16 {
        self.0
    }

    /// Big-endian wire encoding, as mixed into the digest input.
    pub const fn to_be_bytes(&self) -> [u8; 2] {
        self.0.to_be_bytes()
    }
}

impl fmt::Debug for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Channel(0x{:04x})", self.0)
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04x}", self.0)
    }
}

impl From<u16> for ChannelId {
    fn from(id: u16) -> Self {
        Self(id)
    }
}

/// A 16-byte channel secret key.
///
/// Shared by every node on the channel. `Debug` is redacted so key
/// material never reaches logs.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct ChannelKey([u8; KEY_LEN]);

impl ChannelKey {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }

    /// Generate a new random key.
    pub fn generate() -> Self {
        use rand::RngCore;
        let mut bytes = [0u8; KEY_LEN];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes)
    }
}

impl fmt::Debug for ChannelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChannelKey(..)")
    }
}

impl From<[u8; KEY_LEN]> for ChannelKey {
    fn from(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }
}

/// A 4-byte authentication tag: the truncated keyed digest appended to a
/// payload on the wire.
///
/// Equality is constant-time so a tag comparison never leaks how many
/// leading bytes matched.
#[derive(Clone, Copy)]
pub struct Tag([u8; TAG_LEN]);

impl Tag {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; TAG_LEN]) -> Self {
        Self(bytes)
    }

    /// Truncate a full keyed digest to its transmitted tag.
    pub fn from_digest(digest: &[u8; DIGEST_LEN]) -> Self {
        let mut bytes = [0u8; TAG_LEN];
        bytes.copy_from_slice(&digest[..TAG_LEN]);
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; TAG_LEN] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        self.0.ct_eq(&other.0).into()
    }
}

impl Eq for Tag {}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag({})", self.to_hex())
    }
}

impl AsRef<[u8]> for Tag {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; TAG_LEN]> for Tag {
    fn from(bytes: [u8; TAG_LEN]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for Tag {
    type Error = CoreError;

    fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; TAG_LEN] = slice
            .try_into()
            .map_err(|_| CoreError::InvalidTagLength { len: slice.len() })?;
        Ok(Self(arr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_id_be_encoding() {
        let id = ChannelId::new(0x0123);
        assert_eq!(id.to_be_bytes(), [0x01, 0x23]);
    }

    #[test]
    fn test_channel_key_debug_redacted() {
        let key = ChannelKey::from_bytes([0x42; KEY_LEN]);
        let debug = format!("{:?}", key);
        assert_eq!(debug, "ChannelKey(..)");
        assert!(!debug.contains("42"));
    }

    #[test]
    fn test_channel_key_generate_unique() {
        let k1 = ChannelKey::generate();
        let k2 = ChannelKey::generate();
        assert_ne!(k1, k2);
    }

    #[test]
    fn test_tag_from_digest_truncates() {
        let mut digest = [0u8; DIGEST_LEN];
        for (i, b) in digest.iter_mut().enumerate() {
            *b = i as u8;
        }
        let tag = Tag::from_digest(&digest);
        assert_eq!(tag.as_bytes(), &[0, 1, 2, 3]);
    }

    #[test]
    fn test_tag_equality() {
        let a = Tag::from_bytes([1, 2, 3, 4]);
        let b = Tag::from_bytes([1, 2, 3, 4]);
        let c = Tag::from_bytes([1, 2, 3, 5]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_tag_try_from_slice() {
        let tag = Tag::try_from(&[1u8, 2, 3, 4][..]).unwrap();
        assert_eq!(tag.as_bytes(), &[1, 2, 3, 4]);

        let short = Tag::try_from(&[1u8, 2][..]);
        assert!(matches!(
            short,
            Err(CoreError::InvalidTagLength { len: 2 })
        ));
    }

    #[test]
    fn test_tag_hex() {
        let tag = Tag::from_bytes([0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(tag.to_hex(), "deadbeef");
    }
}
