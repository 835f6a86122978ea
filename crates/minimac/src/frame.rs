//! Signed frame: payload with its authentication tag appended.
//!
//! This is the unit the transport layer puts on the bus. The frame
//! carries no counter and no history; everything else needed for
//! verification lives in both endpoints' state.

use std::fmt;

use minimac_core::{CoreError, Tag, MAX_PAYLOAD, TAG_LEN};

/// Maximum frame size on the wire: payload plus tag.
pub const FRAME_MAX: usize = MAX_PAYLOAD + TAG_LEN;

/// A payload with its tag, in transmission order.
///
/// Stored inline; constructing or copying a frame never allocates.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct SignedFrame {
    buf: [u8; FRAME_MAX],
    len: u8,
}

impl SignedFrame {
    /// Assemble a frame from an already-validated payload and its tag.
    pub(crate) fn new(payload: &[u8], tag: Tag) -> Self {
        debug_assert!(payload.len() <= MAX_PAYLOAD);
        let mut buf = [0u8; FRAME_MAX];
        buf[..payload.len()].copy_from_slice(payload);
        buf[payload.len()..payload.len() + TAG_LEN].copy_from_slice(tag.as_bytes());
        Self {
            buf,
            len: (payload.len() + TAG_LEN) as u8,
        }
    }

    /// The transmitted bytes: payload followed by tag.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len as usize]
    }

    /// Total frame length, `payload.len() + TAG_LEN`.
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// A frame always carries at least a tag.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The un-tagged payload bytes.
    pub fn payload(&self) -> &[u8] {
        &self.buf[..self.len as usize - TAG_LEN]
    }

    /// The appended authentication tag.
    pub fn tag(&self) -> Tag {
        let start = self.len as usize - TAG_LEN;
        let mut bytes = [0u8; TAG_LEN];
        bytes.copy_from_slice(&self.buf[start..self.len as usize]);
        Tag::from_bytes(bytes)
    }

    /// Split received bytes into payload and tag.
    ///
    /// Fails closed on frames too short to carry a tag or whose payload
    /// part exceeds [`MAX_PAYLOAD`].
    pub fn split(bytes: &[u8]) -> Result<(&[u8], Tag), CoreError> {
        if bytes.len() < TAG_LEN {
            return Err(CoreError::TruncatedFrame { len: bytes.len() });
        }
        let payload_len = bytes.len() - TAG_LEN;
        if payload_len > MAX_PAYLOAD {
            return Err(CoreError::PayloadTooLarge {
                len: payload_len,
                max: MAX_PAYLOAD,
            });
        }
        let tag = Tag::try_from(&bytes[payload_len..])?;
        Ok((&bytes[..payload_len], tag))
    }
}

impl fmt::Debug for SignedFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SignedFrame(payload={}, tag={})",
            hex::encode(self.payload()),
            self.tag().to_hex()
        )
    }
}

impl AsRef<[u8]> for SignedFrame {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}
