//! Keyed-hash primitive for Mini-MAC.
//!
//! The engine treats the primitive as an opaque keyed pseudorandom
//! function: 16-byte key in, 16-byte digest out. [`HmacMd5`] is the
//! shipped implementation; anything implementing [`KeyedHash`] can be
//! swapped in without touching the engine.

use hmac::{Hmac, Mac};
use md5::Md5;

use crate::types::{ChannelKey, DIGEST_LEN};

/// A deterministic keyed pseudorandom function.
///
/// Only the first [`TAG_LEN`](crate::types::TAG_LEN) bytes of the digest
/// are ever transmitted; the rest is discarded at truncation.
pub trait KeyedHash {
    /// Compute the keyed digest of `message` under `key`.
    fn digest(&self, key: &ChannelKey, message: &[u8]) -> [u8; DIGEST_LEN];
}

/// HMAC-MD5, the primitive used by Mini-MAC bus nodes.
///
/// MD5's digest width matches the protocol's 16-byte digest exactly.
/// Collision resistance of the underlying hash is not load-bearing here;
/// the primitive is used strictly as a keyed PRF.
#[derive(Debug, Clone, Copy, Default)]
pub struct HmacMd5;

impl KeyedHash for HmacMd5 {
    fn digest(&self, key: &ChannelKey, message: &[u8]) -> [u8; DIGEST_LEN] {
        let mut mac = Hmac::<Md5>::new_from_slice(key.as_bytes())
            .expect("HMAC accepts keys of any length");
        mac.update(message);
        let output = mac.finalize().into_bytes();

        let mut digest = [0u8; DIGEST_LEN];
        digest.copy_from_slice(&output);
        digest
    }
}
