//! Script vectors for deterministic cross-implementation verification.
//!
//! Each vector drives a known payload script through a fresh engine with
//! a fixed key. Every implementation of the scheme must emit the same
//! tag sequence for the same script.

use minimac::store::MemoryNvram;
use minimac::{ChannelId, ChannelKey, MiniMac};

/// A deterministic signing script.
#[derive(Debug, Clone)]
pub struct ScriptVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// The channel's shared key.
    pub key: [u8; 16],
    /// The protected channel id.
    pub channel: u16,
    /// Payloads signed in order from a fresh state.
    pub script: &'static [&'static [u8]],
    /// Expected tag sequence (hex), one per script step.
    ///
    /// Empty until pinned against a reference run; verification then
    /// only checks internal consistency.
    pub expected_tags: &'static [&'static str],
}

/// Get all script vectors.
pub fn all_vectors() -> Vec<ScriptVector> {
    vec![
        ScriptVector {
            name: "two short payloads on channel 0x123",
            key: [0x2b; 16],
            channel: 0x0123,
            script: &[&[0x01, 0x02], &[0x03, 0x04]],
            expected_tags: &[],
        },
        ScriptVector {
            name: "empty and maximum payloads",
            key: [0x00; 16],
            channel: 0x0001,
            script: &[&[], &[0xff; 8], &[]],
            expected_tags: &[],
        },
        ScriptVector {
            name: "ledger wraps past capacity",
            key: [0x7e; 16],
            channel: 0x07ff,
            script: &[&[0], &[1], &[2], &[3], &[4], &[5], &[6]],
            expected_tags: &[],
        },
        ScriptVector {
            name: "repeated payload, distinct tags",
            key: [0xa5; 16],
            channel: 0x0123,
            script: &[&[0x42], &[0x42], &[0x42]],
            expected_tags: &[],
        },
    ]
}

/// Run a vector's script from a fresh state, returning the tags in hex.
pub fn run_vector(vector: &ScriptVector) -> Vec<String> {
    let mut engine = MiniMac::init(
        ChannelId::new(vector.channel),
        ChannelKey::from_bytes(vector.key),
        MemoryNvram::new(),
    )
    .expect("memory medium cannot fail");

    vector
        .script
        .iter()
        .map(|payload| {
            engine
                .sign(payload)
                .expect("script payloads are within bounds")
                .tag()
                .to_hex()
        })
        .collect()
}

/// Verify all vectors against their pinned tags.
///
/// Returns `(name, matches, tags)` per vector; vectors with no pinned
/// tags report what they produced.
pub fn verify_all_vectors() -> Vec<(String, bool, Vec<String>)> {
    all_vectors()
        .iter()
        .map(|v| {
            let tags = run_vector(v);
            let matches = v.expected_tags.is_empty()
                || (v.expected_tags.len() == tags.len()
                    && v.expected_tags.iter().zip(&tags).all(|(e, t)| e == t));
            (v.name.to_string(), matches, tags)
        })
        .collect()
}
