//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use minimac::store::MemoryNvram;
use minimac::{ChannelId, ChannelKey, MiniMac, SignedFrame, Verdict};

/// A test fixture holding one channel's shared identity.
pub struct TestFixture {
    pub key: ChannelKey,
    pub channel: ChannelId,
}

impl TestFixture {
    /// Create a fixture with a random key on channel 0x0123.
    pub fn new() -> Self {
        Self {
            key: ChannelKey::generate(),
            channel: ChannelId::new(0x0123),
        }
    }

    /// Create with a deterministic key.
    pub fn with_key(key: [u8; 16], channel: u16) -> Self {
        Self {
            key: ChannelKey::from_bytes(key),
            channel: ChannelId::new(channel),
        }
    }

    /// Spin up an engine for this channel over a fresh medium.
    pub fn engine(&self) -> MiniMac<MemoryNvram> {
        MiniMac::init(self.channel, self.key, MemoryNvram::new())
            .expect("memory medium cannot fail")
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// A sender/receiver pair sharing a channel, each on its own medium.
pub struct LinkFixture {
    pub sender: MiniMac<MemoryNvram>,
    pub receiver: MiniMac<MemoryNvram>,
}

impl LinkFixture {
    /// Create a fresh lock-step pair from a fixture.
    pub fn new(fixture: &TestFixture) -> Self {
        Self {
            sender: fixture.engine(),
            receiver: fixture.engine(),
        }
    }

    /// Sign on the sender, deliver, verify on the receiver.
    pub fn transmit(&mut self, payload: &[u8]) -> Verdict {
        let frame = self.sender.sign(payload).expect("payload within bounds");
        let (payload, tag) =
            SignedFrame::split(frame.as_bytes()).expect("frame is well-formed");
        self.receiver.verify(payload, tag).expect("memory medium cannot fail")
    }
}

/// Create fixtures for `count` independent channels.
pub fn multi_channel_fixtures(count: usize) -> Vec<TestFixture> {
    (0..count)
        .map(|i| {
            let mut key = [0u8; 16];
            key[0] = i as u8;
            TestFixture::with_key(key, 0x0100 + i as u16)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_transmits_in_lockstep() {
        let fixture = TestFixture::new();
        let mut link = LinkFixture::new(&fixture);

        for i in 0u8..10 {
            assert!(link.transmit(&[i]).is_accepted());
        }
        assert_eq!(link.sender.counter(), 10);
        assert_eq!(link.receiver.counter(), 10);
    }

    #[test]
    fn test_multi_channel_fixtures_are_distinct() {
        let fixtures = multi_channel_fixtures(3);
        assert_ne!(fixtures[0].key, fixtures[1].key);
        assert_ne!(fixtures[1].channel, fixtures[2].channel);
    }

    #[test]
    fn test_cross_channel_frames_rejected() {
        let fixtures = multi_channel_fixtures(2);
        let mut a = LinkFixture::new(&fixtures[0]);
        let mut b = LinkFixture::new(&fixtures[1]);

        let frame = a.sender.sign(&[0x01]).unwrap();
        let verdict = b.receiver.verify(frame.payload(), frame.tag()).unwrap();
        assert!(verdict.is_rejected());
    }
}
