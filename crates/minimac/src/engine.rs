//! The authentication engine: sign and verify for one protected channel.
//!
//! One [`MiniMac`] instance owns the full per-channel state: identity,
//! key, monotonic counter, and history ledger. Sender and receiver hold
//! independent instances that stay in lock-step because both advance
//! their state by the identical discipline on every successful
//! operation. Nothing but payload and tag ever crosses the wire.

use minimac_core::{
    assemble_auth_input, compute_tag, scratch_buffer, ChannelId, ChannelKey, HistoryEntry,
    HistoryLedger, HmacMd5, KeyedHash, Tag,
};
use minimac_store::{Nvram, Snapshot, SnapshotStore, StoreError};

use crate::error::Result;
use crate::frame::SignedFrame;

/// Configuration for the engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Consecutive verification failures before desynchronization is
    /// suspected. The resynchronization handshake itself is up to the
    /// caller; the engine only raises the flag.
    pub desync_threshold: u32,
    /// Base address of the snapshot region in the persistent medium.
    pub base_addr: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            desync_threshold: 3,
            base_addr: 0,
        }
    }
}

/// Outcome of a verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Tag matched; counter and ledger advanced and were persisted.
    Accepted,
    /// Tag mismatch; state untouched.
    Rejected,
    /// Tag mismatch, and enough have accumulated in a row that the
    /// endpoints have likely diverged. All further verifications will
    /// fail until the link is resynchronized out of band.
    DesyncSuspected {
        /// Mismatches observed since the last accepted frame.
        consecutive_failures: u32,
    },
}

impl Verdict {
    /// Whether the frame was accepted.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted)
    }

    /// Whether the frame was rejected (desync suspicion included).
    pub fn is_rejected(&self) -> bool {
        !self.is_accepted()
    }
}

/// The Mini-MAC engine for a single channel.
///
/// Single-threaded and non-reentrant: sign and verify read-modify-write
/// the counter and ledger, so concurrent use requires external mutual
/// exclusion. Independent channels are independent instances.
pub struct MiniMac<N: Nvram, H: KeyedHash = HmacMd5> {
    /// The protected channel's identifier.
    channel_id: ChannelId,
    /// The channel's shared secret key.
    key: ChannelKey,
    /// Strictly monotonic message counter. Never transmitted.
    counter: u64,
    /// Bounded FIFO of recently authenticated payloads.
    history: HistoryLedger,
    /// Reusable digest-input buffer, pre-sized to the worst case.
    scratch: Vec<u8>,
    /// Tag mismatches since the last accepted frame.
    consecutive_failures: u32,
    /// The persistent snapshot region.
    store: SnapshotStore<N>,
    /// The keyed-hash primitive.
    prf: H,
    /// Engine configuration.
    config: EngineConfig,
}

impl<N: Nvram> MiniMac<N> {
    /// Initialize an engine with the default HMAC-MD5 primitive.
    ///
    /// Restores {counter, ledger} from the medium; an absent or corrupt
    /// snapshot silently becomes a fresh zero state, persisted before
    /// this returns. Only medium I/O failures surface as errors.
    pub fn init(channel_id: ChannelId, key: ChannelKey, nvram: N) -> Result<Self> {
        Self::init_with(channel_id, key, nvram, HmacMd5, EngineConfig::default())
    }
}

impl<N: Nvram, H: KeyedHash> MiniMac<N, H> {
    /// Initialize with an explicit primitive and configuration.
    pub fn init_with(
        channel_id: ChannelId,
        key: ChannelKey,
        nvram: N,
        prf: H,
        config: EngineConfig,
    ) -> Result<Self> {
        let store = SnapshotStore::new(nvram, config.base_addr);

        let restored = match store.load() {
            Ok(snapshot) => snapshot,
            Err(StoreError::Corrupt(reason)) => {
                tracing::warn!(channel = %channel_id, %reason, "corrupt snapshot, reinitializing");
                None
            }
            Err(e) => return Err(e.into()),
        };

        let mut engine = Self {
            channel_id,
            key,
            counter: 0,
            history: HistoryLedger::new(),
            scratch: scratch_buffer(),
            consecutive_failures: 0,
            store,
            prf,
            config,
        };

        match restored {
            Some(snapshot) => {
                engine.counter = snapshot.counter;
                engine.history = snapshot.history;
                tracing::debug!(
                    channel = %engine.channel_id,
                    counter = engine.counter,
                    history = engine.history.len(),
                    "restored persisted state"
                );
            }
            None => {
                tracing::debug!(channel = %engine.channel_id, "no valid snapshot, persisting fresh state");
                engine.persist()?;
            }
        }

        Ok(engine)
    }

    /// Sign a payload, producing the frame to transmit.
    ///
    /// Advances the counter, appends the un-tagged payload to the
    /// history ledger, and persists the new state before returning.
    /// Payloads over [`MAX_PAYLOAD`](minimac_core::MAX_PAYLOAD) bytes
    /// are rejected before any state is touched.
    pub fn sign(&mut self, payload: &[u8]) -> Result<SignedFrame> {
        let entry = HistoryEntry::new(payload)?;

        let tag = self.tag_for(payload);
        let frame = SignedFrame::new(payload, tag);

        self.advance(entry)?;
        tracing::trace!(channel = %self.channel_id, counter = self.counter, "signed payload");

        Ok(frame)
    }

    /// Verify a received payload against its tag.
    ///
    /// The tag is recomputed from this engine's own counter and history;
    /// no freshness information is taken from the wire. On a match the
    /// state advances exactly as in [`sign`](Self::sign). On a mismatch
    /// nothing is mutated or persisted, which is what makes a replayed
    /// frame fail forever once either side has moved on.
    pub fn verify(&mut self, payload: &[u8], tag: Tag) -> Result<Verdict> {
        let entry = HistoryEntry::new(payload)?;

        let expected = self.tag_for(payload);
        if expected != tag {
            self.consecutive_failures = self.consecutive_failures.saturating_add(1);
            tracing::debug!(
                channel = %self.channel_id,
                consecutive_failures = self.consecutive_failures,
                "tag mismatch"
            );

            if self.consecutive_failures >= self.config.desync_threshold {
                tracing::warn!(
                    channel = %self.channel_id,
                    consecutive_failures = self.consecutive_failures,
                    "repeated tag mismatches, desynchronization suspected"
                );
                return Ok(Verdict::DesyncSuspected {
                    consecutive_failures: self.consecutive_failures,
                });
            }
            return Ok(Verdict::Rejected);
        }

        self.consecutive_failures = 0;
        self.advance(entry)?;
        tracing::trace!(channel = %self.channel_id, counter = self.counter, "verified payload");

        Ok(Verdict::Accepted)
    }

    /// Compute the tag for `payload` against the current state.
    fn tag_for(&mut self, payload: &[u8]) -> Tag {
        assemble_auth_input(
            &mut self.scratch,
            self.counter,
            self.channel_id,
            &self.history,
            payload,
        );
        compute_tag(&self.prf, &self.key, &self.scratch)
    }

    /// Append to the ledger, bump the counter, persist.
    fn advance(&mut self, entry: HistoryEntry) -> Result<()> {
        self.history.push(entry);
        self.counter += 1;
        self.persist()
    }

    fn persist(&mut self) -> Result<()> {
        let snapshot = Snapshot {
            counter: self.counter,
            history: self.history,
        };
        self.store.save(&snapshot)?;
        Ok(())
    }

    /// The protected channel's identifier.
    pub fn channel_id(&self) -> ChannelId {
        self.channel_id
    }

    /// The monotonic message counter. Never transmitted; diagnostic and
    /// resynchronization hooks only.
    pub fn counter(&self) -> u64 {
        self.counter
    }

    /// Number of payloads currently retained in the history ledger.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Tag mismatches observed since the last accepted frame.
    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    /// Borrow the persistent medium.
    pub fn nvram(&self) -> &N {
        self.store.nvram()
    }

    /// Tear down the engine and release the medium, as a power cycle
    /// would.
    pub fn into_nvram(self) -> N {
        self.store.into_nvram()
    }
}
