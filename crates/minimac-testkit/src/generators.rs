//! Proptest generators for property-based testing.

use proptest::prelude::*;

use minimac_core::{
    ChannelId, ChannelKey, HistoryEntry, HistoryLedger, Tag, HISTORY_CAPACITY, KEY_LEN,
    MAX_PAYLOAD, TAG_LEN,
};
use minimac_store::Snapshot;

/// Generate a random channel key.
pub fn channel_key() -> impl Strategy<Value = ChannelKey> {
    any::<[u8; KEY_LEN]>().prop_map(ChannelKey::from_bytes)
}

/// Generate a random channel identifier.
pub fn channel_id() -> impl Strategy<Value = ChannelId> {
    any::<u16>().prop_map(ChannelId::new)
}

/// Generate a random tag.
pub fn tag() -> impl Strategy<Value = Tag> {
    any::<[u8; TAG_LEN]>().prop_map(Tag::from_bytes)
}

/// Generate a valid payload (0 to [`MAX_PAYLOAD`] bytes).
pub fn payload() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=MAX_PAYLOAD)
}

/// Generate a history entry.
pub fn history_entry() -> impl Strategy<Value = HistoryEntry> {
    payload().prop_map(|p| HistoryEntry::new(&p).expect("generated payload is within bounds"))
}

/// Generate a ledger holding 0 to [`HISTORY_CAPACITY`] entries.
pub fn ledger() -> impl Strategy<Value = HistoryLedger> {
    prop::collection::vec(history_entry(), 0..=HISTORY_CAPACITY).prop_map(|entries| {
        let mut ledger = HistoryLedger::new();
        for entry in entries {
            ledger.push(entry);
        }
        ledger
    })
}

/// Generate a snapshot with an arbitrary counter and ledger.
pub fn snapshot() -> impl Strategy<Value = Snapshot> {
    (any::<u64>(), ledger()).prop_map(|(counter, history)| Snapshot { counter, history })
}

/// A sequence of valid payloads driven through a link in order.
#[derive(Debug, Clone)]
pub struct SessionScript {
    pub payloads: Vec<Vec<u8>>,
}

impl Arbitrary for SessionScript {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        prop::collection::vec(payload(), 1..=32)
            .prop_map(|payloads| SessionScript { payloads })
            .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn test_payloads_respect_bounds(p in payload()) {
            prop_assert!(p.len() <= MAX_PAYLOAD);
        }

        #[test]
        fn test_ledgers_respect_capacity(l in ledger()) {
            prop_assert!(l.len() <= HISTORY_CAPACITY);
        }

        #[test]
        fn test_snapshot_roundtrips(s in snapshot()) {
            let decoded = Snapshot::decode(&s.encode()).unwrap().unwrap();
            prop_assert_eq!(decoded, s);
        }

        #[test]
        fn test_scripts_are_non_empty(script: SessionScript) {
            prop_assert!(!script.payloads.is_empty());
            prop_assert!(script.payloads.iter().all(|p| p.len() <= MAX_PAYLOAD));
        }
    }
}
