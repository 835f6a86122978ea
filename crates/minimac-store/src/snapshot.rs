//! Persistent snapshot: the serialized mirror of {counter, ledger}.
//!
//! The layout is explicit and endianness-fixed, independent of any
//! in-memory representation:
//!
//! ```text
//! offset  size  field
//! 0       4     magic 0xAA55AA55 (big-endian)
//! 4       8     counter (big-endian)
//! 12      1     entry count (0..=HISTORY_CAPACITY)
//! 13      9*L   L slots: 1-byte length + M-byte data block
//! ```
//!
//! Every save overwrites the full fixed-size image, padding slots
//! included. A snapshot whose magic does not match is absent, not an
//! error; the magic constant doubles as the layout version, so any
//! future layout change bumps it and old images read as absent.

use minimac_core::{HistoryEntry, HistoryLedger, HISTORY_CAPACITY, MAX_PAYLOAD};

use crate::error::{Result, StoreError};
use crate::traits::Nvram;

/// Signature marking a valid snapshot image.
pub const MAGIC: u32 = 0xAA55_AA55;

/// Bytes per ledger slot: length tag plus fixed data block.
const SLOT_LEN: usize = 1 + MAX_PAYLOAD;

const COUNTER_OFFSET: usize = 4;
const COUNT_OFFSET: usize = COUNTER_OFFSET + 8;
const SLOTS_OFFSET: usize = COUNT_OFFSET + 1;

/// Total size of the persisted region in bytes.
pub const SNAPSHOT_LEN: usize = SLOTS_OFFSET + HISTORY_CAPACITY * SLOT_LEN;

/// The in-memory image of a persisted engine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    /// The monotonic message counter.
    pub counter: u64,
    /// The history ledger at the time of the save.
    pub history: HistoryLedger,
}

impl Snapshot {
    /// The fresh state persisted on first initialization.
    pub fn zero() -> Self {
        Self {
            counter: 0,
            history: HistoryLedger::new(),
        }
    }

    /// Serialize to the fixed wire image.
    pub fn encode(&self) -> [u8; SNAPSHOT_LEN] {
        let mut image = [0u8; SNAPSHOT_LEN];
        image[..4].copy_from_slice(&MAGIC.to_be_bytes());
        image[COUNTER_OFFSET..COUNTER_OFFSET + 8].copy_from_slice(&self.counter.to_be_bytes());
        image[COUNT_OFFSET] = self.history.len() as u8;

        for (i, entry) in self.history.iter().enumerate() {
            let slot = SLOTS_OFFSET + i * SLOT_LEN;
            image[slot] = entry.len() as u8;
            image[slot + 1..slot + 1 + MAX_PAYLOAD].copy_from_slice(entry.slot_bytes());
        }
        image
    }

    /// Deserialize from a wire image.
    ///
    /// Returns `None` when the signature does not match (absent state),
    /// and [`StoreError::Corrupt`] when the signature matches but the
    /// fields are structurally impossible.
    pub fn decode(image: &[u8; SNAPSHOT_LEN]) -> Result<Option<Self>> {
        if image[..4] != MAGIC.to_be_bytes() {
            return Ok(None);
        }

        let mut counter_bytes = [0u8; 8];
        counter_bytes.copy_from_slice(&image[COUNTER_OFFSET..COUNTER_OFFSET + 8]);
        let counter = u64::from_be_bytes(counter_bytes);

        let count = image[COUNT_OFFSET] as usize;
        if count > HISTORY_CAPACITY {
            return Err(StoreError::Corrupt(format!(
                "entry count {count} exceeds capacity {HISTORY_CAPACITY}"
            )));
        }

        let mut entries = Vec::with_capacity(count);
        for i in 0..count {
            let slot = SLOTS_OFFSET + i * SLOT_LEN;
            let len = image[slot] as usize;
            if len > MAX_PAYLOAD {
                return Err(StoreError::Corrupt(format!(
                    "entry {i} length {len} exceeds maximum {MAX_PAYLOAD}"
                )));
            }
            let data = &image[slot + 1..slot + 1 + len];
            let entry = HistoryEntry::new(data)
                .map_err(|e| StoreError::Corrupt(e.to_string()))?;
            entries.push(entry);
        }

        Ok(Some(Self {
            counter,
            history: HistoryLedger::from_entries(&entries),
        }))
    }
}

/// Snapshot store bound to a region of a persistent medium.
///
/// Each state-changing engine operation calls [`save`](Self::save)
/// synchronously, so the persisted image is never more than one
/// operation behind memory.
#[derive(Debug)]
pub struct SnapshotStore<N: Nvram> {
    nvram: N,
    base_addr: usize,
}

impl<N: Nvram> SnapshotStore<N> {
    /// Bind a store to the medium at the given base address.
    pub fn new(nvram: N, base_addr: usize) -> Self {
        Self { nvram, base_addr }
    }

    /// Load the persisted snapshot, if a valid one exists.
    pub fn load(&self) -> Result<Option<Snapshot>> {
        let mut image = [0u8; SNAPSHOT_LEN];
        self.nvram.read(self.base_addr, &mut image)?;
        Snapshot::decode(&image)
    }

    /// Overwrite the persisted snapshot in full.
    pub fn save(&mut self, snapshot: &Snapshot) -> Result<()> {
        self.nvram.write(self.base_addr, &snapshot.encode())
    }

    /// Borrow the underlying medium.
    pub fn nvram(&self) -> &N {
        &self.nvram
    }

    /// Release the underlying medium.
    pub fn into_nvram(self) -> N {
        self.nvram
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryNvram;
    use proptest::prelude::*;

    fn ledger_of(payloads: &[&[u8]]) -> HistoryLedger {
        let mut ledger = HistoryLedger::new();
        for p in payloads {
            ledger.push(HistoryEntry::new(p).unwrap());
        }
        ledger
    }

    #[test]
    fn test_snapshot_len() {
        // 4 magic + 8 counter + 1 count + 5 * (1 + 8) slots.
        assert_eq!(SNAPSHOT_LEN, 58);
    }

    #[test]
    fn test_encode_layout() {
        let snapshot = Snapshot {
            counter: 0x0102030405060708,
            history: ledger_of(&[&[0xaa, 0xbb]]),
        };
        let image = snapshot.encode();

        assert_eq!(&image[..4], &[0xaa, 0x55, 0xaa, 0x55]);
        assert_eq!(&image[4..12], &[1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(image[12], 1);
        assert_eq!(image[13], 2); // first slot length
        assert_eq!(&image[14..16], &[0xaa, 0xbb]);
        // Padding slots stay zero.
        assert!(image[16..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_roundtrip_empty() {
        let snapshot = Snapshot::zero();
        let decoded = Snapshot::decode(&snapshot.encode()).unwrap().unwrap();
        assert_eq!(decoded, snapshot);
    }

    #[test]
    fn test_roundtrip_full_ledger() {
        let snapshot = Snapshot {
            counter: u64::MAX,
            history: ledger_of(&[&[1], &[2, 2], &[3; 8], &[], &[5, 5, 5]]),
        };
        let decoded = Snapshot::decode(&snapshot.encode()).unwrap().unwrap();
        assert_eq!(decoded, snapshot);
    }

    #[test]
    fn test_corrupted_magic_reads_absent() {
        let snapshot = Snapshot {
            counter: 42,
            history: ledger_of(&[&[1, 2]]),
        };

        for i in 0..4 {
            let mut image = snapshot.encode();
            image[i] ^= 0x01;
            assert!(
                Snapshot::decode(&image).unwrap().is_none(),
                "magic byte {i} corruption must read as absent"
            );
        }
    }

    #[test]
    fn test_impossible_count_is_corrupt() {
        let mut image = Snapshot::zero().encode();
        image[COUNT_OFFSET] = HISTORY_CAPACITY as u8 + 1;
        assert!(matches!(
            Snapshot::decode(&image),
            Err(StoreError::Corrupt(_))
        ));
    }

    #[test]
    fn test_impossible_entry_length_is_corrupt() {
        let mut image = Snapshot::zero().encode();
        image[COUNT_OFFSET] = 1;
        image[SLOTS_OFFSET] = MAX_PAYLOAD as u8 + 1;
        assert!(matches!(
            Snapshot::decode(&image),
            Err(StoreError::Corrupt(_))
        ));
    }

    #[test]
    fn test_slot_padding_is_dont_care() {
        let snapshot = Snapshot {
            counter: 7,
            history: ledger_of(&[&[0x11]]),
        };
        let mut image = snapshot.encode();
        // Scribble over the unused tail of the first slot.
        for b in &mut image[SLOTS_OFFSET + 2..SLOTS_OFFSET + SLOT_LEN] {
            *b = 0xcc;
        }
        let decoded = Snapshot::decode(&image).unwrap().unwrap();
        assert_eq!(decoded.history.iter().next().unwrap().as_bytes(), &[0x11]);
    }

    #[test]
    fn test_store_load_fresh_medium_is_absent() {
        let store = SnapshotStore::new(MemoryNvram::new(), 0);
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_store_save_then_load() {
        let mut store = SnapshotStore::new(MemoryNvram::new(), 0);
        let snapshot = Snapshot {
            counter: 3,
            history: ledger_of(&[&[1, 2], &[3]]),
        };
        store.save(&snapshot).unwrap();
        assert_eq!(store.load().unwrap(), Some(snapshot));
    }

    #[test]
    fn test_store_save_overwrites_fully() {
        let mut store = SnapshotStore::new(MemoryNvram::new(), 0);
        store
            .save(&Snapshot {
                counter: 9,
                history: ledger_of(&[&[1; 8], &[2; 8], &[3; 8], &[4; 8], &[5; 8]]),
            })
            .unwrap();

        let small = Snapshot {
            counter: 10,
            history: ledger_of(&[&[7]]),
        };
        store.save(&small).unwrap();
        assert_eq!(store.load().unwrap(), Some(small));
    }

    #[test]
    fn test_store_at_nonzero_base() {
        let mut store = SnapshotStore::new(MemoryNvram::with_capacity(256), 100);
        let snapshot = Snapshot {
            counter: 1,
            history: ledger_of(&[&[0xee]]),
        };
        store.save(&snapshot).unwrap();
        assert_eq!(store.load().unwrap(), Some(snapshot));
        // Region below the base is untouched.
        assert!(store.nvram().as_bytes()[..100].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_store_medium_too_small() {
        let store = SnapshotStore::new(MemoryNvram::with_capacity(SNAPSHOT_LEN - 1), 0);
        assert!(matches!(
            store.load(),
            Err(StoreError::OutOfBounds { .. })
        ));
    }

    proptest! {
        #[test]
        fn test_roundtrip_any_ledger(
            counter in any::<u64>(),
            payloads in prop::collection::vec(
                prop::collection::vec(any::<u8>(), 0..=MAX_PAYLOAD),
                0..=HISTORY_CAPACITY,
            ),
        ) {
            let mut history = HistoryLedger::new();
            for p in &payloads {
                history.push(HistoryEntry::new(p).unwrap());
            }
            let snapshot = Snapshot { counter, history };
            let decoded = Snapshot::decode(&snapshot.encode()).unwrap().unwrap();
            prop_assert_eq!(decoded, snapshot);
        }
    }
}
