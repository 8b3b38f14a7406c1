//! Best-move cache keyed by position hash.
//!
//! A fixed-size, direct-mapped table. Each slot keeps the full 64-bit key
//! so a probe only ever answers for the exact position that was stored.
//! A new entry replaces the slot when the slot is empty, holds another
//! position, or was stored with no more remaining depth than the new one.

use taktic_core::Move;

#[derive(Debug, Clone, Copy)]
struct Slot {
    key: u64,
    mv: Move,
    depth: u32,
}

/// Direct-mapped best-move cache.
#[derive(Debug)]
pub struct BestMoveCache {
    slots: Vec<Option<Slot>>,
    mask: usize,
}

impl BestMoveCache {
    /// Create a cache with `1 << bits` slots.
    pub fn new(bits: u32) -> Self {
        let len = 1usize << bits;
        Self {
            slots: vec![None; len],
            mask: len - 1,
        }
    }

    #[inline]
    fn index(&self, key: u64) -> usize {
        (key as usize) & self.mask
    }

    /// Best move recorded for exactly this position.
    pub fn probe(&self, key: u64) -> Option<Move> {
        match self.slots[self.index(key)] {
            Some(slot) if slot.key == key => Some(slot.mv),
            _ => None,
        }
    }

    /// Record `mv` as the best move found for `key` with `depth` plies left.
    pub fn store(&mut self, key: u64, mv: Move, depth: u32) {
        let idx = self.index(key);
        let slot = &mut self.slots[idx];
        let replace = match slot {
            None => true,
            Some(old) => old.key != key || old.depth <= depth,
        };
        if replace {
            *slot = Some(Slot { key, mv, depth });
        }
    }

    /// Empty every slot.
    pub fn clear(&mut self) {
        self.slots.fill(None);
    }

    /// Number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots.
    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}
