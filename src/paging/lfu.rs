use keyed_priority_queue::KeyedPriorityQueue;
use rustc_hash::FxHashMap;
use std::hash::Hash;

use super::ReplacementPolicy;
use crate::core::{FrameTable, MinKey, SlotId};

/// Least-frequently-used.
///
/// Every access bumps a per-page counter before the hit/fault decision.
/// Counters survive eviction, so a page that comes back resumes its old
/// count. The victim is the occupied slot whose page has the lowest count,
/// lowest slot index first on ties.
pub struct LfuPolicy<P> {
    frequency: FxHashMap<P, u64>,
    slots: KeyedPriorityQueue<SlotId, MinKey<(u64, SlotId)>>,
}

impl<P: Clone + Eq + Hash> LfuPolicy<P> {
    pub fn frequency(&self, page: &P) -> u64 {
        self.frequency.get(page).copied().unwrap_or(0)
    }

    fn record(&mut self, slot: SlotId, page: &P) {
        let count = self.frequency(page);
        self.slots.push(slot, MinKey((count, slot)));
    }
}

impl<P: Clone + Eq + Hash> ReplacementPolicy<P> for LfuPolicy<P> {
    fn init(frames: usize, _references: &[P]) -> Self {
        Self {
            frequency: FxHashMap::default(),
            slots: KeyedPriorityQueue::with_capacity(frames),
        }
    }

    fn touched(&mut self, _step: usize, page: &P) {
        *self.frequency.entry(page.clone()).or_insert(0) += 1;
    }

    fn hit(&mut self, _step: usize, slot: SlotId, page: &P) {
        self.record(slot, page);
    }

    fn loaded(&mut self, _step: usize, slot: SlotId, page: &P) {
        self.record(slot, page);
    }

    fn victim(&mut self, table: &FrameTable<P>, _step: usize) -> SlotId {
        debug_assert_eq!(self.slots.len(), table.size());
        self.slots.peek().map_or(0, |(&slot, _)| slot)
    }
}
