use rustc_hash::FxHashMap;
use std::hash::Hash;

use super::state::SlotId;

/// Fixed-size frame table plus a page -> slot residency index.
#[derive(Debug, Clone)]
pub struct FrameTable<P> {
    frames: Vec<Option<P>>,
    resident: FxHashMap<P, SlotId>,
}

impl<P: Clone + Eq + Hash> FrameTable<P> {
    pub fn new(size: usize) -> Self {
        Self {
            frames: vec![None; size],
            resident: FxHashMap::default(),
        }
    }

    pub fn size(&self) -> usize {
        self.frames.len()
    }

    pub fn resident_count(&self) -> usize {
        self.resident.len()
    }

    pub fn is_full(&self) -> bool {
        self.resident.len() == self.frames.len()
    }

    pub fn slot_of(&self, page: &P) -> Option<SlotId> {
        self.resident.get(page).copied()
    }

    pub fn page_at(&self, slot: SlotId) -> Option<&P> {
        self.frames.get(slot).and_then(Option::as_ref)
    }

    // First empty slot in slot order
    pub fn free_slot(&self) -> Option<SlotId> {
        if self.is_full() {
            return None;
        }
        self.frames.iter().position(Option::is_none)
    }

    /// Places `page` in `slot`, returning the page it evicted.
    pub fn place(&mut self, slot: SlotId, page: P) -> Option<P> {
        debug_assert!(
            !self.resident.contains_key(&page),
            "Page already resident, placing it again would duplicate it"
        );

        let evicted = self.frames[slot].replace(page.clone());
        if let Some(old) = &evicted {
            let removed = self.resident.remove(old);
            debug_assert_eq!(removed, Some(slot), "Residency index out of sync");
        }
        self.resident.insert(page, slot);
        evicted
    }

    pub fn snapshot(&self) -> Vec<Option<P>> {
        self.frames.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &P)> {
        self.frames
            .iter()
            .enumerate()
            .filter_map(|(slot, page)| page.as_ref().map(|p| (slot, p)))
    }
}
