use std::hash::Hash;

use super::ReplacementPolicy;
use crate::core::{FrameTable, SlotId};

/// Least-recently-used, cursor form. After each fault the cursor moves to
/// the first resident slot in slot order that does not hold the page just
/// placed, and the next fault evicts whatever sits there. Hits leave both
/// the cursor and the slot contents alone.
pub struct LruPolicy {
    last_placed: Option<SlotId>,
}

impl<P: Clone + Eq + Hash> ReplacementPolicy<P> for LruPolicy {
    fn init(_frames: usize, _references: &[P]) -> Self {
        Self { last_placed: None }
    }

    fn loaded(&mut self, _step: usize, slot: SlotId, _page: &P) {
        self.last_placed = Some(slot);
    }

    fn victim(&mut self, table: &FrameTable<P>, _step: usize) -> SlotId {
        table
            .iter()
            .map(|(slot, _)| slot)
            .find(|&slot| Some(slot) != self.last_placed)
            // A single frame has nothing else to point at
            .or(self.last_placed)
            .unwrap_or(0)
    }
}
