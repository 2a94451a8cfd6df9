use keyed_priority_queue::KeyedPriorityQueue;
use rustc_hash::FxHashMap;
use std::{cmp::Reverse, hash::Hash};

use super::ReplacementPolicy;
use crate::core::{FrameTable, SlotId};

/// Position of a page's next access. `Never` sorts after every `At`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum NextUse {
    At(usize),
    Never,
}

/// Belady's clairvoyant policy: evict the resident page whose next use is
/// farthest away, preferring pages that are never used again. Equal
/// candidates (only possible among `Never`) resolve to the lowest slot.
///
/// The whole reference string is scanned once at `init` to find each
/// access's next occurrence, so a fault costs a heap peek instead of a
/// scan of the remaining suffix.
pub struct OptimalPolicy {
    next_use: Vec<NextUse>,
    // Max-heap: farthest next use first, then lowest slot
    slots: KeyedPriorityQueue<SlotId, (NextUse, Reverse<SlotId>)>,
}

impl OptimalPolicy {
    fn record(&mut self, step: usize, slot: SlotId) {
        let next = self.next_use.get(step).copied().unwrap_or(NextUse::Never);
        self.slots.push(slot, (next, Reverse(slot)));
    }
}

impl<P: Clone + Eq + Hash> ReplacementPolicy<P> for OptimalPolicy {
    fn init(frames: usize, references: &[P]) -> Self {
        let mut next_use = vec![NextUse::Never; references.len()];
        let mut seen: FxHashMap<&P, usize> = FxHashMap::default();
        for (step, page) in references.iter().enumerate().rev() {
            if let Some(&later) = seen.get(page) {
                next_use[step] = NextUse::At(later);
            }
            seen.insert(page, step);
        }

        Self {
            next_use,
            slots: KeyedPriorityQueue::with_capacity(frames),
        }
    }

    fn hit(&mut self, step: usize, slot: SlotId, _page: &P) {
        self.record(step, slot);
    }

    fn loaded(&mut self, step: usize, slot: SlotId, _page: &P) {
        self.record(step, slot);
    }

    fn victim(&mut self, table: &FrameTable<P>, _step: usize) -> SlotId {
        debug_assert_eq!(self.slots.len(), table.size());
        self.slots.peek().map_or(0, |(&slot, _)| slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        paging::{FifoPolicy, LfuPolicy, LruPolicy},
        sim::run_policy,
    };

    #[test]
    fn textbook_reference_string() {
        let pages = [7u64, 0, 1, 2, 0, 3, 0, 4, 2, 3, 0, 3, 2, 1, 2, 0, 1, 7, 0, 1];
        let result = run_policy::<OptimalPolicy, _>(&pages, 3).unwrap();
        assert_eq!(result.total_page_faults, 9);
        assert_eq!(result.total_page_hits, 11);
        assert_eq!(
            result.final_frames_table.last().unwrap(),
            &vec![Some(7), Some(0), Some(1)]
        );
    }

    #[test]
    fn evicts_farthest_next_use() {
        // At step 3: 1 is next used at 4, 2 at 5, 3 at 6
        let result = run_policy::<OptimalPolicy, _>(&[1u64, 2, 3, 4, 1, 2, 3], 3).unwrap();
        assert_eq!(
            result.final_frames_table[3],
            vec![Some(1), Some(2), Some(4)]
        );
    }

    #[test]
    fn never_used_again_goes_first_in_slot_order() {
        // 1 and 2 are dead after step 1; slot 0 loses the tie
        let result = run_policy::<OptimalPolicy, _>(&[1u64, 2, 3, 4, 3], 3).unwrap();
        assert_eq!(
            result.final_frames_table[3],
            vec![Some(4), Some(2), Some(3)]
        );
        assert_eq!(result.total_page_faults, 4);
        assert_eq!(result.total_page_hits, 1);
    }

    #[test]
    fn live_page_returning_last_is_evicted() {
        let result = run_policy::<OptimalPolicy, _>(&[1u64, 2, 3, 9, 1, 3, 2, 1], 3).unwrap();
        // 1, 2 and 3 all return; 2 returns last
        assert_eq!(
            result.final_frames_table[3],
            vec![Some(1), Some(9), Some(3)]
        );
    }

    #[test]
    fn never_worse_than_other_policies() {
        let pages = [1u64, 3, 0, 3, 5, 6, 3, 1, 0, 5, 6, 2, 1, 0, 4, 3, 2, 1];
        for size in 1..6 {
            let optimal = run_policy::<OptimalPolicy, _>(&pages, size).unwrap();
            let fifo = run_policy::<FifoPolicy, _>(&pages, size).unwrap();
            let lru = run_policy::<LruPolicy, _>(&pages, size).unwrap();
            let lfu = run_policy::<LfuPolicy<u64>, _>(&pages, size).unwrap();
            assert!(optimal.total_page_faults <= fifo.total_page_faults);
            assert!(optimal.total_page_faults <= lru.total_page_faults);
            assert!(optimal.total_page_faults <= lfu.total_page_faults);
        }
    }
}
