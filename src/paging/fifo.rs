use std::hash::Hash;

use super::ReplacementPolicy;
use crate::core::{FrameTable, SlotId};

/// First-in-first-out: a circular cursor over the frames that moves one
/// slot past every page it loads. Hits leave it alone.
pub struct FifoPolicy {
    next_slot: SlotId,
    frames: usize,
}

impl<P: Clone + Eq + Hash> ReplacementPolicy<P> for FifoPolicy {
    fn init(frames: usize, _references: &[P]) -> Self {
        Self {
            next_slot: 0,
            frames,
        }
    }

    fn loaded(&mut self, _step: usize, slot: SlotId, _page: &P) {
        self.next_slot = (slot + 1) % self.frames;
    }

    fn victim(&mut self, table: &FrameTable<P>, _step: usize) -> SlotId {
        debug_assert!(table.page_at(self.next_slot).is_some());
        self.next_slot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::run_policy;

    #[test]
    fn single_frame_misses_alternating_pages() {
        let result = run_policy::<FifoPolicy, _>(&[1u64, 2, 1, 2], 1).unwrap();
        assert_eq!(result.total_page_faults, 4);
        assert_eq!(result.total_page_hits, 0);
        assert_eq!(
            result.final_frames_table,
            vec![vec![Some(1)], vec![Some(2)], vec![Some(1)], vec![Some(2)]]
        );
    }

    #[test]
    fn evicts_oldest_load_not_oldest_use() {
        // 1 is reused at step 3 but is still first out
        let result = run_policy::<FifoPolicy, _>(&[1u64, 2, 3, 1, 4], 3).unwrap();
        assert_eq!(
            result.final_frames_table.last().unwrap(),
            &vec![Some(4), Some(2), Some(3)]
        );
        assert_eq!(result.total_page_faults, 4);
        assert_eq!(result.total_page_hits, 1);
    }

    #[test]
    fn textbook_reference_string() {
        let pages = [7u64, 0, 1, 2, 0, 3, 0, 4, 2, 3, 0, 3, 2, 1, 2, 0, 1, 7, 0, 1];
        let result = run_policy::<FifoPolicy, _>(&pages, 3).unwrap();
        assert_eq!(result.total_page_faults, 15);
        assert_eq!(result.total_page_hits, 5);
    }

    #[test]
    fn belady_anomaly_shows_up() {
        let pages = [1u64, 2, 3, 4, 1, 2, 5, 1, 2, 3, 4, 5];
        let three = run_policy::<FifoPolicy, _>(&pages, 3).unwrap();
        let four = run_policy::<FifoPolicy, _>(&pages, 4).unwrap();
        assert_eq!(three.total_page_faults, 9);
        assert_eq!(four.total_page_faults, 10);
    }

    #[test]
    fn hits_are_recorded_without_moving_pages() {
        let result = run_policy::<FifoPolicy, _>(&[5u64, 5, 5], 2).unwrap();
        assert_eq!(result.total_page_faults, 1);
        assert!(
            result
                .final_frames_table
                .iter()
                .all(|frames| frames == &vec![Some(5), None])
        );
    }
}
