pub mod fifo;
pub mod lfu;
pub mod lru;
pub mod optimal;

use crate::core::{FrameTable, SlotId};
pub use fifo::FifoPolicy;
pub use lfu::LfuPolicy;
pub use lru::LruPolicy;
pub use optimal::OptimalPolicy;

/// A page replacement policy driven by [`PagingCore`](crate::core::PagingCore).
///
/// `step` is the index of the access in the reference string. The core
/// fills empty frames in slot order on its own; `victim` is only asked
/// once every frame holds a page.
pub trait ReplacementPolicy<P> {
    fn init(frames: usize, references: &[P]) -> Self
    where
        Self: Sized;

    /// Called for every access before the hit/fault decision.
    fn touched(&mut self, _step: usize, _page: &P) {}

    fn hit(&mut self, _step: usize, _slot: SlotId, _page: &P) {}

    fn loaded(&mut self, step: usize, slot: SlotId, page: &P);

    fn victim(&mut self, table: &FrameTable<P>, step: usize) -> SlotId;
}
