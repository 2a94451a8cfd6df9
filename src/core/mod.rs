pub mod driver;
pub mod event;
pub mod frames;
pub mod observer;
pub mod pager;
pub mod state;

pub use driver::SchedCore;
pub use event::{PageEvent, SchedEvent};
pub use frames::FrameTable;
pub use observer::Observer;
pub use pager::PagingCore;
pub use state::{
    MinKey, PageId, ProcEntry, ProcIdx, ProcState, ProcessId, QueueId, Rank, ReadyQueue,
    SchedCtx, SlotId, Ticks,
};
