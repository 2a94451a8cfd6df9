pub mod fcfs;
pub mod priority;
pub mod round_robin;
pub mod sjf;

use crate::{
    Result,
    core::{
        Ticks,
        state::{ProcIdx, SchedCtx},
    },
};
pub use fcfs::FcfsScheduler;
pub use priority::PriorityScheduler;
pub use round_robin::RoundRobinScheduler;
pub use sjf::SjfScheduler;

/// Per-run knobs a policy may read at `init`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchedParams {
    pub time_quantum: Option<Ticks>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatch {
    pub proc: ProcIdx,
    // `None` runs the process to completion
    pub slice: Option<Ticks>,
}

impl Dispatch {
    pub fn to_completion(proc: ProcIdx) -> Self {
        Self { proc, slice: None }
    }

    pub fn for_slice(proc: ProcIdx, slice: Ticks) -> Self {
        Self {
            proc,
            slice: Some(slice),
        }
    }
}

/// A CPU scheduling policy driven by [`SchedCore`](crate::core::SchedCore).
///
/// The core owns the clock and the process table. It calls `enqueue` once
/// per process on arrival, `pick_next` whenever the CPU is free, and then
/// either `stopping` (slice ended, burst remains; the process is Ready
/// again) or `completed`.
pub trait Scheduler {
    fn init(ctx: &mut SchedCtx, params: &SchedParams) -> Result<Self>
    where
        Self: Sized;

    fn enqueue(&mut self, ctx: &mut SchedCtx, proc: ProcIdx);

    /// Chooses the next process to run, or `None` to leave the CPU idle
    /// until the next arrival.
    fn pick_next(&mut self, ctx: &mut SchedCtx) -> Option<Dispatch>;

    fn stopping(&mut self, _ctx: &mut SchedCtx, _proc: ProcIdx) {}

    fn completed(&mut self, _ctx: &mut SchedCtx, _proc: ProcIdx) {}
}
