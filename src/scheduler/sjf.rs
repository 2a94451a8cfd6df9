use super::{Dispatch, ProcIdx, SchedCtx, SchedParams, Scheduler};
use crate::{Result, core::QueueId};

/// Non-preemptive shortest-job-first. Ready processes are ranked by burst
/// time; equal bursts fall back to arrival order.
pub struct SjfScheduler {
    ready: QueueId,
}

impl Scheduler for SjfScheduler {
    fn init(ctx: &mut SchedCtx, _params: &SchedParams) -> Result<Self> {
        Ok(Self {
            ready: ctx.create_queue_priq(),
        })
    }

    fn enqueue(&mut self, ctx: &mut SchedCtx, proc: ProcIdx) {
        let burst = i128::from(ctx.proc(proc).remaining);
        ctx.queue_push_priq(self.ready, proc, burst);
    }

    fn pick_next(&mut self, ctx: &mut SchedCtx) -> Option<Dispatch> {
        ctx.queue_pop(self.ready).map(Dispatch::to_completion)
    }
}
