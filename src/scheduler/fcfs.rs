use super::{Dispatch, ProcIdx, SchedCtx, SchedParams, Scheduler};
use crate::{Result, core::QueueId};

/// First-come-first-served: one FIFO ready queue fed in arrival order,
/// every process runs its whole burst.
pub struct FcfsScheduler {
    ready: QueueId,
}

impl Scheduler for FcfsScheduler {
    fn init(ctx: &mut SchedCtx, _params: &SchedParams) -> Result<Self> {
        Ok(Self {
            ready: ctx.create_queue_fifo(),
        })
    }

    fn enqueue(&mut self, ctx: &mut SchedCtx, proc: ProcIdx) {
        ctx.queue_push_fifo(self.ready, proc);
    }

    fn pick_next(&mut self, ctx: &mut SchedCtx) -> Option<Dispatch> {
        ctx.queue_pop(self.ready).map(Dispatch::to_completion)
    }
}
