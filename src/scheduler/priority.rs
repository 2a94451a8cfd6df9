use super::{Dispatch, ProcIdx, SchedCtx, SchedParams, Scheduler};
use crate::{Result, core::QueueId};

/// Non-preemptive priority scheduling. Lower `priority` value runs first;
/// ties go to the earlier arrival.
pub struct PriorityScheduler {
    ready: QueueId,
}

impl Scheduler for PriorityScheduler {
    fn init(ctx: &mut SchedCtx, _params: &SchedParams) -> Result<Self> {
        Ok(Self {
            ready: ctx.create_queue_priq(),
        })
    }

    fn enqueue(&mut self, ctx: &mut SchedCtx, proc: ProcIdx) {
        let priority = i128::from(ctx.proc(proc).priority);
        ctx.queue_push_priq(self.ready, proc, priority);
    }

    fn pick_next(&mut self, ctx: &mut SchedCtx) -> Option<Dispatch> {
        let proc = ctx.queue_pop(self.ready)?;
        debug_assert!(
            ctx.proc(proc).arrival_time <= ctx.now,
            "Process {proc} enqueued before its arrival"
        );
        Some(Dispatch::to_completion(proc))
    }
}
