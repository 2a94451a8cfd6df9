use std::hash::Hash;

use super::{
    frames::FrameTable,
    state::{ProcState, SchedCtx},
};

#[derive(Debug, Default)]
pub struct Observer {
    step: u64,
}

impl Observer {
    pub fn new() -> Self {
        Self { step: 0 }
    }

    pub fn steps(&self) -> u64 {
        self.step
    }

    pub fn observe(&mut self, ctx: &SchedCtx) {
        self.step += 1;

        let running = ctx
            .procs
            .iter()
            .filter(|p| p.state == ProcState::Running)
            .count();
        debug_assert!(running <= 1, "{running} processes running on one CPU");

        if let Some(last) = ctx.gantt.last() {
            debug_assert!(
                last.finish_time > last.start_time,
                "Zero-length slice for process {}",
                last.process_id
            );
            debug_assert!(
                last.finish_time <= ctx.now,
                "Slice for process {} ends after the clock",
                last.process_id
            );
        }
        // Earlier pairs were checked on earlier steps
        if let [.., prev, last] = ctx.gantt.as_slice() {
            debug_assert!(
                last.start_time >= prev.finish_time,
                "Gantt entries overlap: {prev:?} then {last:?}"
            );
        }

        for entry in &ctx.procs {
            debug_assert!(
                entry.remaining <= entry.burst_time,
                "Process {} has more remaining than its burst",
                entry.id
            );
        }

        for (&proc, &queue_id) in &ctx.proc_to_queue {
            let entry = ctx.proc(proc);
            debug_assert_ne!(
                entry.state,
                ProcState::Completed,
                "Completed process {} still present in queue {queue_id:?}",
                entry.id
            );
            debug_assert_ne!(
                entry.state,
                ProcState::Running,
                "Running process {} must not appear in any queue",
                entry.id
            );
            if let Some(queue) = ctx.queues.get(queue_id) {
                debug_assert!(
                    queue.contains(proc),
                    "proc_to_queue claims process {proc} in queue {queue_id:?}, but queue does not contain it"
                );
            } else {
                debug_assert!(false, "proc_to_queue references unknown queue {queue_id:?}");
            }
        }
    }

    pub fn observe_frames<P: Clone + Eq + Hash>(&mut self, table: &FrameTable<P>) {
        self.step += 1;

        debug_assert!(
            table.resident_count() <= table.size(),
            "{} pages resident in {} frames",
            table.resident_count(),
            table.size()
        );

        let mut occupied = 0;
        for (slot, page) in table.iter() {
            occupied += 1;
            debug_assert_eq!(
                table.slot_of(page),
                Some(slot),
                "Residency index disagrees with frame {slot}"
            );
        }
        debug_assert_eq!(
            occupied,
            table.resident_count(),
            "Residency index tracks a page that is in no frame"
        );
    }
}
