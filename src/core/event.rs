use crate::core::{ProcessId, SlotId, Ticks};

#[derive(Debug)]
pub enum SchedEvent {
    Arrived {
        process: ProcessId,
    },
    Dispatched {
        process: ProcessId,
        slice: Ticks,
    },
    // Slice ended with burst left over
    Preempted {
        process: ProcessId,
        remaining: Ticks,
    },
    Completed {
        process: ProcessId,
    },
    // Nothing eligible; clock jumps to the next arrival
    Idle {
        until: Ticks,
    },
}

#[derive(Debug)]
pub enum PageEvent<'a, P> {
    Hit {
        page: &'a P,
        slot: SlotId,
    },
    Fault {
        page: &'a P,
        slot: SlotId,
        evicted: Option<P>,
    },
}
