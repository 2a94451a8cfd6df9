use keyed_priority_queue::KeyedPriorityQueue;
use rustc_hash::FxHashMap;
use slotmap::{SlotMap, new_key_type};
use std::collections::VecDeque;

use crate::sim::{GanttEntry, Process};

pub type Ticks = u64;
pub type ProcessId = u64;
pub type PageId = u64;
// Index into the arrival-sorted process table
pub type ProcIdx = usize;
pub type SlotId = usize;
new_key_type! {
    pub struct QueueId;
}

/// Wraps a key so that `KeyedPriorityQueue` (a max-heap) pops the
/// smallest one first.
#[derive(PartialEq, Eq, Hash, Debug, Copy, Clone)]
pub struct MinKey<T>(pub T);

impl<T: Ord> PartialOrd for MinKey<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Ord> Ord for MinKey<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other.0.cmp(&self.0)
    }
}

// Primary ordering key, then table index so equal keys keep arrival order
pub type Rank = MinKey<(i128, ProcIdx)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcState {
    Pending,
    Ready,
    Running,
    Completed,
}

#[derive(Debug, Clone)]
pub struct ProcEntry {
    pub id: ProcessId,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub priority: i64,
    pub state: ProcState,
    pub remaining: Ticks,
    pub first_dispatch: Option<Ticks>,
    pub completion_time: Option<Ticks>,
}

impl ProcEntry {
    fn from_process(process: &Process) -> Self {
        Self {
            id: process.id,
            arrival_time: process.arrival_time,
            burst_time: process.burst_time,
            priority: process.priority,
            state: ProcState::Pending,
            remaining: process.burst_time,
            first_dispatch: None,
            completion_time: None,
        }
    }
}

#[derive(Debug)]
pub enum ReadyQueue {
    Fifo { procs: VecDeque<ProcIdx> },
    Priq { procs: KeyedPriorityQueue<ProcIdx, Rank> },
}

impl ReadyQueue {
    pub fn new_fifo() -> Self {
        Self::Fifo {
            procs: VecDeque::new(),
        }
    }

    pub fn new_priq() -> Self {
        Self::Priq {
            procs: KeyedPriorityQueue::new(),
        }
    }

    pub fn contains(&self, proc: ProcIdx) -> bool {
        match self {
            Self::Fifo { procs } => procs.contains(&proc),
            Self::Priq { procs } => procs.get_priority(&proc).is_some(),
        }
    }
}

/// Simulated machine state for one scheduling run. Owns the clock, the
/// arrival-sorted process table with remaining bursts, the ready queues
/// created by the policy, and the Gantt chart built so far.
#[derive(Debug)]
pub struct SchedCtx {
    pub now: Ticks,
    pub procs: Vec<ProcEntry>,
    pub queues: SlotMap<QueueId, ReadyQueue>,
    pub proc_to_queue: FxHashMap<ProcIdx, QueueId>,
    pub gantt: Vec<GanttEntry>,
}

impl SchedCtx {
    pub fn new(processes: &[Process]) -> Self {
        let mut order: Vec<&Process> = processes.iter().collect();
        // Stable: equal arrivals keep their input order
        order.sort_by_key(|p| p.arrival_time);

        Self {
            now: 0,
            procs: order.into_iter().map(ProcEntry::from_process).collect(),
            queues: SlotMap::with_key(),
            proc_to_queue: FxHashMap::default(),
            gantt: Vec::new(),
        }
    }

    pub fn advance_time(&mut self, delta: Ticks) {
        self.now = self.now.saturating_add(delta);
    }

    pub fn create_queue_fifo(&mut self) -> QueueId {
        self.queues.insert(ReadyQueue::new_fifo())
    }

    pub fn create_queue_priq(&mut self) -> QueueId {
        self.queues.insert(ReadyQueue::new_priq())
    }

    fn queue_push(&mut self, queue_id: QueueId, proc: ProcIdx, key: Option<i128>) {
        debug_assert!(
            !self.proc_to_queue.contains_key(&proc),
            "Process {proc} already present in some ready queue"
        );
        debug_assert_eq!(
            self.proc(proc).state,
            ProcState::Ready,
            "Process {proc} must be Ready when enqueued"
        );

        let Some(queue) = self.queues.get_mut(queue_id) else {
            debug_assert!(false, "Unknown ready queue {queue_id:?}");
            return;
        };

        match queue {
            ReadyQueue::Fifo { procs } => procs.push_back(proc),
            ReadyQueue::Priq { procs } => {
                debug_assert!(key.is_some(), "Pushed to a priority queue with no key");
                procs.push(proc, MinKey((key.unwrap_or_default(), proc)));
            }
        }

        self.proc_to_queue.insert(proc, queue_id);
    }

    pub fn queue_push_fifo(&mut self, queue_id: QueueId, proc: ProcIdx) {
        self.queue_push(queue_id, proc, None);
    }

    pub fn queue_push_priq(&mut self, queue_id: QueueId, proc: ProcIdx, key: i128) {
        self.queue_push(queue_id, proc, Some(key));
    }

    pub fn queue_pop(&mut self, queue_id: QueueId) -> Option<ProcIdx> {
        let queue = self.queues.get_mut(queue_id)?;
        let proc = match queue {
            ReadyQueue::Fifo { procs } => procs.pop_front(),
            ReadyQueue::Priq { procs } => procs.pop().map(|p| p.0),
        }?;

        let removed = self.proc_to_queue.remove(&proc);
        debug_assert!(removed.is_some(), "Process {proc} missing queue membership");

        Some(proc)
    }

    pub fn proc(&self, proc: ProcIdx) -> &ProcEntry {
        &self.procs[proc]
    }

    pub fn proc_mut(&mut self, proc: ProcIdx) -> &mut ProcEntry {
        &mut self.procs[proc]
    }

    pub fn mark_ready(&mut self, proc: ProcIdx) {
        let entry = self.proc_mut(proc);
        debug_assert!(
            entry.state != ProcState::Completed,
            "Completed process {} cannot be ready",
            entry.id
        );
        entry.state = ProcState::Ready;
    }

    pub fn set_running(&mut self, proc: ProcIdx) {
        debug_assert!(
            !self.proc_to_queue.contains_key(&proc),
            "Running process {proc} must not be enqueued"
        );
        debug_assert!(
            self.procs.iter().all(|p| p.state != ProcState::Running),
            "CPU already running a process"
        );

        let now = self.now;
        let entry = self.proc_mut(proc);
        entry.state = ProcState::Running;
        entry.first_dispatch.get_or_insert(now);
    }

    /// Runs `proc` for `ticks` starting at the current clock and appends
    /// the slice to the Gantt chart.
    pub fn run_slice(&mut self, proc: ProcIdx, ticks: Ticks) {
        debug_assert!(ticks > 0, "Zero-length slice for process {proc}");
        let start_time = self.now;
        self.advance_time(ticks);

        let entry = self.proc_mut(proc);
        entry.remaining = entry.remaining.saturating_sub(ticks);
        let process_id = entry.id;

        self.gantt.push(GanttEntry {
            process_id,
            start_time,
            finish_time: self.now,
        });
    }

    pub fn mark_completed(&mut self, proc: ProcIdx) {
        debug_assert!(
            !self.proc_to_queue.contains_key(&proc),
            "Completing process {proc} that is still enqueued"
        );

        let now = self.now;
        let entry = self.proc_mut(proc);
        debug_assert!(
            entry.state == ProcState::Running,
            "Process {proc} must have been running before marked complete"
        );
        debug_assert_eq!(entry.remaining, 0, "Process {proc} completed early");

        entry.state = ProcState::Completed;
        entry.completion_time = Some(now);
    }

    pub fn is_ready(&self, proc: ProcIdx) -> bool {
        self.proc(proc).state == ProcState::Ready
    }

    pub fn all_completed(&self) -> bool {
        self.procs.iter().all(|p| p.state == ProcState::Completed)
    }
}
