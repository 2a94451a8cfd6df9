use log::trace;

use super::{
    event::SchedEvent,
    observer::Observer,
    state::{ProcIdx, SchedCtx, Ticks},
};
use crate::{
    Result,
    scheduler::{Dispatch, SchedParams, Scheduler},
    sim::{Process, ProcessStats, SchedulingResult},
};

/// Single-CPU simulation loop shared by every scheduling policy.
pub struct SchedCore<S: Scheduler> {
    pub ctx: SchedCtx,
    pub scheduler: S,
    observer: Observer,
    // Next table index that has not arrived yet
    arrival_cursor: usize,
}

impl<S: Scheduler> SchedCore<S> {
    pub fn new(processes: &[Process], params: &SchedParams) -> Result<Self> {
        let mut ctx = SchedCtx::new(processes);
        let scheduler = S::init(&mut ctx, params)?;
        Ok(Self {
            ctx,
            scheduler,
            observer: Observer::new(),
            arrival_cursor: 0,
        })
    }

    pub fn run(&mut self) -> SchedulingResult {
        loop {
            self.handle_arrivals();
            if self.ctx.all_completed() {
                break;
            }

            match self.scheduler.pick_next(&mut self.ctx) {
                Some(dispatch) => self.dispatch(dispatch),
                None => {
                    if !self.idle() {
                        break;
                    }
                }
            }
        }

        self.finish()
    }

    fn handle_arrivals(&mut self) {
        let now = self.ctx.now;
        while let Some(entry) = self.ctx.procs.get(self.arrival_cursor) {
            // Contiguous, since the table is sorted by arrival
            if entry.arrival_time > now {
                break;
            }
            let proc = self.arrival_cursor;
            self.emit(SchedEvent::Arrived { process: entry.id });

            self.ctx.mark_ready(proc);
            self.scheduler.enqueue(&mut self.ctx, proc);
            self.arrival_cursor += 1;
        }
    }

    fn dispatch(&mut self, dispatch: Dispatch) {
        let proc = dispatch.proc;
        let remaining = self.ctx.proc(proc).remaining;
        let slice = dispatch.slice.map_or(remaining, |s| s.min(remaining));

        self.ctx.set_running(proc);
        self.emit(SchedEvent::Dispatched {
            process: self.ctx.proc(proc).id,
            slice,
        });
        self.ctx.run_slice(proc, slice);
        self.observer.observe(&self.ctx);

        // Anything that arrived during the slice queues up before the
        // preempted process is handed back
        self.handle_arrivals();
        self.stop(proc);
    }

    fn stop(&mut self, proc: ProcIdx) {
        let entry = self.ctx.proc(proc);
        let (process, remaining) = (entry.id, entry.remaining);

        if remaining == 0 {
            self.ctx.mark_completed(proc);
            self.emit(SchedEvent::Completed { process });
            self.scheduler.completed(&mut self.ctx, proc);
        } else {
            self.ctx.mark_ready(proc);
            self.emit(SchedEvent::Preempted { process, remaining });
            self.scheduler.stopping(&mut self.ctx, proc);
        }
    }

    // Jump the clock to the next arrival. Nothing can change between now
    // and then, so this matches stepping one tick at a time.
    fn idle(&mut self) -> bool {
        let Some(next) = self.next_arrival() else {
            debug_assert!(false, "Policy left ready processes unscheduled");
            return false;
        };
        self.emit(SchedEvent::Idle { until: next });
        self.ctx.now = next;
        true
    }

    fn next_arrival(&self) -> Option<Ticks> {
        self.ctx
            .procs
            .get(self.arrival_cursor)
            .map(|entry| entry.arrival_time)
    }

    fn emit(&self, event: SchedEvent) {
        trace!("t={} {:?}", self.ctx.now, event);
    }

    fn finish(&mut self) -> SchedulingResult {
        let process_stats: Vec<ProcessStats> = self
            .ctx
            .procs
            .iter()
            .map(|entry| {
                let completion_time = entry.completion_time.unwrap_or(self.ctx.now);
                let turnaround_time = completion_time - entry.arrival_time;
                ProcessStats {
                    process_id: entry.id,
                    completion_time,
                    turnaround_time,
                    waiting_time: turnaround_time - entry.burst_time,
                    response_time: entry.first_dispatch.unwrap_or(completion_time)
                        - entry.arrival_time,
                }
            })
            .collect();

        let count = process_stats.len() as f64;
        // Per-process times fit in Ticks; their totals may not
        let waiting: u128 = process_stats.iter().map(|s| u128::from(s.waiting_time)).sum();
        let turnaround: u128 = process_stats
            .iter()
            .map(|s| u128::from(s.turnaround_time))
            .sum();

        SchedulingResult {
            average_waiting_time: waiting as f64 / count,
            average_turnaround_time: turnaround as f64 / count,
            gantt_chart: std::mem::take(&mut self.ctx.gantt),
            process_stats,
        }
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }
}
