use super::{Dispatch, ProcIdx, SchedCtx, SchedParams, Scheduler};
use crate::{Result, SimError, core::Ticks};

/// Round-robin over the arrival-sorted process table.
///
/// A cursor rotates through table positions starting just past the last
/// dispatched process, so every other eligible process gets a slice before
/// the same one is picked twice in a row. A process is eligible once it
/// has arrived and still has burst left.
pub struct RoundRobinScheduler {
    quantum: Ticks,
    last: Option<ProcIdx>,
}

impl Scheduler for RoundRobinScheduler {
    fn init(_ctx: &mut SchedCtx, params: &SchedParams) -> Result<Self> {
        let quantum = params
            .time_quantum
            .filter(|q| *q > 0)
            .ok_or(SimError::MissingParameter("timeQuantum"))?;

        Ok(Self {
            quantum,
            last: None,
        })
    }

    // Eligibility is read straight off the process table
    fn enqueue(&mut self, _ctx: &mut SchedCtx, _proc: ProcIdx) {}

    fn pick_next(&mut self, ctx: &mut SchedCtx) -> Option<Dispatch> {
        let count = ctx.procs.len();
        let start = self.last.map_or(0, |last| last + 1);

        let proc = (0..count)
            .map(|offset| (start + offset) % count)
            .find(|&proc| ctx.is_ready(proc))?;

        self.last = Some(proc);
        Some(Dispatch::for_slice(proc, self.quantum))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Process, SchedulingResult, run_scheduler};

    fn proc(id: u64, arrival_time: u64, burst_time: u64) -> Process {
        Process {
            id,
            arrival_time,
            burst_time,
            priority: 0,
        }
    }

    fn run(procs: &[Process], quantum: Ticks) -> SchedulingResult {
        let params = SchedParams {
            time_quantum: Some(quantum),
        };
        run_scheduler::<RoundRobinScheduler>(procs, &params).unwrap()
    }

    fn slices(result: &SchedulingResult) -> Vec<(u64, u64, u64)> {
        result
            .gantt_chart
            .iter()
            .map(|g| (g.process_id, g.start_time, g.finish_time))
            .collect()
    }

    #[test]
    fn alternates_between_ready_processes() {
        let result = run(&[proc(1, 0, 5), proc(2, 1, 3)], 2);
        assert_eq!(
            slices(&result),
            vec![(1, 0, 2), (2, 2, 4), (1, 4, 6), (2, 6, 7), (1, 7, 8)]
        );
        // P1 finishes at 8, P2 at 7
        assert_eq!(result.average_turnaround_time, (8.0 + 6.0) / 2.0);
        assert_eq!(result.average_waiting_time, (3.0 + 3.0) / 2.0);
    }

    #[test]
    fn lone_process_is_rescheduled() {
        let result = run(&[proc(1, 0, 5)], 2);
        assert_eq!(slices(&result), vec![(1, 0, 2), (1, 2, 4), (1, 4, 5)]);
        assert_eq!(result.average_waiting_time, 0.0);
    }

    #[test]
    fn last_slice_is_trimmed_to_remaining_burst() {
        let result = run(&[proc(1, 0, 3), proc(2, 0, 1)], 4);
        assert_eq!(slices(&result), vec![(1, 0, 3), (2, 3, 4)]);
    }

    #[test]
    fn idles_between_bursts() {
        let result = run(&[proc(1, 0, 1), proc(2, 6, 2)], 1);
        assert_eq!(slices(&result), vec![(1, 0, 1), (2, 6, 7), (2, 7, 8)]);
    }

    #[test]
    fn waiting_counts_gaps_between_slices() {
        let procs = [proc(1, 0, 4), proc(2, 0, 4), proc(3, 0, 4)];
        let result = run(&procs, 2);

        for stats in &result.process_stats {
            let own: Vec<_> = result
                .gantt_chart
                .iter()
                .filter(|g| g.process_id == stats.process_id)
                .collect();
            let ran: u64 = own.iter().map(|g| g.finish_time - g.start_time).sum();
            let finish = own.last().unwrap().finish_time;
            assert_eq!(stats.completion_time, finish);
            assert_eq!(stats.waiting_time, finish - ran);
        }
        assert_eq!(result.gantt_chart.len(), 6);
    }

    #[test]
    fn missing_quantum_is_rejected() {
        let procs = [proc(1, 0, 1)];
        let err = run_scheduler::<RoundRobinScheduler>(&procs, &SchedParams::default());
        assert!(matches!(err, Err(SimError::MissingParameter(_))));

        let zero = SchedParams {
            time_quantum: Some(0),
        };
        let err = run_scheduler::<RoundRobinScheduler>(&procs, &zero);
        assert!(matches!(err, Err(SimError::MissingParameter(_))));
    }
}
