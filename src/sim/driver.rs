use log::debug;
use rustc_hash::FxHashSet;
use std::{fmt, fmt::Debug, hash::Hash, str::FromStr};

use super::workload::{PageReplacementResult, Process, SchedulingResult};
use crate::{
    Result, SimError,
    core::{PagingCore, SchedCore, Ticks},
    paging::{FifoPolicy, LfuPolicy, LruPolicy, OptimalPolicy, ReplacementPolicy},
    scheduler::{
        FcfsScheduler, PriorityScheduler, RoundRobinScheduler, SchedParams, Scheduler,
        SjfScheduler,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchedulerKind {
    Fcfs,
    Sjf,
    Priority,
    RoundRobin,
}

impl SchedulerKind {
    pub const ALL: [Self; 4] = [Self::Fcfs, Self::Sjf, Self::Priority, Self::RoundRobin];

    pub fn name(self) -> &'static str {
        match self {
            Self::Fcfs => "FCFS",
            Self::Sjf => "SJF",
            Self::Priority => "Priority",
            Self::RoundRobin => "RoundRobin",
        }
    }
}

impl FromStr for SchedulerKind {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| SimError::UnsupportedAlgorithm(s.to_owned()))
    }
}

impl fmt::Display for SchedulerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReplacementKind {
    Fifo,
    Optimal,
    Lru,
    Lfu,
}

impl ReplacementKind {
    pub const ALL: [Self; 4] = [Self::Fifo, Self::Optimal, Self::Lru, Self::Lfu];

    pub fn name(self) -> &'static str {
        match self {
            Self::Fifo => "FIFO",
            Self::Optimal => "Optimal",
            Self::Lru => "LRU",
            Self::Lfu => "LFU",
        }
    }
}

impl FromStr for ReplacementKind {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| SimError::UnsupportedAlgorithm(s.to_owned()))
    }
}

impl fmt::Display for ReplacementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Runs `processes` under the scheduling policy `kind`.
///
/// `time_quantum` is only read by round-robin, which refuses to start
/// without a positive one.
pub fn schedule(
    kind: SchedulerKind,
    processes: &[Process],
    time_quantum: Option<Ticks>,
) -> Result<SchedulingResult> {
    let params = SchedParams { time_quantum };
    let result = match kind {
        SchedulerKind::Fcfs => run_scheduler::<FcfsScheduler>(processes, &params),
        SchedulerKind::Sjf => run_scheduler::<SjfScheduler>(processes, &params),
        SchedulerKind::Priority => run_scheduler::<PriorityScheduler>(processes, &params),
        SchedulerKind::RoundRobin => run_scheduler::<RoundRobinScheduler>(processes, &params),
    }?;

    debug!(
        "{kind}: {} processes, {} slices, avg waiting {:.2}, avg turnaround {:.2}",
        processes.len(),
        result.gantt_chart.len(),
        result.average_waiting_time,
        result.average_turnaround_time
    );
    Ok(result)
}

/// Replays `pages` through `size` frames under the replacement policy `kind`.
pub fn replace<P>(kind: ReplacementKind, pages: &[P], size: usize) -> Result<PageReplacementResult<P>>
where
    P: Clone + Eq + Hash + Debug,
{
    let result = match kind {
        ReplacementKind::Fifo => run_policy::<FifoPolicy, P>(pages, size),
        ReplacementKind::Optimal => run_policy::<OptimalPolicy, P>(pages, size),
        ReplacementKind::Lru => run_policy::<LruPolicy, P>(pages, size),
        ReplacementKind::Lfu => run_policy::<LfuPolicy<P>, P>(pages, size),
    }?;

    debug!(
        "{kind}: {} references, {} frames, {} faults, {} hits",
        pages.len(),
        size,
        result.total_page_faults,
        result.total_page_hits
    );
    Ok(result)
}

pub fn run_scheduler<S: Scheduler>(
    processes: &[Process],
    params: &SchedParams,
) -> Result<SchedulingResult> {
    validate_processes(processes)?;
    let mut core = SchedCore::<S>::new(processes, params)?;
    Ok(core.run())
}

pub fn run_policy<R, P>(pages: &[P], size: usize) -> Result<PageReplacementResult<P>>
where
    R: ReplacementPolicy<P>,
    P: Clone + Eq + Hash + Debug,
{
    validate_frames(size)?;
    let mut core = PagingCore::<P, R>::new(pages, size);
    Ok(core.run())
}

fn validate_processes(processes: &[Process]) -> Result<()> {
    if processes.is_empty() {
        return Err(invalid("process list is empty".to_owned()));
    }

    let mut ids = FxHashSet::default();
    for process in processes {
        if process.burst_time == 0 {
            return Err(invalid(format!(
                "process {} has a burst time of 0",
                process.id
            )));
        }
        if !ids.insert(process.id) {
            return Err(invalid(format!("process id {} is not unique", process.id)));
        }
    }

    // The clock never passes the last arrival plus every burst
    let latest_arrival = processes.iter().map(|p| p.arrival_time).max().unwrap_or(0);
    let horizon = processes
        .iter()
        .try_fold(latest_arrival, |t, p| t.checked_add(p.burst_time));
    if horizon.is_none() {
        return Err(invalid(
            "arrival and burst times run past the end of the clock".to_owned(),
        ));
    }

    Ok(())
}

fn validate_frames(size: usize) -> Result<()> {
    if size == 0 {
        return Err(invalid("frame table size must be at least 1".to_owned()));
    }
    Ok(())
}

fn invalid(reason: String) -> SimError {
    debug!("rejected workload: {reason}");
    SimError::InvalidWorkload(reason)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proc(id: u64, arrival_time: u64, burst_time: u64) -> Process {
        Process {
            id,
            arrival_time,
            burst_time,
            priority: 0,
        }
    }

    #[test]
    fn selectors_round_trip_through_names() {
        for kind in SchedulerKind::ALL {
            assert_eq!(kind.name().parse::<SchedulerKind>(), Ok(kind));
        }
        for kind in ReplacementKind::ALL {
            assert_eq!(kind.to_string().parse::<ReplacementKind>(), Ok(kind));
        }
    }

    #[test]
    fn selectors_are_case_sensitive() {
        assert_eq!(
            "fcfs".parse::<SchedulerKind>(),
            Err(SimError::UnsupportedAlgorithm("fcfs".into()))
        );
        assert_eq!(
            "MRU".parse::<ReplacementKind>(),
            Err(SimError::UnsupportedAlgorithm("MRU".into()))
        );
    }

    #[test]
    fn empty_workload_is_rejected_by_every_policy() {
        for kind in SchedulerKind::ALL {
            assert!(matches!(
                schedule(kind, &[], Some(1)),
                Err(SimError::InvalidWorkload(_))
            ));
        }
    }

    #[test]
    fn zero_burst_is_rejected() {
        let err = schedule(SchedulerKind::Fcfs, &[proc(1, 0, 3), proc(2, 1, 0)], None);
        assert!(matches!(err, Err(SimError::InvalidWorkload(_))));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = schedule(SchedulerKind::Sjf, &[proc(1, 0, 3), proc(1, 1, 2)], None);
        assert!(matches!(err, Err(SimError::InvalidWorkload(_))));
    }

    #[test]
    fn clock_overflow_is_rejected() {
        for kind in SchedulerKind::ALL {
            assert!(matches!(
                schedule(kind, &[proc(1, u64::MAX - 1, 5)], Some(2)),
                Err(SimError::InvalidWorkload(_))
            ));
        }
    }

    #[test]
    fn totals_wider_than_the_clock() {
        let half = u64::MAX / 2;
        let procs = [proc(1, 0, half), proc(2, 0, half), proc(3, 0, 1)];
        let result = schedule(SchedulerKind::Fcfs, &procs, None).unwrap();
        assert_eq!(result.gantt_chart.last().unwrap().finish_time, u64::MAX);
        let expected = (u128::from(half) + u128::from(u64::MAX - 1)) as f64 / 3.0;
        assert_eq!(result.average_waiting_time, expected);
    }

    #[test]
    fn round_robin_needs_quantum() {
        let procs = [proc(1, 0, 3)];
        assert_eq!(
            schedule(SchedulerKind::RoundRobin, &procs, None),
            Err(SimError::MissingParameter("timeQuantum"))
        );
        // Other policies ignore it
        assert!(schedule(SchedulerKind::Fcfs, &procs, None).is_ok());
    }

    #[test]
    fn zero_frames_is_rejected() {
        for kind in ReplacementKind::ALL {
            assert!(matches!(
                replace(kind, &[1u64, 2], 0),
                Err(SimError::InvalidWorkload(_))
            ));
        }
    }

    #[test]
    fn empty_reference_string_is_fine() {
        let result = replace::<u64>(ReplacementKind::Lru, &[], 3).unwrap();
        assert_eq!(result.total_page_faults, 0);
        assert!(result.final_frames_table.is_empty());
    }

    #[test]
    fn pages_can_be_strings() {
        let pages = ["a", "b", "a", "c"];
        let result = replace(ReplacementKind::Lfu, &pages, 2).unwrap();
        assert_eq!(
            result.final_frames_table.last().unwrap(),
            &vec![Some("a"), Some("c")]
        );
    }
}
